use std::time::Instant;

use tracing::{info, warn};

use crate::infra::{CavernError, CavernObserver, Phase};
use crate::planners::{Explorer, Scavenger};
use crate::state::{HuntSession, Level, ScramSession};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOutcome {
    pub orb_found: bool,
    /// Weighted steps walked while hunting.
    pub hunt_steps: u32,
    pub gold_collected: u32,
    pub steps_remaining: u32,
    pub escaped: bool,
}

impl RunOutcome {
    pub fn is_success(&self) -> bool {
        self.orb_found && self.escaped
    }
}

/// Runs one level: hunt for the orb from the entrance, then scram from the
/// orb to the exit.
pub struct Game {
    observer: Box<dyn CavernObserver>,
}

impl Game {
    pub fn new(observer: impl CavernObserver + 'static) -> Self {
        Self {
            observer: Box::new(observer),
        }
    }

    pub fn run(&mut self, level: &Level) -> Result<RunOutcome, CavernError> {
        let run_start = Instant::now();
        let mut outcome = RunOutcome::default();

        self.observer
            .on_level_start(Some(level.seed), level.cavern.len(), level.budget);

        self.observer.on_phase_start(Phase::Hunt, level.entrance);
        let hunt = {
            let mut session = HuntSession::new(
                &level.cavern,
                level.entrance,
                level.orb,
                self.observer.as_mut(),
            )?;
            let report = Explorer::hunt(&mut session)?;
            outcome.hunt_steps = session.steps();
            report
        };
        outcome.orb_found = hunt.reached_orb;
        self.observer
            .on_phase_finished(Phase::Hunt, hunt.reached_orb, outcome.hunt_steps);

        if !hunt.reached_orb {
            warn!(
                "Orb not found after exploring {} of {} nodes",
                hunt.visit_order.len(),
                level.cavern.len()
            );
            self.observer.on_game_finished(&outcome);
            return Ok(outcome);
        }

        // Scram works on its own copy so gold pickups don't alter the level.
        let mut cavern = level.cavern.clone();
        self.observer.on_phase_start(Phase::Scram, level.orb);
        let (scram, escaped) = {
            let mut session = ScramSession::new(
                &mut cavern,
                level.orb,
                level.exit,
                level.budget,
                self.observer.as_mut(),
            )?;
            let report = Scavenger::scram(&mut session)?;
            (report, session.is_at_exit())
        };
        outcome.gold_collected = scram.gold_collected;
        outcome.steps_remaining = scram.steps_remaining;
        outcome.escaped = escaped;
        self.observer.on_phase_finished(
            Phase::Scram,
            escaped,
            level.budget - scram.steps_remaining,
        );

        info!(
            "Run took {:.2}ms ({} detours)",
            run_start.elapsed().as_secs_f64() * 1000.0,
            scram.detours.len()
        );
        self.observer.on_game_finished(&outcome);
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::infra::{NodeId, Position};
    use crate::state::{Cavern, GeneratorConfig, LevelGenerator};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        LevelStart(u32),
        PhaseStart(Phase, NodeId),
        Move(Phase, NodeId, NodeId),
        Gold(NodeId, u32),
        PhaseFinished(Phase, bool, u32),
        Finished(bool),
    }

    #[derive(Clone, Default)]
    struct RecordingObserver {
        events: Rc<RefCell<Vec<Event>>>,
    }

    impl CavernObserver for RecordingObserver {
        fn on_level_start(&mut self, _seed: Option<u64>, _node_count: usize, budget: u32) {
            self.events.borrow_mut().push(Event::LevelStart(budget));
        }

        fn on_phase_start(&mut self, phase: Phase, start: NodeId) {
            self.events.borrow_mut().push(Event::PhaseStart(phase, start));
        }

        fn on_move(&mut self, phase: Phase, from: NodeId, to: NodeId, _weight: u32) {
            self.events.borrow_mut().push(Event::Move(phase, from, to));
        }

        fn on_gold_collected(&mut self, at: NodeId, amount: u32, _steps_remaining: u32) {
            self.events.borrow_mut().push(Event::Gold(at, amount));
        }

        fn on_phase_finished(&mut self, phase: Phase, success: bool, steps: u32) {
            self.events
                .borrow_mut()
                .push(Event::PhaseFinished(phase, success, steps));
        }

        fn on_game_finished(&mut self, outcome: &RunOutcome) {
            self.events
                .borrow_mut()
                .push(Event::Finished(outcome.is_success()));
        }
    }

    /// Unit square A=0 (0,0), B=1 (1,0), C=2 (1,1), D=3 (0,1).
    fn square_level(orb: u32, budget: u32) -> Level {
        let mut cavern = Cavern::new();
        let corners = [(0, 0, 0), (1, 1, 0), (2, 1, 1), (3, 0, 1)];
        for (id, x, y) in corners {
            let gold = if id == 2 { 4 } else { 0 };
            cavern.add_node(NodeId(id), Position::new(x, y), gold).unwrap();
        }
        for (a, b) in [(0, 1), (1, 2), (2, 3), (3, 0)] {
            cavern.add_edge(NodeId(a), NodeId(b), 1).unwrap();
        }
        Level {
            seed: 0,
            cavern,
            entrance: NodeId(1),
            orb: NodeId(orb),
            exit: NodeId(3),
            budget,
        }
    }

    #[test]
    fn test_square_run_reports_every_event() {
        let observer = RecordingObserver::default();
        let events = Rc::clone(&observer.events);
        let mut game = Game::new(observer);

        // Hunt from B to A, then scram from A to D collecting C on the way.
        let level = square_level(0, 10);
        let outcome = game.run(&level).unwrap();

        assert_eq!(
            outcome,
            RunOutcome {
                orb_found: true,
                hunt_steps: 1,
                gold_collected: 4,
                steps_remaining: 7,
                escaped: true,
            }
        );
        assert_eq!(
            *events.borrow(),
            vec![
                Event::LevelStart(10),
                Event::PhaseStart(Phase::Hunt, NodeId(1)),
                Event::Move(Phase::Hunt, NodeId(1), NodeId(0)),
                Event::PhaseFinished(Phase::Hunt, true, 1),
                Event::PhaseStart(Phase::Scram, NodeId(0)),
                Event::Move(Phase::Scram, NodeId(0), NodeId(1)),
                Event::Move(Phase::Scram, NodeId(1), NodeId(2)),
                Event::Gold(NodeId(2), 4),
                Event::Move(Phase::Scram, NodeId(2), NodeId(3)),
                Event::PhaseFinished(Phase::Scram, true, 3),
                Event::Finished(true),
            ]
        );
        // The level itself still carries its gold.
        assert_eq!(level.cavern.gold(NodeId(2)), 4);
    }

    #[test]
    fn test_unreachable_orb_skips_scram() {
        let mut level = square_level(0, 10);
        level
            .cavern
            .add_node(NodeId(9), Position::new(5, 5), 0)
            .unwrap();
        level.orb = NodeId(9);

        let observer = RecordingObserver::default();
        let events = Rc::clone(&observer.events);
        let mut game = Game::new(observer);
        let outcome = game.run(&level).unwrap();

        assert!(!outcome.orb_found);
        assert!(!outcome.escaped);
        assert!(!outcome.is_success());
        assert!(
            !events
                .borrow()
                .iter()
                .any(|e| matches!(e, Event::PhaseStart(Phase::Scram, _)))
        );
        assert_eq!(events.borrow().last(), Some(&Event::Finished(false)));
    }

    #[test]
    fn test_generated_levels_succeed() {
        let config = GeneratorConfig {
            rows: 6,
            cols: 6,
            ..GeneratorConfig::default()
        };
        for seed in 0..20 {
            let level = LevelGenerator::new(config, Some(seed)).generate().unwrap();
            let mut game = Game::new(RecordingObserver::default());
            let outcome = game.run(&level).unwrap();
            assert!(outcome.is_success(), "seed {} failed: {:?}", seed, outcome);
            assert!(outcome.steps_remaining <= level.budget);
        }
    }
}
