use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::infra::{CavernError, NodeId, PathOracle, Position};
use crate::state::Cavern;

/// Upper bound for `budget_slack`, in percent.
pub const MAX_BUDGET_SLACK: u32 = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub rows: i32,
    pub cols: i32,
    /// Edge weights are drawn from `1..=max_weight`.
    pub max_weight: u32,
    /// Percentage of nodes carrying gold.
    pub gold_chance: u32,
    pub max_gold: u32,
    /// Percentage of grid links beyond the spanning tree that become edges.
    pub loop_chance: u32,
    /// Percentage added on top of the direct escape cost.
    pub budget_slack: u32,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 8,
            cols: 8,
            max_weight: 5,
            gold_chance: 30,
            max_gold: 20,
            loop_chance: 20,
            budget_slack: 150,
        }
    }
}

/// A generated cavern with its three landmarks and the scram budget.
#[derive(Debug, Clone)]
pub struct Level {
    pub seed: u64,
    pub cavern: Cavern,
    pub entrance: NodeId,
    pub orb: NodeId,
    pub exit: NodeId,
    pub budget: u32,
}

pub struct LevelGenerator {
    config: GeneratorConfig,
    seed: u64,
    rng: StdRng,
}

impl LevelGenerator {
    /// Without a seed one is drawn at random, so the level can still be replayed.
    pub fn new(config: GeneratorConfig, seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            config: GeneratorConfig {
                rows: config.rows.max(2),
                cols: config.cols.max(2),
                max_weight: config.max_weight.max(1),
                gold_chance: config.gold_chance.min(100),
                max_gold: config.max_gold.max(1),
                loop_chance: config.loop_chance.min(100),
                budget_slack: config.budget_slack.min(MAX_BUDGET_SLACK),
            },
            seed,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    #[tracing::instrument(level = "debug", skip(self), fields(seed = self.seed))]
    pub fn generate(&mut self) -> Result<Level, CavernError> {
        let mut cavern = Cavern::new();

        for y in 0..self.config.rows {
            for x in 0..self.config.cols {
                let position = Position::new(x, y);
                let gold = if self.rng.random_ratio(self.config.gold_chance, 100) {
                    self.rng.random_range(1..=self.config.max_gold)
                } else {
                    0
                };
                cavern.add_node(self.id_at(position), position, gold)?;
            }
        }

        self.carve_spanning_tree(&mut cavern)?;
        self.add_loops(&mut cavern)?;

        let mut ids: Vec<NodeId> = cavern.nodes().map(|node| node.id).collect();
        ids.shuffle(&mut self.rng);
        let (entrance, orb, exit) = (ids[0], ids[1], ids[2]);

        let escape = cavern
            .shortest_path(orb, exit)
            .and_then(|path| cavern.path_cost(&path))
            .ok_or(CavernError::NoPath { from: orb, to: exit })?;
        let budget = escape + escape * u64::from(self.config.budget_slack) / 100;
        let budget = u32::try_from(budget).unwrap_or(u32::MAX);

        debug!(
            "Generated {} nodes, {} edges, {} gold; escape {} of {} steps",
            cavern.len(),
            cavern.edge_count(),
            cavern.total_gold(),
            escape,
            budget
        );

        Ok(Level {
            seed: self.seed,
            cavern,
            entrance,
            orb,
            exit,
            budget,
        })
    }

    fn id_at(&self, position: Position) -> NodeId {
        NodeId((position.y * self.config.cols + position.x) as u32)
    }

    fn in_bounds(&self, position: &Position) -> bool {
        position.x >= 0
            && position.x < self.config.cols
            && position.y >= 0
            && position.y < self.config.rows
    }

    fn random_weight(&mut self) -> u32 {
        self.rng.random_range(1..=self.config.max_weight)
    }

    /// Randomised depth-first maze, so every node is reachable.
    fn carve_spanning_tree(&mut self, cavern: &mut Cavern) -> Result<(), CavernError> {
        let origin = Position::new(0, 0);
        let mut visited: HashSet<Position> = HashSet::from([origin]);
        let mut stack = vec![origin];

        while let Some(&current) = stack.last() {
            let options: Vec<Position> = current
                .neighbors()
                .into_iter()
                .filter(|p| self.in_bounds(p) && !visited.contains(p))
                .collect();

            if options.is_empty() {
                stack.pop();
                continue;
            }

            let next = options[self.rng.random_range(0..options.len())];
            let weight = self.random_weight();
            cavern.add_edge(self.id_at(current), self.id_at(next), weight)?;
            visited.insert(next);
            stack.push(next);
        }

        Ok(())
    }

    fn add_loops(&mut self, cavern: &mut Cavern) -> Result<(), CavernError> {
        for y in 0..self.config.rows {
            for x in 0..self.config.cols {
                let here = Position::new(x, y);
                for there in [Position::new(x + 1, y), Position::new(x, y + 1)] {
                    if !self.in_bounds(&there) {
                        continue;
                    }
                    let (a, b) = (self.id_at(here), self.id_at(there));
                    if cavern.edge_weight(a, b).is_some()
                        || !self.rng.random_ratio(self.config.loop_chance, 100)
                    {
                        continue;
                    }
                    let weight = self.random_weight();
                    cavern.add_edge(a, b, weight)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_level() {
        let config = GeneratorConfig::default();
        let a = LevelGenerator::new(config, Some(42)).generate().unwrap();
        let b = LevelGenerator::new(config, Some(42)).generate().unwrap();
        assert_eq!((a.entrance, a.orb, a.exit, a.budget), (b.entrance, b.orb, b.exit, b.budget));
        assert_eq!(a.cavern.edge_count(), b.cavern.edge_count());
        let gold_a: Vec<u32> = a.cavern.nodes().map(|n| n.gold()).collect();
        let gold_b: Vec<u32> = b.cavern.nodes().map(|n| n.gold()).collect();
        assert_eq!(gold_a, gold_b);
    }

    #[test]
    fn test_level_is_connected_with_distinct_landmarks() {
        let config = GeneratorConfig {
            rows: 5,
            cols: 7,
            ..GeneratorConfig::default()
        };
        for seed in 0..10 {
            let level = LevelGenerator::new(config, Some(seed)).generate().unwrap();
            assert_eq!(level.cavern.len(), 35);
            assert!(level.cavern.edge_count() >= 34);
            assert_ne!(level.entrance, level.orb);
            assert_ne!(level.orb, level.exit);
            assert_ne!(level.entrance, level.exit);
            for node in level.cavern.nodes() {
                assert!(level.cavern.shortest_path(level.entrance, node.id).is_some());
            }
        }
    }

    #[test]
    fn test_budget_covers_direct_escape() {
        let config = GeneratorConfig {
            budget_slack: 0,
            ..GeneratorConfig::default()
        };
        let level = LevelGenerator::new(config, Some(7)).generate().unwrap();
        let path = level.cavern.shortest_path(level.orb, level.exit).unwrap();
        assert_eq!(level.cavern.path_cost(&path), Some(u64::from(level.budget)));
    }

    #[test]
    fn test_huge_slack_is_clamped() {
        let config = GeneratorConfig {
            budget_slack: u32::MAX,
            ..GeneratorConfig::default()
        };
        let level = LevelGenerator::new(config, Some(7)).generate().unwrap();
        let path = level.cavern.shortest_path(level.orb, level.exit).unwrap();
        let escape = level.cavern.path_cost(&path).unwrap();
        let expected = escape + escape * u64::from(MAX_BUDGET_SLACK) / 100;
        assert_eq!(u64::from(level.budget), expected);
    }

    #[test]
    fn test_tiny_grid_is_clamped() {
        let config = GeneratorConfig {
            rows: 1,
            cols: 1,
            ..GeneratorConfig::default()
        };
        let level = LevelGenerator::new(config, Some(3)).generate().unwrap();
        assert_eq!(level.cavern.len(), 4);
    }
}
