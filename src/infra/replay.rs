use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use time::{OffsetDateTime, format_description};
use tracing::warn;

use crate::game::RunOutcome;
use crate::infra::{CavernObserver, NodeId, Phase};

/// Plain-text replay of a run, one event per line.
pub struct ReplayFile {
    path: PathBuf,
    file: File,
}

impl ReplayFile {
    pub fn new(replays_folder: &str, seed: Option<u64>) -> Result<Self, io::Error> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let format = format_description::parse("[year][month][day]-[hour][minute][second]")
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
        let date_time_str = now
            .format(&format)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let seed_str = seed.map_or_else(|| "unseeded".to_string(), |s| s.to_string());

        let path = Path::new(replays_folder)
            .join(format!("orbhunt - {} - {}.replay", date_time_str, seed_str));

        if let Some(parent) = path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        Ok(ReplayFile { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn append(&mut self, line: &str) -> io::Result<()> {
        writeln!(self.file, "{}", line)?;
        self.file.flush()
    }
}

/// Observer that writes every event to a [`ReplayFile`].
pub struct ReplayObserver {
    replay_file: ReplayFile,
}

impl ReplayObserver {
    pub fn new(replay_file: ReplayFile) -> Self {
        Self { replay_file }
    }

    fn record(&mut self, line: String) {
        if let Err(e) = self.replay_file.append(&line) {
            warn!("Failed to write replay {}: {}", self.replay_file.path().display(), e);
        }
    }
}

impl CavernObserver for ReplayObserver {
    fn on_level_start(&mut self, seed: Option<u64>, node_count: usize, budget: u32) {
        let seed_str = seed.map_or_else(|| "-".to_string(), |s| s.to_string());
        self.record(format!("level seed={} nodes={} budget={}", seed_str, node_count, budget));
    }

    fn on_phase_start(&mut self, phase: Phase, start: NodeId) {
        self.record(format!("start {} at={}", phase.as_str_name(), start.0));
    }

    fn on_move(&mut self, phase: Phase, from: NodeId, to: NodeId, weight: u32) {
        self.record(format!(
            "move {} from={} to={} weight={}",
            phase.as_str_name(),
            from.0,
            to.0,
            weight
        ));
    }

    fn on_gold_collected(&mut self, at: NodeId, amount: u32, steps_remaining: u32) {
        self.record(format!("gold at={} amount={} remaining={}", at.0, amount, steps_remaining));
    }

    fn on_phase_finished(&mut self, phase: Phase, success: bool, steps: u32) {
        self.record(format!("finish {} success={} steps={}", phase.as_str_name(), success, steps));
    }

    fn on_game_finished(&mut self, outcome: &RunOutcome) {
        self.record(format!(
            "outcome orb_found={} hunt_steps={} gold={} remaining={} escaped={}",
            outcome.orb_found,
            outcome.hunt_steps,
            outcome.gold_collected,
            outcome.steps_remaining,
            outcome.escaped
        ));
    }
}
