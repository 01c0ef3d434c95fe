//! Command-line and environment configuration for the headless host.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use salon::consts::TICK_INTERVAL_MS;

#[derive(Parser, Debug, Clone)]
#[command(name = "nail-art-match", about = "Headless nail art matching game over JSON lines")]
pub struct Config {
    /// Level catalog (JSON array of tasks).
    #[arg(long, env = "NAIL_ART_CATALOG")]
    pub catalog: PathBuf,

    /// Directory holding the persisted queue, stats, and session snapshot.
    #[arg(long, env = "NAIL_ART_DATA_DIR", default_value = ".nail-art")]
    pub data_dir: PathBuf,

    /// Timer tick period in milliseconds.
    #[arg(
        long,
        env = "NAIL_ART_TICK_MS",
        default_value_t = TICK_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub tick_ms: u64,

    /// Ignore the stored session snapshot; queue and stats still load.
    #[arg(long)]
    pub fresh: bool,
}

impl Config {
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
