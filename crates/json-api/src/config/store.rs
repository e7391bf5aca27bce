//! Store Config

use std::{path::PathBuf, time::Duration};

use clap::Args;

/// Catalog fixture and session lifetime settings.
#[derive(Debug, Args)]
pub struct StoreConfig {
    /// YAML fixture holding the catalog and users
    #[arg(long, env = "FIXTURE_PATH", default_value = "./fixtures/bookstore.yml")]
    pub fixture_path: PathBuf,

    /// Seconds a session may sit unused before it is discarded
    #[arg(long, env = "SESSION_IDLE_TIMEOUT_SECS", default_value_t = 1_800_u64)]
    pub session_idle_timeout_secs: u64,

    /// Seconds between sweeps for idle sessions
    #[arg(
        long,
        env = "SESSION_PURGE_INTERVAL_SECS",
        default_value_t = 60_u64,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub session_purge_interval_secs: u64,
}

impl StoreConfig {
    /// Idle timeout as a duration.
    #[must_use]
    pub fn session_idle_timeout(&self) -> Duration {
        Duration::from_secs(self.session_idle_timeout_secs)
    }

    /// Purge interval as a duration.
    #[must_use]
    pub fn session_purge_interval(&self) -> Duration {
        Duration::from_secs(self.session_purge_interval_secs)
    }
}
