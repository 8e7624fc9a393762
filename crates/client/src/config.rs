//! Client configuration loaded from the environment.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Which decision oracle drives the processor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OracleKind {
    /// Ollama-compatible model server.
    #[default]
    Ollama,
    /// Local fixed rules, no network.
    Heuristic,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Upper bound on how long the demo runs.
    pub run_duration: Duration,
    /// How often the active threat is reported.
    pub monitor_interval: Duration,
    /// Directory for the log file; stderr only when unset.
    pub log_dir: Option<PathBuf>,
    pub oracle: OracleKind,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            run_duration: Duration::from_secs(30),
            monitor_interval: Duration::from_millis(1000),
            log_dir: None,
            oracle: OracleKind::default(),
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `T800_RUN_SECONDS` - Demo duration in seconds (default: 30)
    /// - `T800_MONITOR_INTERVAL_MS` - Status report period (default: 1000)
    /// - `T800_LOG_DIR` - Write logs to `<dir>/t800.log` as well as stderr
    /// - `T800_ORACLE` - `ollama` or `heuristic` (default: ollama)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(secs) = read_env::<u64>("T800_RUN_SECONDS") {
            config.run_duration = Duration::from_secs(secs.max(1));
        }

        if let Some(ms) = read_env::<u64>("T800_MONITOR_INTERVAL_MS") {
            config.monitor_interval = Duration::from_millis(ms.max(10));
        }

        if let Ok(dir) = env::var("T800_LOG_DIR")
            && !dir.trim().is_empty()
        {
            config.log_dir = Some(PathBuf::from(dir));
        }

        if let Some(oracle) = read_env::<OracleKind>("T800_ORACLE") {
            config.oracle = oracle;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.trim().parse().ok()
}
