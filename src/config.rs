use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HISTORY_FILE: &str = "bank_history.txt";
pub const DEFAULT_PAUSE: Duration = Duration::from_secs(2);

/// Session settings. Every field has a fixed default; nothing is read from
/// the command line or the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the transaction history is appended.
    pub history_path: PathBuf,
    /// How long deposit and withdrawal outcomes stay on screen.
    pub pause: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_path: PathBuf::from(DEFAULT_HISTORY_FILE),
            pause: DEFAULT_PAUSE,
        }
    }
}
