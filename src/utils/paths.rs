use dirs::home_dir;
use std::{env, path::PathBuf};

pub const HOME_ENV: &str = "NOVA_LEDGER_HOME";
const DEFAULT_DIR_NAME: &str = ".nova_ledger";
const DATA_DIR: &str = "data";
const HISTORY_FILE: &str = "history.txt";

/// Returns the application data directory, defaulting to `~/.nova_ledger`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV) {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Root of the JSON store (profiles, session, transactions).
pub fn data_dir() -> PathBuf {
    app_data_dir().join(DATA_DIR)
}

/// Line-editor history for interactive sessions.
pub fn history_file() -> PathBuf {
    app_data_dir().join(HISTORY_FILE)
}
