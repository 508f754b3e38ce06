#![allow(dead_code)]

use std::{
    path::{Path, PathBuf},
    sync::Mutex,
};

use assert_cmd::{assert::Assert, Command};
use nova_config::ConfigManager;
use nova_storage_json::JsonStore;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// A fresh directory that outlives the test that asked for it.
pub fn temp_home() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

/// Store and config manager laid out the way the shell lays them out under `base`.
pub fn setup_test_env(base: &Path) -> (JsonStore, ConfigManager) {
    let store = JsonStore::new(base.join("data")).expect("create json store");
    let config_manager = ConfigManager::with_base_dir(base).expect("create config manager");
    (store, config_manager)
}

/// Runs the shell in script mode against `home` with the clock pinned to `now`.
pub fn run_script(home: &Path, now: &str, input: &str) -> Assert {
    Command::cargo_bin("nova_ledger_cli")
        .expect("binary built")
        .env("NOVA_LEDGER_CLI_SCRIPT", "1")
        .env("NOVA_LEDGER_HOME", home)
        .env("NOVA_LEDGER_NOW", now)
        .env("NO_COLOR", "1")
        .write_stdin(input.to_string())
        .assert()
}
