use chrono::{Duration, TimeZone, Utc};
use nova_config::{Config, ConfigError, ConfigManager, PredictionSettings, MAX_BACKUPS};
use nova_core::PredictionPolicy;
use nova_domain::{CurrencyCode, FilterRange, MonthOverflow};
use std::fs;
use tempfile::tempdir;

#[test]
fn default_config_matches_monthly_bill_policy() {
    let cfg = Config::default();

    assert_eq!(cfg.currency, CurrencyCode::USD);
    assert_eq!(cfg.default_range, FilterRange::Month);
    assert!(cfg.ui_color_enabled);
    assert_eq!(cfg.prediction.policy(), PredictionPolicy::MONTHLY_BILL);
    assert!(cfg.validate().is_ok());
}

#[test]
fn missing_config_file_loads_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");

    assert_eq!(manager.load().expect("load"), Config::default());
    assert_eq!(
        manager.config_path(),
        dir.path().join("config").join("config.json")
    );
    assert!(manager.backups_dir().is_dir());
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("config.json"), dir.path().join("backups"));

    let mut cfg = Config::default();
    cfg.currency = CurrencyCode::INR;
    cfg.default_range = FilterRange::Week;
    cfg.prediction.month_overflow = MonthOverflow::Roll;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert_eq!(loaded.prediction.policy().month_overflow, MonthOverflow::Roll);
}

#[test]
fn partial_files_fall_back_to_field_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");
    fs::write(
        manager.config_path(),
        r#"{ "currency": "EUR", "prediction": { "horizon_days": 3 } }"#,
    )
    .expect("write config");

    let loaded = manager.load().expect("load");
    assert_eq!(loaded.currency, CurrencyCode::EUR);
    assert_eq!(loaded.prediction.horizon_days, 3);
    assert_eq!(loaded.prediction.min_gap_days, 25);
    assert!(loaded.ui_color_enabled);
}

#[test]
fn inverted_gap_window_is_rejected() {
    let settings = PredictionSettings {
        min_gap_days: 40,
        max_gap_days: 30,
        ..PredictionSettings::default()
    };
    let err = settings.validate().expect_err("must reject");
    assert!(matches!(err, ConfigError::Invalid(_)), "unexpected error: {err:?}");

    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");
    let cfg = Config {
        prediction: settings,
        ..Config::default()
    };
    assert!(manager.save(&cfg).is_err());
    assert!(!manager.config_path().exists());
}

#[test]
fn backups_can_be_listed_and_restored() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");

    let original = Config {
        currency: CurrencyCode::GBP,
        ..Config::default()
    };
    let at = Utc.with_ymd_and_hms(2025, 3, 1, 10, 15, 0).unwrap();
    let saved = manager
        .backup(&original, Some("before travel"), at)
        .expect("backup");
    assert_eq!(saved.file_name, "config_20250301_101500_before-travel.json");
    assert_eq!(saved.note.as_deref(), Some("before-travel"));
    assert_eq!(manager.list_backups().expect("list"), vec![saved.clone()]);
    let name = saved.file_name;

    manager
        .save(&Config {
            currency: CurrencyCode::JPY,
            ..Config::default()
        })
        .expect("save");
    let restored = manager.restore(&name).expect("restore");
    assert_eq!(restored.currency, CurrencyCode::GBP);
    assert_eq!(manager.load().expect("load").currency, CurrencyCode::GBP);

    assert!(matches!(
        manager.restore("config_20000101_000000.json"),
        Err(ConfigError::BackupNotFound(_))
    ));
    assert!(matches!(
        manager.restore("../config.json"),
        Err(ConfigError::BackupNotFound(_))
    ));
}

#[test]
fn backups_are_pruned_oldest_first() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");
    let start = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();

    for day in 0..(MAX_BACKUPS as i64 + 2) {
        manager
            .backup(&Config::default(), None, start + Duration::days(day))
            .expect("backup");
    }

    let backups = manager.list_backups().expect("list");
    assert_eq!(backups.len(), MAX_BACKUPS);
    assert_eq!(
        backups[0].created_at,
        Some(start + Duration::days(MAX_BACKUPS as i64 + 1))
    );
    assert_eq!(
        backups.last().and_then(|b| b.created_at),
        Some(start + Duration::days(2))
    );
}
