//! nova-config
//!
//! Persistent user preferences: display defaults and prediction thresholds.
//! Owns the Config data structure plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::{BackupInfo, ConfigManager, MAX_BACKUPS};
pub use model::{Config, PredictionSettings};
