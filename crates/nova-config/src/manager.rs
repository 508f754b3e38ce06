use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::{Config, ConfigError};

const CONFIG_FILE: &str = "config.json";
const BACKUP_PREFIX: &str = "config_";
const BACKUP_EXTENSION: &str = "json";
const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const STAMP_LEN: usize = 15;

/// Oldest backups beyond this count are pruned after each new backup.
pub const MAX_BACKUPS: usize = 10;

/// One saved snapshot of the preferences file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub file_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub note: Option<String>,
}

impl BackupInfo {
    fn from_file_name(file_name: &str) -> Option<Self> {
        let stem = file_name
            .strip_prefix(BACKUP_PREFIX)?
            .strip_suffix(BACKUP_EXTENSION)?
            .strip_suffix('.')?;
        let created_at = stem
            .get(..STAMP_LEN)
            .and_then(|stamp| NaiveDateTime::parse_from_str(stamp, STAMP_FORMAT).ok())
            .map(|naive| naive.and_utc());
        let note = stem
            .get(STAMP_LEN..)
            .and_then(|rest| rest.strip_prefix('_'))
            .filter(|rest| !rest.is_empty())
            .map(str::to_string);
        Some(Self {
            file_name: file_name.to_string(),
            created_at,
            note,
        })
    }
}

/// Loads, saves and snapshots [`Config`] on disk.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: PathBuf,
    backups_dir: PathBuf,
}

impl ConfigManager {
    pub fn new(config_path: PathBuf, backups_dir: PathBuf) -> Self {
        Self {
            config_path,
            backups_dir,
        }
    }

    /// Lays out `base/config/config.json` with backups under `base/config/backups`.
    pub fn with_base_dir(base: &Path) -> Result<Self, ConfigError> {
        let config_dir = base.join("config");
        let backups_dir = config_dir.join("backups");
        fs::create_dir_all(&backups_dir)?;
        Ok(Self::new(config_dir.join(CONFIG_FILE), backups_dir))
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn backups_dir(&self) -> &Path {
        &self.backups_dir
    }

    /// Reads the stored config, or the defaults when none has been saved yet.
    pub fn load(&self) -> Result<Config, ConfigError> {
        if !self.config_path.exists() {
            return Ok(Config::default());
        }
        let config = decode(&fs::read_to_string(&self.config_path)?)?;
        config.validate()?;
        Ok(config)
    }

    /// Validates, then replaces the config file through a sibling temp file.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        config.validate()?;
        replace_file(&self.config_path, &encode(config)?)
    }

    /// Snapshots `config` stamped with `at`, then prunes past [`MAX_BACKUPS`].
    pub fn backup(
        &self,
        config: &Config,
        note: Option<&str>,
        at: DateTime<Utc>,
    ) -> Result<BackupInfo, ConfigError> {
        let slug = note.and_then(slugify);
        let mut file_name = format!("{BACKUP_PREFIX}{}", at.format(STAMP_FORMAT));
        if let Some(slug) = &slug {
            file_name.push('_');
            file_name.push_str(slug);
        }
        file_name.push('.');
        file_name.push_str(BACKUP_EXTENSION);

        replace_file(&self.backups_dir.join(&file_name), &encode(config)?)?;
        self.prune()?;
        Ok(BackupInfo {
            file_name,
            created_at: Some(at),
            note: slug,
        })
    }

    /// Backups newest first; files without a readable stamp sort last.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>, ConfigError> {
        if !self.backups_dir.exists() {
            return Ok(Vec::new());
        }
        let mut backups = Vec::new();
        for entry in fs::read_dir(&self.backups_dir)? {
            let entry = entry?;
            if let Some(info) = entry.file_name().to_str().and_then(BackupInfo::from_file_name) {
                backups.push(info);
            }
        }
        backups.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.file_name.cmp(&a.file_name))
        });
        Ok(backups)
    }

    /// Makes the named backup the active config.
    pub fn restore(&self, file_name: &str) -> Result<Config, ConfigError> {
        let path = self.backups_dir.join(file_name);
        if BackupInfo::from_file_name(file_name).is_none() || !path.is_file() {
            return Err(ConfigError::BackupNotFound(file_name.to_string()));
        }
        let config = decode(&fs::read_to_string(&path)?)?;
        self.save(&config)?;
        Ok(config)
    }

    fn prune(&self) -> Result<(), ConfigError> {
        for stale in self.list_backups()?.into_iter().skip(MAX_BACKUPS) {
            fs::remove_file(self.backups_dir.join(&stale.file_name))?;
        }
        Ok(())
    }
}

fn decode(data: &str) -> Result<Config, ConfigError> {
    serde_json::from_str(data).map_err(|err| ConfigError::Serde(err.to_string()))
}

fn encode(config: &Config) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(config).map_err(|err| ConfigError::Serde(err.to_string()))
}

/// Lowercase ASCII words joined by `-`; `None` when nothing usable remains.
fn slugify(note: &str) -> Option<String> {
    let words: Vec<String> = note
        .split(|ch: char| !ch.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_ascii_lowercase)
        .collect();
    (!words.is_empty()).then(|| words.join("-"))
}

fn replace_file(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = path.with_extension(format!("{BACKUP_EXTENSION}.tmp"));
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
