//! Filesystem JSON store for profiles, the session marker and per-profile
//! transaction collections.
//!
//! Layout under the data root:
//!
//! ```text
//! profiles.json
//! session.json
//! transactions/<profile uid>.json
//! ```

use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Mutex,
};

use nova_core::{CoreError, ProfileStore, TransactionStore};
use nova_domain::{Profile, Session, Transaction};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

const PROFILES_FILE: &str = "profiles.json";
const SESSION_FILE: &str = "session.json";
const TRANSACTIONS_DIR: &str = "transactions";
const JSON_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// JSON-backed implementation of both storage traits.
///
/// Writes go to a temporary sibling first and are renamed into place. A mutex
/// serializes read-modify-write cycles within one process.
pub struct JsonStore {
    root: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonStore {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(TRANSACTIONS_DIR))?;
        Ok(Self {
            root,
            write_lock: Mutex::new(()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.root.join(PROFILES_FILE)
    }

    pub fn session_path(&self) -> PathBuf {
        self.root.join(SESSION_FILE)
    }

    pub fn transactions_path(&self, owner: Uuid) -> PathBuf {
        self.root
            .join(TRANSACTIONS_DIR)
            .join(format!("{owner}.{JSON_EXTENSION}"))
    }

    fn modify_transactions<F, R>(&self, owner: Uuid, mutator: F) -> Result<R, CoreError>
    where
        F: FnOnce(&mut Vec<Transaction>) -> R,
    {
        let _guard = self.lock()?;
        let path = self.transactions_path(owner);
        let mut transactions: Vec<Transaction> = read_json(&path)?.unwrap_or_default();
        let result = mutator(&mut transactions);
        write_json(&path, &transactions)?;
        Ok(result)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, ()>, CoreError> {
        self.write_lock
            .lock()
            .map_err(|_| CoreError::Storage("store lock poisoned".into()))
    }
}

impl ProfileStore for JsonStore {
    fn load_profiles(&self) -> Result<Vec<Profile>, CoreError> {
        Ok(read_json(&self.profiles_path())?.unwrap_or_default())
    }

    fn save_profile(&self, profile: &Profile) -> Result<(), CoreError> {
        let _guard = self.lock()?;
        let path = self.profiles_path();
        let mut profiles: Vec<Profile> = read_json(&path)?.unwrap_or_default();
        match profiles.iter_mut().find(|existing| existing.uid == profile.uid) {
            Some(existing) => *existing = profile.clone(),
            None => profiles.push(profile.clone()),
        }
        write_json(&path, &profiles)
    }

    /// An unreadable session file is treated as signed out rather than an error.
    fn load_session(&self) -> Result<Option<Session>, CoreError> {
        let path = self.session_path();
        match read_json::<Session>(&path) {
            Ok(session) => Ok(session),
            Err(CoreError::Serde(err)) => {
                warn!(path = %path.display(), error = %err, "ignoring unreadable session file");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    fn save_session(&self, session: Option<&Session>) -> Result<(), CoreError> {
        let _guard = self.lock()?;
        let path = self.session_path();
        match session {
            Some(session) => write_json(&path, session),
            None => match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
                Err(err) => Err(err.into()),
            },
        }
    }
}

impl TransactionStore for JsonStore {
    /// Returns the owner's transactions sorted by date, newest first.
    fn load_transactions(&self, owner: Uuid) -> Result<Vec<Transaction>, CoreError> {
        let mut transactions: Vec<Transaction> =
            read_json(&self.transactions_path(owner))?.unwrap_or_default();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        debug!(owner = %owner, count = transactions.len(), "loaded transactions");
        Ok(transactions)
    }

    fn insert_transaction(&self, owner: Uuid, transaction: &Transaction) -> Result<(), CoreError> {
        self.modify_transactions(owner, |transactions| {
            transactions.insert(0, transaction.clone());
        })
    }

    fn replace_transaction(
        &self,
        owner: Uuid,
        transaction: &Transaction,
    ) -> Result<bool, CoreError> {
        self.modify_transactions(owner, |transactions| {
            match transactions.iter_mut().find(|txn| txn.id == transaction.id) {
                Some(existing) => {
                    *existing = transaction.clone();
                    true
                }
                None => false,
            }
        })
    }

    fn delete_transaction(&self, owner: Uuid, id: Uuid) -> Result<bool, CoreError> {
        self.modify_transactions(owner, |transactions| {
            let before = transactions.len();
            transactions.retain(|txn| txn.id != id);
            transactions.len() != before
        })
    }
}

/// Writes `data` to `path` through a temporary sibling file and a rename.
pub fn write_text_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    let mut file = File::create(&tmp)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CoreError> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(err.into()),
    };
    serde_json::from_str(&data)
        .map(Some)
        .map_err(|err| CoreError::Serde(format!("{}: {err}", path.display())))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CoreError> {
    let data =
        serde_json::to_string_pretty(value).map_err(|err| CoreError::Serde(err.to_string()))?;
    write_text_atomic(path, &data)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
