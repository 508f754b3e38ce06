use std::collections::HashSet;

use uuid::Uuid;

use nova_domain::{Profile, Session, Transaction};

use crate::CoreError;

/// Persistence for profiles and the signed-in session marker.
pub trait ProfileStore: Send + Sync {
    fn load_profiles(&self) -> Result<Vec<Profile>, CoreError>;
    /// Inserts the profile, or replaces the stored profile with the same uid.
    fn save_profile(&self, profile: &Profile) -> Result<(), CoreError>;
    fn load_session(&self) -> Result<Option<Session>, CoreError>;
    /// Writes the session marker; `None` clears it.
    fn save_session(&self, session: Option<&Session>) -> Result<(), CoreError>;
}

/// Persistence for an owner's transaction collection.
///
/// Reads return every transaction for the owner. Callers must not rely on the order.
pub trait TransactionStore: Send + Sync {
    fn load_transactions(&self, owner: Uuid) -> Result<Vec<Transaction>, CoreError>;
    fn insert_transaction(&self, owner: Uuid, transaction: &Transaction) -> Result<(), CoreError>;
    /// Replaces the stored transaction with the same id. Returns `false` when none exists.
    fn replace_transaction(&self, owner: Uuid, transaction: &Transaction)
        -> Result<bool, CoreError>;
    /// Removes the transaction. Returns `false` when none exists.
    fn delete_transaction(&self, owner: Uuid, id: Uuid) -> Result<bool, CoreError>;
}

/// Detects anomalies in a loaded collection that ingestion should have prevented.
pub fn collection_warnings(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut warnings = Vec::new();

    for txn in transactions {
        if !seen.insert(txn.id) {
            warnings.push(format!("transaction {} appears more than once", txn.id));
        }
        if let Err(err) = txn.validate() {
            warnings.push(format!("transaction {} is invalid: {}", txn.id, err));
        }
    }
    warnings
}
