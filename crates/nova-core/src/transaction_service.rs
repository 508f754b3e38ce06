//! Validated create/update/delete helpers for an owner's transactions.

use tracing::{info, warn};
use uuid::Uuid;

use nova_domain::{Transaction, TransactionDraft};

use crate::{
    storage::{collection_warnings, TransactionStore},
    time::Clock,
    CoreError,
};

pub struct TransactionService;

impl TransactionService {
    /// Records a new transaction dated today and returns it.
    pub fn create(
        store: &dyn TransactionStore,
        clock: &dyn Clock,
        owner: Uuid,
        draft: TransactionDraft,
    ) -> Result<Transaction, CoreError> {
        draft.validate()?;
        let transaction = draft.into_transaction(clock.today(), clock.now());
        store.insert_transaction(owner, &transaction)?;
        info!(
            owner = %owner,
            id = %transaction.id,
            kind = %transaction.kind,
            amount = transaction.amount,
            "transaction created"
        );
        Ok(transaction)
    }

    /// Replaces the editable fields of an existing transaction. Its date is kept.
    pub fn update(
        store: &dyn TransactionStore,
        owner: Uuid,
        id: Uuid,
        draft: TransactionDraft,
    ) -> Result<Transaction, CoreError> {
        draft.validate()?;
        let mut transaction = Self::find(store, owner, id)?;
        transaction.apply(draft);
        if !store.replace_transaction(owner, &transaction)? {
            return Err(CoreError::TransactionNotFound(id));
        }
        info!(owner = %owner, id = %id, "transaction updated");
        Ok(transaction)
    }

    pub fn delete(store: &dyn TransactionStore, owner: Uuid, id: Uuid) -> Result<(), CoreError> {
        if !store.delete_transaction(owner, id)? {
            return Err(CoreError::TransactionNotFound(id));
        }
        info!(owner = %owner, id = %id, "transaction deleted");
        Ok(())
    }

    /// Loads the owner's collection, newest first.
    pub fn list(store: &dyn TransactionStore, owner: Uuid) -> Result<Vec<Transaction>, CoreError> {
        let mut transactions = store.load_transactions(owner)?;
        for warning in collection_warnings(&transactions) {
            warn!(owner = %owner, "{warning}");
        }
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));
        Ok(transactions)
    }

    pub fn find(
        store: &dyn TransactionStore,
        owner: Uuid,
        id: Uuid,
    ) -> Result<Transaction, CoreError> {
        store
            .load_transactions(owner)?
            .into_iter()
            .find(|txn| txn.id == id)
            .ok_or(CoreError::TransactionNotFound(id))
    }
}
