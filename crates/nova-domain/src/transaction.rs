//! Domain models for recorded income and expense transactions.

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{category::Category, common::*};

pub const DEFAULT_ACCOUNT_NAME: &str = "Personal";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub description: String,
    pub category: Category,
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default = "Transaction::default_account_name")]
    pub account_name: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        category: Category,
        date: NaiveDate,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            description: description.into(),
            category,
            date,
            kind,
            account_name: DEFAULT_ACCOUNT_NAME.to_string(),
            created_at,
        }
    }

    pub fn with_account(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = account_name.into();
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Replaces every editable field with the draft's values.
    ///
    /// `id`, `date` and `created_at` are kept: an edit never moves a transaction in time.
    pub fn apply(&mut self, draft: TransactionDraft) {
        self.amount = draft.amount;
        self.description = draft.description;
        self.category = draft.category;
        self.kind = draft.kind;
        self.account_name = draft.account_name;
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.description)
    }

    fn default_account_name() -> String {
        DEFAULT_ACCOUNT_NAME.to_string()
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        let sign = match self.kind {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        };
        format!(
            "{} {} [{}] {}{:.2}",
            self.date, self.description, self.category, sign, self.amount
        )
    }
}

/// Editable fields of a transaction, as captured by a form or command.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub amount: f64,
    pub description: String,
    pub category: Category,
    pub kind: TransactionKind,
    pub account_name: String,
}

impl TransactionDraft {
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        description: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            amount,
            description: description.into(),
            category,
            kind,
            account_name: DEFAULT_ACCOUNT_NAME.to_string(),
        }
    }

    pub fn with_account(mut self, account_name: impl Into<String>) -> Self {
        self.account_name = account_name.into();
        self
    }

    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        validate_fields(self.amount, &self.description)
    }

    pub fn into_transaction(self, date: NaiveDate, created_at: DateTime<Utc>) -> Transaction {
        Transaction::new(
            self.kind,
            self.amount,
            self.description,
            self.category,
            date,
            created_at,
        )
        .with_account(self.account_name)
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(txn: &Transaction) -> Self {
        Self {
            amount: txn.amount,
            description: txn.description.clone(),
            category: txn.category,
            kind: txn.kind,
            account_name: txn.account_name.clone(),
        }
    }
}

fn validate_fields(amount: f64, description: &str) -> Result<(), TransactionValidationError> {
    if !amount.is_finite() {
        return Err(TransactionValidationError::NonFiniteAmount);
    }
    if amount < 0.0 {
        return Err(TransactionValidationError::NegativeAmount(amount));
    }
    if description.trim().is_empty() {
        return Err(TransactionValidationError::EmptyDescription);
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
/// Direction of money flow.
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.write_str(label)
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" | "in" => Ok(TransactionKind::Income),
            "expense" | "out" => Ok(TransactionKind::Expense),
            other => Err(format!("unknown transaction type `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionValidationError {
    NegativeAmount(f64),
    NonFiniteAmount,
    EmptyDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionValidationError::NegativeAmount(amount) => {
                write!(f, "amount must not be negative (got {amount})")
            }
            TransactionValidationError::NonFiniteAmount => f.write_str("amount must be a number"),
            TransactionValidationError::EmptyDescription => {
                f.write_str("description must not be empty")
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Transaction {
        Transaction::new(
            TransactionKind::Expense,
            15.99,
            "Netflix",
            Category::Entertainment,
            NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn apply_preserves_identity_and_dates() {
        let mut txn = sample();
        let original = txn.clone();
        let draft = TransactionDraft::new(
            TransactionKind::Income,
            20.0,
            "Refund",
            Category::Personal,
        )
        .with_account("Business");

        txn.apply(draft);

        assert_eq!(txn.id, original.id);
        assert_eq!(txn.date, original.date);
        assert_eq!(txn.created_at, original.created_at);
        assert_eq!(txn.kind, TransactionKind::Income);
        assert_eq!(txn.account_name, "Business");
        assert_eq!(txn.description, "Refund");
    }

    #[test]
    fn validate_rejects_bad_amounts_and_blank_descriptions() {
        let mut txn = sample();
        txn.amount = -1.0;
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(-1.0))
        );
        txn.amount = f64::NAN;
        assert_eq!(txn.validate(), Err(TransactionValidationError::NonFiniteAmount));
        txn.amount = 0.0;
        txn.description = "   ".into();
        assert_eq!(txn.validate(), Err(TransactionValidationError::EmptyDescription));
    }

    #[test]
    fn serde_uses_type_field_and_defaults_account() {
        let txn = sample();
        let json = serde_json::to_value(&txn).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["date"], "2025-03-01");

        let mut object = json.as_object().cloned().unwrap();
        object.remove("account_name");
        let restored: Transaction = serde_json::from_value(object.into()).unwrap();
        assert_eq!(restored.account_name, DEFAULT_ACCOUNT_NAME);
    }

    #[test]
    fn unparsable_dates_fail_deserialization() {
        let txn = sample();
        let mut json = serde_json::to_value(&txn).unwrap();
        json["date"] = "not-a-date".into();
        assert!(serde_json::from_value::<Transaction>(json).is_err());
    }
}
