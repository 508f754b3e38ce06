use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An imminent recurring bill inferred from transaction history.
///
/// Recomputed from scratch whenever the transaction collection changes; never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Prediction {
    /// Description of the most recent occurrence, in its original casing.
    pub description: String,
    pub predicted_date: NaiveDate,
    pub days_remaining: i64,
    /// Mean amount across every occurrence in the matching group.
    pub avg_amount: f64,
}

impl Prediction {
    pub fn is_due_today(&self) -> bool {
        self.days_remaining == 0
    }
}
