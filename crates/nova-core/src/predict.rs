//! Recurring-bill detection.
//!
//! Expenses are grouped by normalized description. A group whose two most recent
//! occurrences sit roughly one month apart is treated as a monthly bill, and its
//! next occurrence is projected one calendar month after the latest one. Only the
//! most imminent projected bill is reported.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use nova_domain::{add_months, start_of_day_utc, MonthOverflow, Prediction, Transaction};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Thresholds that decide whether a description group counts as a monthly bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionPolicy {
    /// Minimum size of the whole collection, income included, before any prediction is attempted.
    pub min_transactions: usize,
    pub min_group_size: usize,
    pub min_gap_days: i64,
    pub max_gap_days: i64,
    /// Largest number of days ahead a bill may be to still be reported.
    pub horizon_days: i64,
    pub month_overflow: MonthOverflow,
}

impl PredictionPolicy {
    pub const MONTHLY_BILL: PredictionPolicy = PredictionPolicy {
        min_transactions: 5,
        min_group_size: 2,
        min_gap_days: 25,
        max_gap_days: 35,
        horizon_days: 5,
        month_overflow: MonthOverflow::Clamp,
    };

    fn is_monthly_gap(&self, gap_days: i64) -> bool {
        (self.min_gap_days..=self.max_gap_days).contains(&gap_days)
    }

    fn is_within_horizon(&self, days_until: i64) -> bool {
        (0..=self.horizon_days).contains(&days_until)
    }
}

impl Default for PredictionPolicy {
    fn default() -> Self {
        Self::MONTHLY_BILL
    }
}

/// Predicts the most imminent recurring bill using [`PredictionPolicy::MONTHLY_BILL`].
pub fn predict(transactions: &[Transaction], now: DateTime<Utc>) -> Option<Prediction> {
    predict_with_policy(transactions, now, &PredictionPolicy::MONTHLY_BILL)
}

pub fn predict_with_policy(
    transactions: &[Transaction],
    now: DateTime<Utc>,
    policy: &PredictionPolicy,
) -> Option<Prediction> {
    if transactions.len() < policy.min_transactions {
        debug!(
            count = transactions.len(),
            required = policy.min_transactions,
            "not enough transactions for a prediction"
        );
        return None;
    }

    // min_by_key keeps the first of equal keys, so ties go to the earliest group.
    let winner = group_expenses(transactions)
        .into_iter()
        .filter_map(|group| evaluate_group(group, now, policy))
        .min_by_key(|prediction| prediction.days_remaining);

    if let Some(prediction) = &winner {
        debug!(
            description = %prediction.description,
            predicted_date = %prediction.predicted_date,
            days_remaining = prediction.days_remaining,
            "recurring bill predicted"
        );
    }
    winner
}

/// Normalized grouping key: trimmed and lower-cased description.
pub fn group_key(description: &str) -> String {
    description.trim().to_lowercase()
}

/// Expense groups in the order their key is first encountered.
fn group_expenses(transactions: &[Transaction]) -> Vec<Vec<&Transaction>> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<Vec<&Transaction>> = Vec::new();

    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        let slot = *index.entry(group_key(&txn.description)).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(txn);
    }
    groups
}

fn evaluate_group(
    mut group: Vec<&Transaction>,
    now: DateTime<Utc>,
    policy: &PredictionPolicy,
) -> Option<Prediction> {
    if group.len() < policy.min_group_size.max(2) {
        return None;
    }
    group.sort_by(|a, b| b.date.cmp(&a.date));
    let (last, prev) = (group[0], group[1]);

    let gap_days = (last.date - prev.date).num_days();
    if !policy.is_monthly_gap(gap_days) {
        return None;
    }

    let predicted_date = add_months(last.date, 1, policy.month_overflow)?;
    let days_remaining = days_until(start_of_day_utc(predicted_date), now);
    if !policy.is_within_horizon(days_remaining) {
        return None;
    }

    let total: f64 = group.iter().map(|txn| txn.amount).sum();
    Some(Prediction {
        description: last.description.clone(),
        predicted_date,
        days_remaining,
        avg_amount: total / group.len() as f64,
    })
}

/// Whole days from `now` until `target`, rounded up.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let millis = (target - now).num_milliseconds();
    -(-millis).div_euclid(MILLIS_PER_DAY)
}
