use chrono::{DateTime, Utc};

use nova_domain::{FilterRange, Transaction};

use crate::aggregate::{
    category_breakdown, filter_transactions, monthly_trend, summarize, CategoryTotal, MonthBucket,
    SummaryStats,
};

/// Selected range and free-text search applied to the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardQuery {
    pub range: FilterRange,
    pub search: String,
}

impl DashboardQuery {
    pub fn new(range: FilterRange) -> Self {
        Self {
            range,
            search: String::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }
}

/// Everything the dashboard renders, derived from one snapshot of the collection.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Filtered transactions, newest first.
    pub transactions: Vec<Transaction>,
    pub stats: SummaryStats,
    pub breakdown: Vec<CategoryTotal>,
    /// Six-month trend over the unfiltered collection.
    pub trend: Vec<MonthBucket>,
}

impl DashboardView {
    pub fn compute(transactions: &[Transaction], query: &DashboardQuery, now: DateTime<Utc>) -> Self {
        let mut filtered = filter_transactions(transactions, query.range, &query.search, now);
        filtered.sort_by(|a, b| b.date.cmp(&a.date).then(b.created_at.cmp(&a.created_at)));

        Self {
            stats: summarize(filtered.iter().copied()),
            breakdown: category_breakdown(filtered.iter().copied()),
            trend: monthly_trend(transactions, now),
            transactions: filtered.into_iter().cloned().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
