//! Range/text filters and summary rollups over a transaction collection.

use chrono::{DateTime, Datelike, Duration, Utc};

use nova_domain::{month_label, shift_year_month, Category, FilterRange, Transaction};

/// Number of calendar months shown by the trend chart, ending at the current month.
pub const TREND_MONTHS: i32 = 6;
const WEEK_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SummaryStats {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// Income and expense sums for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthBucket {
    pub year: i32,
    pub month: u32,
    pub label: &'static str,
    pub income: f64,
    pub expense: f64,
}

impl MonthBucket {
    fn empty(year: i32, month: u32) -> Self {
        Self {
            year,
            month,
            label: month_label(month),
            income: 0.0,
            expense: 0.0,
        }
    }

    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

pub fn matches_range(txn: &Transaction, range: FilterRange, now: DateTime<Utc>) -> bool {
    let today = now.date_naive();
    match range {
        FilterRange::Week => txn.date >= (now - Duration::days(WEEK_DAYS)).date_naive(),
        FilterRange::Month => txn.date.year() == today.year() && txn.date.month() == today.month(),
        FilterRange::Year => txn.date.year() == today.year(),
    }
}

/// Case-insensitive substring match on description, category or account name.
///
/// `needle` must already be lower-cased.
fn matches_needle(txn: &Transaction, needle: &str) -> bool {
    txn.description.to_lowercase().contains(needle)
        || txn.category.as_str().to_lowercase().contains(needle)
        || txn.account_name.to_lowercase().contains(needle)
}

pub fn filter_by_range<'a, I>(transactions: I, range: FilterRange, now: DateTime<Utc>) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|txn| matches_range(txn, range, now))
        .collect()
}

/// Keeps transactions containing `query` case-insensitively. Only the empty
/// query keeps everything; whitespace is matched literally.
pub fn filter_by_query<'a, I>(transactions: I, query: &str) -> Vec<&'a Transaction>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    if query.is_empty() {
        return transactions.into_iter().collect();
    }
    let needle = query.to_lowercase();
    transactions
        .into_iter()
        .filter(|txn| matches_needle(txn, &needle))
        .collect()
}

/// Range filter followed by the text filter.
pub fn filter_transactions<'a>(
    transactions: &'a [Transaction],
    range: FilterRange,
    query: &str,
    now: DateTime<Utc>,
) -> Vec<&'a Transaction> {
    filter_by_query(filter_by_range(transactions, range, now), query)
}

pub fn summarize<'a, I>(transactions: I) -> SummaryStats
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut stats = SummaryStats::default();
    for txn in transactions {
        if txn.is_income() {
            stats.income += txn.amount;
        } else {
            stats.expense += txn.amount;
        }
    }
    stats.balance = stats.income - stats.expense;
    stats
}

/// Expense totals per category, largest first. Ties keep first-encountered order.
pub fn category_breakdown<'a, I>(transactions: I) -> Vec<CategoryTotal>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.into_iter().filter(|txn| txn.is_expense()) {
        match totals.iter_mut().find(|entry| entry.category == txn.category) {
            Some(entry) => entry.total += txn.amount,
            None => totals.push(CategoryTotal {
                category: txn.category,
                total: txn.amount,
            }),
        }
    }
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Income/expense buckets for the last six calendar months, oldest first.
///
/// Always computed over the full collection, independent of any active filter.
pub fn monthly_trend(transactions: &[Transaction], now: DateTime<Utc>) -> Vec<MonthBucket> {
    let today = now.date_naive();
    let mut buckets: Vec<MonthBucket> = (0..TREND_MONTHS)
        .rev()
        .map(|offset| {
            let (year, month) = shift_year_month(today.year(), today.month(), -offset);
            MonthBucket::empty(year, month)
        })
        .collect();

    for txn in transactions {
        let (year, month) = (txn.date.year(), txn.date.month());
        if let Some(bucket) = buckets
            .iter_mut()
            .find(|bucket| bucket.year == year && bucket.month == month)
        {
            if txn.is_income() {
                bucket.income += txn.amount;
            } else {
                bucket.expense += txn.amount;
            }
        }
    }
    buckets
}
