//! Calendar arithmetic on year/month/day fields.
//!
//! Month addition is done explicitly rather than through a mutable date object
//! so that the behaviour for month-end dates is a named policy ([`MonthOverflow`])
//! instead of an accident of the underlying library.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// How to resolve a day-of-month that does not exist in the target month.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MonthOverflow {
    /// Use the last valid day of the target month: Jan 31 + 1 month = Feb 28 (29).
    #[default]
    Clamp,
    /// Carry the surplus days into the following month: Jan 31 + 1 month = Mar 3 (Mar 2 in leap years).
    Roll,
}

impl fmt::Display for MonthOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MonthOverflow::Clamp => "clamp",
            MonthOverflow::Roll => "roll",
        };
        f.write_str(label)
    }
}

impl FromStr for MonthOverflow {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "clamp" => Ok(MonthOverflow::Clamp),
            "roll" => Ok(MonthOverflow::Roll),
            other => Err(format!("unknown month overflow policy `{other}`")),
        }
    }
}

/// Adds `months` calendar months to `date`, carrying into the year as needed.
///
/// Returns `None` only when the result falls outside chrono's representable range.
pub fn add_months(date: NaiveDate, months: i32, overflow: MonthOverflow) -> Option<NaiveDate> {
    let (year, month) = shift_year_month(date.year(), date.month(), months);
    let first = first_of_month(year, month)?;
    let day = match overflow {
        MonthOverflow::Clamp => date.day().min(days_in_month(year, month)),
        MonthOverflow::Roll => date.day(),
    };
    first.checked_add_signed(Duration::days(i64::from(day) - 1))
}

/// Moves a (year, month) pair by `delta` months. `month` is 1-based.
pub fn shift_year_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

pub fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

/// Three-letter English label for a 1-based month number.
pub fn month_label(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|idx| MONTH_LABELS.get(idx as usize))
        .copied()
        .unwrap_or("???")
}

/// The instant a calendar date begins, in UTC. Stored dates carry no time of day.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}
