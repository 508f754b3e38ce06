//! User profiles, display currencies and the active session marker.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::*;

const AVATAR_BASE_URL: &str = "https://api.dicebear.com/7.x/avataaars/svg?seed=";

/// Display currency for a profile. Amounts are never converted between currencies.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    INR,
    EUR,
    GBP,
    JPY,
}

impl CurrencyCode {
    pub const ALL: [CurrencyCode; 5] = [
        CurrencyCode::USD,
        CurrencyCode::INR,
        CurrencyCode::EUR,
        CurrencyCode::GBP,
        CurrencyCode::JPY,
    ];

    pub fn code(self) -> &'static str {
        match self {
            CurrencyCode::USD => "USD",
            CurrencyCode::INR => "INR",
            CurrencyCode::EUR => "EUR",
            CurrencyCode::GBP => "GBP",
            CurrencyCode::JPY => "JPY",
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CurrencyCode::USD => "$",
            CurrencyCode::INR => "₹",
            CurrencyCode::EUR => "€",
            CurrencyCode::GBP => "£",
            CurrencyCode::JPY => "¥",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            CurrencyCode::USD => "US Dollar",
            CurrencyCode::INR => "Indian Rupee",
            CurrencyCode::EUR => "Euro",
            CurrencyCode::GBP => "British Pound",
            CurrencyCode::JPY => "Japanese Yen",
        }
    }

    /// Formats an amount with the currency symbol and two decimals.
    pub fn format_amount(self, amount: f64) -> String {
        if amount < 0.0 {
            format!("-{}{:.2}", self.symbol(), amount.abs())
        } else {
            format!("{}{:.2}", self.symbol(), amount)
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim();
        CurrencyCode::ALL
            .iter()
            .copied()
            .find(|code| code.code().eq_ignore_ascii_case(needle))
            .ok_or_else(|| format!("unsupported currency `{needle}`"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub uid: Uuid,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub currency: CurrencyCode,
}

impl Profile {
    pub fn new(display_name: impl Into<String>, currency: CurrencyCode) -> Self {
        let display_name = display_name.into();
        let avatar_url = Some(format!("{AVATAR_BASE_URL}{}", avatar_seed(&display_name)));
        Self {
            uid: Uuid::new_v4(),
            display_name,
            email: None,
            avatar_url,
            currency,
        }
    }
}

impl Identifiable for Profile {
    fn id(&self) -> Uuid {
        self.uid
    }
}

impl NamedEntity for Profile {
    fn name(&self) -> &str {
        &self.display_name
    }
}

impl Displayable for Profile {
    fn display_label(&self) -> String {
        format!("{} ({})", self.display_name, self.currency)
    }
}

/// Marks which profile is signed in. Persisted by the store, never held globally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub uid: Uuid,
    pub started_at: DateTime<Utc>,
}

fn avatar_seed(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() { ch } else { '-' })
        .collect()
}
