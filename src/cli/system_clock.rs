use std::{env, sync::Arc};

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use nova_core::{Clock, FixedClock};
use nova_domain::start_of_day_utc;

/// Pins the shell's clock to an RFC 3339 instant or a `YYYY-MM-DD` date (midnight UTC).
pub const NOW_ENV: &str = "NOVA_LEDGER_NOW";

/// Real-time clock backed by the system UTC time source.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// The system clock, unless [`NOW_ENV`] pins a fixed instant.
pub fn clock_from_env() -> Arc<dyn Clock> {
    match env::var(NOW_ENV) {
        Ok(raw) => match parse_instant(&raw) {
            Some(now) => Arc::new(FixedClock(now)),
            None => {
                warn!(value = %raw, "ignoring unparseable {NOW_ENV}");
                Arc::new(SystemClock)
            }
        },
        Err(_) => Arc::new(SystemClock),
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(raw) {
        return Some(instant.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .map(start_of_day_utc)
}
