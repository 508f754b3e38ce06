//! nova-core
//!
//! Aggregation, recurring-bill prediction and the services around them.
//! Depends on nova-domain. No CLI, no terminal I/O, no direct filesystem access.

pub mod aggregate;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod predict;
pub mod profile_service;
pub mod session;
pub mod storage;
pub mod time;
pub mod transaction_service;

pub use aggregate::{CategoryTotal, MonthBucket, SummaryStats};
pub use dashboard::{DashboardQuery, DashboardView};
pub use error::CoreError;
pub use predict::{predict, predict_with_policy, PredictionPolicy};
pub use profile_service::*;
pub use session::LedgerSession;
pub use storage::{ProfileStore, TransactionStore};
pub use time::{Clock, FixedClock};
pub use transaction_service::*;

#[cfg(test)]
mod tests;
