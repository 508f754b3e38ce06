//! nova-domain
//!
//! Pure domain models (Transaction, Category, Profile, Prediction, etc.).
//! No I/O, no CLI, no storage. Only data types, core enums and calendar math.

pub mod calendar;
pub mod category;
pub mod common;
pub mod prediction;
pub mod profile;
pub mod transaction;

pub use calendar::*;
pub use category::*;
pub use common::*;
pub use prediction::*;
pub use profile::*;
pub use transaction::*;
