#![doc(test(attr(deny(warnings))))]

//! Nova Ledger wires the domain, core, storage and config crates into a
//! personal finance shell with a recurring-bill alert.

pub mod cli;
pub mod errors;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Nova Ledger tracing initialized.");
    });
}
