#![doc(test(attr(deny(warnings))))]

//! Gastos Core tracks a single user's daily spending against a budget,
//! rolls the ledger over at calendar-day boundaries, archives closed days,
//! and rebuilds a monthly history view from the archive.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod remote;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Gastos Core tracing initialized.");
    });
}
