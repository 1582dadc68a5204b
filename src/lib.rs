#![doc(test(attr(deny(warnings))))]

//! Finance Core provides the domain model, billing math, and persistence
//! primitives behind a personal finance tracker: accounts, credit cards with
//! monthly invoices and installment purchases, fixed recurring bills, and
//! categories.

pub mod billing;
pub mod book;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
