#![doc(test(attr(deny(warnings))))]

//! Together Core turns a household's shared ledger into the figures its
//! dashboard, statistics and history screens display: totals, per-category and
//! per-member breakdowns, monthly trends, rankings and income allocation.

pub mod config;
pub mod core;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod format;
pub mod storage;
pub mod utils;

use std::sync::Once;

pub use crate::core::aggregation::{
    AggregationEngine, LedgerSnapshot, ReportFilter, TransactionFilter,
};
pub use crate::core::services::{BudgetService, ReportService};
pub use crate::core::session::SessionContext;
pub use crate::errors::TogetherError;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and logs the embedded build metadata.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        let build = utils::build_info::current();
        tracing::info!(
            version = build.version,
            git_hash = build.git_hash,
            profile = build.profile,
            "Together Core tracing initialized."
        );
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
