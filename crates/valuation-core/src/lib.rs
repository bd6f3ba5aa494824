#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for company valuation.
//!
//! This crate provides the foundational pieces shared by the valuation models,
//! the market-data clients and the CLI:
//!
//! - [`MarketDataClient`](provider::MarketDataClient) - Quote, statement and profile source
//! - [`StatementTable`](statement::StatementTable) and [`get`](statement::get) - Sparse statements with zero-default access
//! - [`FinancialsSnapshot`](types::FinancialsSnapshot) - Typed, normalised financial figures
//! - [`ValuationAssumptions`](assumptions::ValuationAssumptions) - Method parameters and their ranges

/// Valuation assumptions and range checks.
pub mod assumptions;
/// Error types for data retrieval and validation.
pub mod error;
/// The market-data client trait.
pub mod provider;
/// Sparse statement tables and the safe field accessor.
pub mod statement;
/// Core value types (Symbol, FinancialsSnapshot, MarketQuote, CompanyProfile).
pub mod types;

// Re-export commonly used items at crate root
pub use assumptions::ValuationAssumptions;
pub use error::{Result, ValuationError};
pub use provider::MarketDataClient;
pub use statement::{Financials, LineItem, StatementKind, StatementTable};
pub use types::{
    CompanyProfile, FinancialsSnapshot, MIN_SHARES_OUTSTANDING, MarketQuote, Symbol,
};
