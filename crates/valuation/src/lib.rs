#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Company valuation toolkit.
//!
//! Re-exports the core types from `valuation-core` and the formula library
//! from `valuation-models`, and adds the pieces that talk to a
//! [`MarketDataClient`]: snapshot loading, the peer table, and the
//! in-memory and fallback clients.
//!
//! # Example
//!
//! ```rust,ignore
//! use valuation::{FmpClient, Symbol, peers};
//!
//! #[tokio::main]
//! async fn main() -> valuation::Result<()> {
//!     let client = FmpClient::from_env()?;
//!     let table = peers::build(&[Symbol::new("KO"), Symbol::new("PEP")], &client).await;
//!     println!("{}", table.to_dataframe()?);
//!     Ok(())
//! }
//! ```

pub mod fallback;
pub mod memory;
pub mod peers;
pub mod snapshot;

// Core types and traits
pub use valuation_core::*;

// Formulas
pub use valuation_models as models;
pub use valuation_models::{Metric, MetricUnit, ValuationRequest, ValuationResult};

// Clients
pub use fallback::FallbackClient;
pub use memory::{CompanyData, InMemoryClient};
#[cfg(feature = "fmp")]
pub use valuation_fmp::FmpClient;

pub use peers::{PeerRow, PeerTable};
pub use snapshot::{LoadedSnapshot, load_snapshot};
