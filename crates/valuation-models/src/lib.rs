#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Valuation formula library.
//!
//! Each method lives in its own module as a pure function from an inputs
//! struct to an output struct, and every output converts into a
//! [`ValuationResult`]. [`ValuationRequest`] bundles a method with its
//! inputs for callers that pick the method at run time.

/// Net asset value.
pub mod asset;
/// CAPM cost of equity.
pub mod capm;
/// Comparable-company multiples.
pub mod comparables;
/// Discounted cash flow.
pub mod dcf;
/// Dividend discount model.
pub mod ddm;
/// Leveraged buyout returns.
pub mod lbo;
/// Market cap, EV/EBITDA and P/E.
pub mod market;
/// Shared arithmetic helpers.
pub mod math;
/// Precedent transactions.
pub mod precedent;
/// Method dispatch.
pub mod request;
/// Named outputs.
pub mod result;
/// Sum of the parts.
pub mod sotp;

pub use asset::{AssetBasedInputs, AssetBasedValuation, asset_based, net_asset_value};
pub use capm::{CapmInputs, cost_of_equity};
pub use comparables::{ComparablesInputs, ComparablesValuation, comparable_multiples};
pub use dcf::{
    DEFAULT_FORECAST_YEARS, DcfInputs, DcfValuation, ProjectedCashFlow, TerminalValueMethod,
    discounted_cash_flow,
};
pub use ddm::{DdmInputs, DdmValuation, dividend_discount};
pub use lbo::{DEFAULT_HOLD_YEARS, LboInputs, LboValuation, irr, leveraged_buyout};
pub use market::{
    EvEbitdaInputs, EvEbitdaValuation, enterprise_value, ev_ebitda, ev_to_ebitda, market_cap,
    price_to_earnings,
};
pub use precedent::{PrecedentInputs, PrecedentValuation, precedent_transactions};
pub use request::ValuationRequest;
pub use result::{Metric, MetricUnit, ValuationResult};
pub use sotp::{Segment, SotpValuation, sum_of_the_parts};
