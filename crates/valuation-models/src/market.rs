//! Market-based ratios: market capitalization, EV/EBITDA and P/E.

use serde::{Deserialize, Serialize};

use crate::math::{finite_or_zero, ratio};
use crate::result::{Metric, ValuationResult};

/// Price times shares outstanding.
#[must_use]
pub fn market_cap(price: f64, shares_outstanding: f64) -> f64 {
    finite_or_zero(price * shares_outstanding)
}

/// Market cap plus debt minus cash.
#[must_use]
pub fn enterprise_value(market_cap: f64, total_debt: f64, cash: f64) -> f64 {
    finite_or_zero(market_cap + total_debt - cash)
}

/// `enterprise_value / ebitda`, or `0.0` when EBITDA is zero.
#[must_use]
pub fn ev_to_ebitda(enterprise_value: f64, ebitda: f64) -> f64 {
    ratio(enterprise_value, ebitda)
}

/// `price / eps`, or `0.0` when EPS is zero.
#[must_use]
pub fn price_to_earnings(price: f64, eps: f64) -> f64 {
    ratio(price, eps)
}

/// Inputs for an EV/EBITDA calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvEbitdaInputs {
    /// Market capitalization.
    pub market_cap: f64,
    /// Total debt.
    pub total_debt: f64,
    /// Cash and equivalents.
    pub cash: f64,
    /// EBITDA.
    pub ebitda: f64,
}

/// Output of [`ev_ebitda`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EvEbitdaValuation {
    /// Market cap plus debt minus cash.
    pub enterprise_value: f64,
    /// EV divided by EBITDA.
    pub ev_to_ebitda: f64,
}

/// Computes enterprise value and the EV/EBITDA multiple.
#[must_use]
pub fn ev_ebitda(inputs: &EvEbitdaInputs) -> EvEbitdaValuation {
    let enterprise_value = enterprise_value(inputs.market_cap, inputs.total_debt, inputs.cash);
    EvEbitdaValuation {
        enterprise_value,
        ev_to_ebitda: ev_to_ebitda(enterprise_value, inputs.ebitda),
    }
}

impl From<&EvEbitdaValuation> for ValuationResult {
    fn from(v: &EvEbitdaValuation) -> Self {
        Self::new()
            .with(Metric::EnterpriseValue, v.enterprise_value)
            .with(Metric::EvToEbitda, v.ev_to_ebitda)
    }
}
