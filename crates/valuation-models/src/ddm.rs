//! Dividend discount model (Gordon growth).

use serde::{Deserialize, Serialize};

use crate::math::finite_or_zero;
use crate::result::{Metric, ValuationResult};

/// Inputs for a dividend discount valuation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DdmInputs {
    /// Current share price.
    pub price: f64,
    /// Dividend yield as a fraction of price.
    pub dividend_yield: f64,
    /// Perpetual dividend growth rate.
    pub growth_rate: f64,
    /// Required return on equity.
    pub discount_rate: f64,
}

/// Output of [`dividend_discount`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DdmValuation {
    /// Current annual dividend per share.
    pub dividend: f64,
    /// Next year's dividend per share.
    pub next_dividend: f64,
    /// Intrinsic value per share; `0.0` unless `discount_rate > growth_rate`.
    pub intrinsic_value: f64,
}

/// Values a share as a growing perpetuity of dividends.
#[must_use]
pub fn dividend_discount(inputs: &DdmInputs) -> DdmValuation {
    let dividend = finite_or_zero(inputs.price * inputs.dividend_yield);
    let next_dividend = finite_or_zero(dividend * (1.0 + inputs.growth_rate));
    let intrinsic_value = if inputs.discount_rate > inputs.growth_rate {
        finite_or_zero(next_dividend / (inputs.discount_rate - inputs.growth_rate))
    } else {
        0.0
    };

    DdmValuation {
        dividend,
        next_dividend,
        intrinsic_value,
    }
}

impl From<&DdmValuation> for ValuationResult {
    fn from(v: &DdmValuation) -> Self {
        Self::new()
            .with(Metric::NextDividend, v.next_dividend)
            .with(Metric::IntrinsicValue, v.intrinsic_value)
    }
}
