//! Precedent-transaction valuation.

use serde::{Deserialize, Serialize};

use crate::math::{equity_value, finite_or_zero, mean, per_share};
use crate::result::{Metric, ValuationResult};

/// Inputs for a precedent-transaction valuation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrecedentInputs {
    /// Target metric the deal multiples apply to (revenue or EBITDA).
    pub target_metric: f64,
    /// EV/metric multiples paid in comparable deals.
    pub deal_multiples: Vec<f64>,
    /// Total debt minus cash.
    #[serde(default)]
    pub net_debt: f64,
    /// Shares outstanding.
    pub shares_outstanding: f64,
}

/// Output of [`precedent_transactions`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrecedentValuation {
    /// Number of finite deal multiples used.
    pub deal_count: usize,
    /// Mean deal multiple.
    pub mean_multiple: f64,
    /// EV at the lowest deal multiple.
    pub low_enterprise_value: f64,
    /// EV at the highest deal multiple.
    pub high_enterprise_value: f64,
    /// EV at the mean deal multiple.
    pub enterprise_value: f64,
    /// Enterprise value minus net debt.
    pub equity_value: f64,
    /// Equity value per share.
    pub price_per_share: f64,
}

/// Values a company at the multiples paid in comparable acquisitions.
///
/// Non-finite multiples are ignored. With no usable deals every value is
/// `0.0`.
#[must_use]
pub fn precedent_transactions(inputs: &PrecedentInputs) -> PrecedentValuation {
    let multiples: Vec<f64> = inputs
        .deal_multiples
        .iter()
        .copied()
        .filter(|m| m.is_finite())
        .collect();

    let Some(mean_multiple) = mean(&multiples) else {
        return PrecedentValuation {
            deal_count: 0,
            mean_multiple: 0.0,
            low_enterprise_value: 0.0,
            high_enterprise_value: 0.0,
            enterprise_value: 0.0,
            equity_value: 0.0,
            price_per_share: 0.0,
        };
    };

    let low = multiples.iter().copied().fold(f64::INFINITY, f64::min);
    let high = multiples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let enterprise_value = finite_or_zero(inputs.target_metric * mean_multiple);
    let equity_value = equity_value(enterprise_value, inputs.net_debt);

    PrecedentValuation {
        deal_count: multiples.len(),
        mean_multiple,
        low_enterprise_value: finite_or_zero(inputs.target_metric * low),
        high_enterprise_value: finite_or_zero(inputs.target_metric * high),
        enterprise_value,
        equity_value,
        price_per_share: per_share(equity_value, inputs.shares_outstanding),
    }
}

impl From<&PrecedentValuation> for ValuationResult {
    fn from(v: &PrecedentValuation) -> Self {
        Self::new()
            .with(Metric::MeanMultiple, v.mean_multiple)
            .with(Metric::LowEnterpriseValue, v.low_enterprise_value)
            .with(Metric::HighEnterpriseValue, v.high_enterprise_value)
            .with(Metric::EnterpriseValue, v.enterprise_value)
            .with(Metric::EquityValue, v.equity_value)
            .with(Metric::PricePerShare, v.price_per_share)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_low_high() {
        let v = precedent_transactions(&PrecedentInputs {
            target_metric: 20.0,
            deal_multiples: vec![8.0, 12.0, f64::NAN, 10.0],
            net_debt: 10.0,
            shares_outstanding: 50.0,
        });
        assert_eq!(v.deal_count, 3);
        assert_relative_eq!(v.mean_multiple, 10.0);
        assert_relative_eq!(v.low_enterprise_value, 160.0);
        assert_relative_eq!(v.high_enterprise_value, 240.0);
        assert_relative_eq!(v.enterprise_value, 200.0);
        assert_relative_eq!(v.equity_value, 190.0);
        assert_relative_eq!(v.price_per_share, 3.8);
    }

    #[test]
    fn test_no_deals() {
        let v = precedent_transactions(&PrecedentInputs {
            target_metric: 20.0,
            deal_multiples: vec![],
            net_debt: 10.0,
            shares_outstanding: 50.0,
        });
        assert_eq!(v.deal_count, 0);
        assert_eq!(v.enterprise_value, 0.0);
        assert_eq!(v.price_per_share, 0.0);
    }
}
