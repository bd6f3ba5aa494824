//! CAPM cost of equity.

use serde::{Deserialize, Serialize};

use crate::math::finite_or_zero;
use crate::result::{Metric, ValuationResult};

/// Inputs for the capital asset pricing model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CapmInputs {
    /// Risk-free rate.
    pub risk_free_rate: f64,
    /// Equity beta.
    pub beta: f64,
    /// Expected market return over the risk-free rate.
    pub equity_risk_premium: f64,
}

/// `risk_free_rate + beta * equity_risk_premium`.
#[must_use]
pub fn cost_of_equity(inputs: &CapmInputs) -> f64 {
    finite_or_zero(inputs.risk_free_rate + inputs.beta * inputs.equity_risk_premium)
}

impl From<&CapmInputs> for ValuationResult {
    fn from(inputs: &CapmInputs) -> Self {
        Self::new().with(Metric::CostOfEquity, cost_of_equity(inputs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_cost_of_equity() {
        let inputs = CapmInputs {
            risk_free_rate: 0.04,
            beta: 1.2,
            equity_risk_premium: 0.05,
        };
        assert_abs_diff_eq!(cost_of_equity(&inputs), 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_beta_is_risk_free() {
        let inputs = CapmInputs {
            risk_free_rate: 0.035,
            beta: 0.0,
            equity_risk_premium: 0.06,
        };
        assert_abs_diff_eq!(cost_of_equity(&inputs), 0.035);
    }
}
