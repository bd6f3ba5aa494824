//! Comparable-company multiples.

use serde::{Deserialize, Serialize};

use crate::math::{equity_value, finite_or_zero, per_share};
use crate::result::{Metric, ValuationResult};

/// Inputs for a comparable-multiples valuation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparablesInputs {
    /// Target revenue.
    pub revenue: f64,
    /// Target EBITDA.
    pub ebitda: f64,
    /// Peer EV/revenue multiple applied to the target.
    pub ev_to_revenue: f64,
    /// Peer EV/EBITDA multiple applied to the target.
    pub ev_to_ebitda: f64,
    /// Total debt minus cash.
    pub net_debt: f64,
    /// Shares outstanding.
    pub shares_outstanding: f64,
}

/// Output of [`comparable_multiples`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ComparablesValuation {
    /// Revenue times the EV/revenue multiple.
    pub ev_from_revenue: f64,
    /// EBITDA times the EV/EBITDA multiple.
    pub ev_from_ebitda: f64,
    /// Average of the two implied enterprise values.
    pub enterprise_value: f64,
    /// Enterprise value minus net debt.
    pub equity_value: f64,
    /// Equity value per share.
    pub price_per_share: f64,
}

/// Values a company at the average of its revenue- and EBITDA-implied EVs.
#[must_use]
pub fn comparable_multiples(inputs: &ComparablesInputs) -> ComparablesValuation {
    let ev_from_revenue = finite_or_zero(inputs.revenue * inputs.ev_to_revenue);
    let ev_from_ebitda = finite_or_zero(inputs.ebitda * inputs.ev_to_ebitda);
    let enterprise_value = finite_or_zero(ev_from_revenue / 2.0 + ev_from_ebitda / 2.0);
    let equity_value = equity_value(enterprise_value, inputs.net_debt);

    ComparablesValuation {
        ev_from_revenue,
        ev_from_ebitda,
        enterprise_value,
        equity_value,
        price_per_share: per_share(equity_value, inputs.shares_outstanding),
    }
}

impl From<&ComparablesValuation> for ValuationResult {
    fn from(v: &ComparablesValuation) -> Self {
        Self::new()
            .with(Metric::EvFromRevenue, v.ev_from_revenue)
            .with(Metric::EvFromEbitda, v.ev_from_ebitda)
            .with(Metric::EnterpriseValue, v.enterprise_value)
            .with(Metric::EquityValue, v.equity_value)
            .with(Metric::PricePerShare, v.price_per_share)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn inputs() -> ComparablesInputs {
        ComparablesInputs {
            revenue: 100.0,
            ebitda: 20.0,
            ev_to_revenue: 3.0,
            ev_to_ebitda: 10.0,
            net_debt: 10.0,
            shares_outstanding: 50.0,
        }
    }

    #[test]
    fn test_worked_example() {
        let v = comparable_multiples(&inputs());
        assert_relative_eq!(v.ev_from_revenue, 300.0);
        assert_relative_eq!(v.ev_from_ebitda, 200.0);
        assert_relative_eq!(v.enterprise_value, 250.0);
        assert_relative_eq!(v.equity_value, 240.0);
        assert_relative_eq!(v.price_per_share, 4.8);
    }

    #[test]
    fn test_price_matches_closed_form() {
        for (revenue, ebitda, m_r, m_e, debt, shares) in [
            (0.0, 0.0, 0.0, 0.0, 0.0, 1.0),
            (523.0, 71.5, 1.8, 7.25, 40.0, 12.5),
            (1e6, 2.5e5, 4.0, 14.0, 3e5, 1e3),
        ] {
            let v = comparable_multiples(&ComparablesInputs {
                revenue,
                ebitda,
                ev_to_revenue: m_r,
                ev_to_ebitda: m_e,
                net_debt: debt,
                shares_outstanding: shares,
            });
            let expected = ((m_r * revenue + m_e * ebitda) / 2.0 - debt) / shares;
            assert_relative_eq!(v.price_per_share, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_zero_shares_gives_zero_price() {
        let v = comparable_multiples(&ComparablesInputs {
            shares_outstanding: 0.0,
            ..inputs()
        });
        assert_eq!(v.price_per_share, 0.0);
        assert_relative_eq!(v.equity_value, 240.0);
    }

    #[test]
    fn test_overflowing_products_become_zero() {
        let v = comparable_multiples(&ComparablesInputs {
            revenue: f64::MAX,
            ebitda: 20.0,
            ev_to_revenue: 3.0,
            ..inputs()
        });
        assert_eq!(v.ev_from_revenue, 0.0);
        assert_relative_eq!(v.ev_from_ebitda, 200.0);
        assert_relative_eq!(v.enterprise_value, 100.0);

        let v = comparable_multiples(&ComparablesInputs {
            revenue: f64::MAX / 2.0,
            ev_to_revenue: 1.0,
            ebitda: f64::MAX / 2.0,
            ev_to_ebitda: 1.0,
            net_debt: -f64::MAX,
            ..inputs()
        });
        assert!(v.enterprise_value.is_finite());
        assert_eq!(v.equity_value, 0.0);
        assert_eq!(v.price_per_share, 0.0);
    }

    #[test]
    fn test_into_result() {
        let result = ValuationResult::from(&comparable_multiples(&inputs()));
        assert_eq!(result.get(&Metric::EnterpriseValue), Some(250.0));
        assert_eq!(result.len(), 5);
    }
}
