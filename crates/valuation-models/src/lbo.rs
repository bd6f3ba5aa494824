//! Leveraged buyout returns.
//!
//! The sponsor buys the company at `purchase_enterprise_value`, funding
//! `debt_used` with acquisition debt that accrues simple interest once over
//! the hold. At exit the business is sold at `exit_ebitda * exit_multiple` and
//! the debt plus interest is repaid. IRR is the single-period compounding rate
//! that turns equity invested into exit equity over the hold period.

use serde::{Deserialize, Serialize};

use crate::math::{finite_or_zero, ratio};
use crate::result::{Metric, ValuationResult};

/// Hold period used when none is given.
pub const DEFAULT_HOLD_YEARS: u32 = 5;

const fn default_hold_years() -> u32 {
    DEFAULT_HOLD_YEARS
}

/// Inputs for an LBO returns calculation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LboInputs {
    /// Enterprise value paid at entry.
    pub purchase_enterprise_value: f64,
    /// Acquisition debt raised.
    pub debt_used: f64,
    /// Interest rate on the acquisition debt.
    pub interest_rate: f64,
    /// EBITDA in the exit year.
    pub exit_ebitda: f64,
    /// EV/EBITDA multiple at exit.
    pub exit_multiple: f64,
    /// Hold period in whole years.
    #[serde(default = "default_hold_years")]
    pub hold_years: u32,
}

/// Output of [`leveraged_buyout`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LboValuation {
    /// Exit EBITDA times exit multiple.
    pub exit_enterprise_value: f64,
    /// Debt plus interest repaid at exit.
    pub debt_repayment: f64,
    /// Exit EV minus debt repayment.
    pub exit_equity: f64,
    /// Purchase EV minus debt used.
    pub equity_invested: f64,
    /// Annualised internal rate of return.
    pub irr: f64,
    /// Exit equity divided by equity invested.
    pub moic: f64,
}

/// Annualised return turning `invested` into `exit_equity` over `years`.
///
/// Returns `0.0` when nothing was invested (or the invested amount is
/// negative) or the hold period is zero, and `-1.0` when the exit equity is
/// wiped out. The result is always finite.
#[must_use]
pub fn irr(exit_equity: f64, invested: f64, years: u32) -> f64 {
    if invested <= 0.0 || years == 0 {
        return 0.0;
    }
    let multiple = exit_equity / invested;
    if !multiple.is_finite() {
        return 0.0;
    }
    if multiple <= 0.0 {
        return -1.0;
    }
    finite_or_zero(multiple.powf(1.0 / f64::from(years)) - 1.0)
}

/// Computes sponsor returns for a leveraged buyout.
#[must_use]
pub fn leveraged_buyout(inputs: &LboInputs) -> LboValuation {
    let exit_enterprise_value = finite_or_zero(inputs.exit_ebitda * inputs.exit_multiple);
    let debt_repayment = finite_or_zero(inputs.debt_used * (1.0 + inputs.interest_rate));
    let exit_equity = finite_or_zero(exit_enterprise_value - debt_repayment);
    let equity_invested = finite_or_zero(inputs.purchase_enterprise_value - inputs.debt_used);

    let moic = if equity_invested > 0.0 {
        ratio(exit_equity, equity_invested)
    } else {
        0.0
    };

    LboValuation {
        exit_enterprise_value,
        debt_repayment,
        exit_equity,
        equity_invested,
        irr: irr(exit_equity, equity_invested, inputs.hold_years),
        moic,
    }
}

impl From<&LboValuation> for ValuationResult {
    fn from(v: &LboValuation) -> Self {
        Self::new()
            .with(Metric::ExitEnterpriseValue, v.exit_enterprise_value)
            .with(Metric::ExitEquity, v.exit_equity)
            .with(Metric::EquityInvested, v.equity_invested)
            .with(Metric::Irr, v.irr)
            .with(Metric::Moic, v.moic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn inputs() -> LboInputs {
        LboInputs {
            purchase_enterprise_value: 1000.0,
            debt_used: 600.0,
            interest_rate: 0.08,
            exit_ebitda: 150.0,
            exit_multiple: 10.0,
            hold_years: 5,
        }
    }

    #[test]
    fn test_sponsor_returns() {
        let v = leveraged_buyout(&inputs());
        assert_abs_diff_eq!(v.exit_enterprise_value, 1500.0);
        assert_abs_diff_eq!(v.exit_equity, 852.0, epsilon = 1e-9);
        assert_abs_diff_eq!(v.equity_invested, 400.0);
        assert_abs_diff_eq!(v.irr, 0.163257659, epsilon = 1e-8);
        assert_abs_diff_eq!(v.moic, 2.13, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_invested_gives_zero_irr() {
        let v = leveraged_buyout(&LboInputs {
            debt_used: 1000.0,
            ..inputs()
        });
        assert_eq!(v.equity_invested, 0.0);
        assert_eq!(v.irr, 0.0);
        assert_eq!(v.moic, 0.0);
        assert!(v.irr.is_finite());
    }

    #[test]
    fn test_wiped_out_equity() {
        let v = leveraged_buyout(&LboInputs {
            exit_ebitda: 10.0,
            ..inputs()
        });
        assert!(v.exit_equity < 0.0);
        assert_eq!(v.irr, -1.0);
    }

    #[test]
    fn test_irr_edge_cases() {
        assert_eq!(irr(100.0, 0.0, 5), 0.0);
        assert_eq!(irr(100.0, -20.0, 5), 0.0);
        assert_eq!(irr(100.0, 50.0, 0), 0.0);
        assert_abs_diff_eq!(irr(200.0, 100.0, 1), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_default_hold_years() {
        let json = r#"{"purchase_enterprise_value":1000.0,"debt_used":600.0,
            "interest_rate":0.08,"exit_ebitda":150.0,"exit_multiple":10.0}"#;
        let parsed: LboInputs = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.hold_years, DEFAULT_HOLD_YEARS);
    }
}
