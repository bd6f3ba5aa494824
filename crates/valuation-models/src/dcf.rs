//! Discounted cash flow valuation.
//!
//! Free cash flow grows from a base year at a constant rate over an explicit
//! forecast horizon. Each year's flow is discounted at `(1 + r)^i`, and a
//! terminal value for the flows beyond the horizon is added, either from the
//! Gordon growth formula or from an exit multiple of the final-year flow.

use serde::{Deserialize, Serialize};

use crate::math::{
    equity_value, finite_or_zero, growth_factor, net_debt, per_share, present_value,
};
use crate::result::{Metric, ValuationResult};

/// Forecast horizon used when none is given.
pub const DEFAULT_FORECAST_YEARS: u32 = 5;

const fn default_forecast_years() -> u32 {
    DEFAULT_FORECAST_YEARS
}

/// How the value beyond the forecast horizon is estimated.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TerminalValueMethod {
    /// `FCF_n * (1 + g) / (r - g)`, zero unless `r > g`.
    PerpetuityGrowth,
    /// `FCF_n * multiple`.
    ExitMultiple {
        /// Terminal EV/FCF multiple.
        multiple: f64,
    },
}

/// Inputs for a DCF valuation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DcfInputs {
    /// Base-year free cash flow (FCF_0).
    pub base_free_cash_flow: f64,
    /// Annual growth rate of free cash flow.
    pub growth_rate: f64,
    /// Annual discount rate.
    pub discount_rate: f64,
    /// Forecast horizon in whole years; `0` is treated as `1`.
    #[serde(default = "default_forecast_years")]
    pub forecast_years: u32,
    /// Terminal value method.
    pub terminal: TerminalValueMethod,
    /// Total debt.
    #[serde(default)]
    pub total_debt: f64,
    /// Cash and equivalents.
    #[serde(default)]
    pub cash: f64,
    /// Shares outstanding.
    pub shares_outstanding: f64,
}

/// One forecast year.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCashFlow {
    /// Year index, starting at 1.
    pub year: u32,
    /// Projected free cash flow.
    pub free_cash_flow: f64,
    /// Discounted free cash flow.
    pub present_value: f64,
}

/// Output of [`discounted_cash_flow`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DcfValuation {
    /// Per-year projections.
    pub projections: Vec<ProjectedCashFlow>,
    /// Sum of discounted forecast flows.
    pub pv_of_cash_flows: f64,
    /// Undiscounted terminal value.
    pub terminal_value: f64,
    /// Terminal value discounted from the final forecast year.
    pub pv_of_terminal_value: f64,
    /// Sum of discounted flows and discounted terminal value.
    pub enterprise_value: f64,
    /// Enterprise value minus net debt.
    pub equity_value: f64,
    /// Equity value per share.
    pub price_per_share: f64,
}

/// Gordon growth terminal value, or `0.0` unless `discount_rate > growth_rate`.
#[must_use]
pub fn perpetuity_terminal_value(
    final_cash_flow: f64,
    growth_rate: f64,
    discount_rate: f64,
) -> f64 {
    if discount_rate > growth_rate {
        finite_or_zero(final_cash_flow * (1.0 + growth_rate) / (discount_rate - growth_rate))
    } else {
        0.0
    }
}

/// Exit-multiple terminal value.
#[must_use]
pub fn exit_multiple_terminal_value(final_cash_flow: f64, multiple: f64) -> f64 {
    finite_or_zero(final_cash_flow * multiple)
}

/// Runs a DCF valuation.
#[must_use]
pub fn discounted_cash_flow(inputs: &DcfInputs) -> DcfValuation {
    let years = inputs.forecast_years.max(1);

    let projections: Vec<ProjectedCashFlow> = (1..=years)
        .map(|year| {
            let growth = growth_factor(inputs.growth_rate, year);
            let free_cash_flow = finite_or_zero(inputs.base_free_cash_flow * growth);
            ProjectedCashFlow {
                year,
                free_cash_flow,
                present_value: present_value(free_cash_flow, inputs.discount_rate, year),
            }
        })
        .collect();

    let pv_of_cash_flows = finite_or_zero(projections.iter().map(|p| p.present_value).sum());
    let final_cash_flow = projections
        .last()
        .map_or(inputs.base_free_cash_flow, |p| p.free_cash_flow);

    let terminal_value = match inputs.terminal {
        TerminalValueMethod::PerpetuityGrowth => {
            perpetuity_terminal_value(final_cash_flow, inputs.growth_rate, inputs.discount_rate)
        }
        TerminalValueMethod::ExitMultiple { multiple } => {
            exit_multiple_terminal_value(final_cash_flow, multiple)
        }
    };
    let pv_of_terminal_value = present_value(terminal_value, inputs.discount_rate, years);

    let enterprise_value = finite_or_zero(pv_of_cash_flows + pv_of_terminal_value);
    let equity_value = equity_value(enterprise_value, net_debt(inputs.total_debt, inputs.cash));

    DcfValuation {
        projections,
        pv_of_cash_flows,
        terminal_value,
        pv_of_terminal_value,
        enterprise_value,
        equity_value,
        price_per_share: per_share(equity_value, inputs.shares_outstanding),
    }
}

impl From<&DcfValuation> for ValuationResult {
    fn from(v: &DcfValuation) -> Self {
        Self::new()
            .with(Metric::PresentValueOfCashFlows, v.pv_of_cash_flows)
            .with(Metric::TerminalValue, v.terminal_value)
            .with(Metric::PresentValueOfTerminalValue, v.pv_of_terminal_value)
            .with(Metric::EnterpriseValue, v.enterprise_value)
            .with(Metric::EquityValue, v.equity_value)
            .with(Metric::PricePerShare, v.price_per_share)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn inputs(terminal: TerminalValueMethod) -> DcfInputs {
        DcfInputs {
            base_free_cash_flow: 20.0 * 0.7,
            growth_rate: 0.05,
            discount_rate: 0.10,
            forecast_years: 5,
            terminal,
            total_debt: 0.0,
            cash: 0.0,
            shares_outstanding: 1.0,
        }
    }

    #[test]
    fn test_exit_multiple_worked_example() {
        let v = discounted_cash_flow(&inputs(TerminalValueMethod::ExitMultiple { multiple: 12.0 }));
        assert_eq!(v.projections.len(), 5);
        assert_abs_diff_eq!(v.projections[4].free_cash_flow, 17.8679, epsilon = 1e-4);
        assert_abs_diff_eq!(v.terminal_value, 214.4153, epsilon = 1e-4);
        assert_abs_diff_eq!(v.pv_of_terminal_value, 133.1350, epsilon = 1e-4);
        assert_abs_diff_eq!(v.pv_of_cash_flows, 61.0137, epsilon = 1e-4);
        assert_abs_diff_eq!(v.enterprise_value, 194.1487, epsilon = 1e-2);
    }

    #[test]
    fn test_perpetuity_growth() {
        let v = discounted_cash_flow(&inputs(TerminalValueMethod::PerpetuityGrowth));
        assert_abs_diff_eq!(v.terminal_value, 375.2268, epsilon = 1e-4);
        assert_abs_diff_eq!(v.enterprise_value, 294.0, epsilon = 1e-6);
    }

    #[test]
    fn test_perpetuity_zero_when_discount_not_above_growth() {
        for discount_rate in [0.05, 0.03] {
            let v = discounted_cash_flow(&DcfInputs {
                discount_rate,
                ..inputs(TerminalValueMethod::PerpetuityGrowth)
            });
            assert_eq!(v.terminal_value, 0.0);
            assert_eq!(v.pv_of_terminal_value, 0.0);
            assert_relative_eq!(v.enterprise_value, v.pv_of_cash_flows);
        }
    }

    #[test]
    fn test_equity_bridge_uses_net_debt() {
        let v = discounted_cash_flow(&DcfInputs {
            total_debt: 50.0,
            cash: 20.0,
            shares_outstanding: 10.0,
            ..inputs(TerminalValueMethod::PerpetuityGrowth)
        });
        assert_abs_diff_eq!(v.equity_value, 264.0, epsilon = 1e-6);
        assert_abs_diff_eq!(v.price_per_share, 26.4, epsilon = 1e-7);
    }

    #[test]
    fn test_zero_horizon_treated_as_one_year() {
        let v = discounted_cash_flow(&DcfInputs {
            forecast_years: 0,
            ..inputs(TerminalValueMethod::ExitMultiple { multiple: 10.0 })
        });
        assert_eq!(v.projections.len(), 1);
        assert_relative_eq!(v.projections[0].free_cash_flow, 14.7);
    }

    #[test]
    fn test_outputs_stay_finite_for_huge_inputs() {
        let v = discounted_cash_flow(&DcfInputs {
            base_free_cash_flow: f64::MAX / 2.0,
            growth_rate: 0.5,
            ..inputs(TerminalValueMethod::ExitMultiple { multiple: 1000.0 })
        });
        assert_eq!(v.terminal_value, 0.0);
        for projection in &v.projections {
            assert!(projection.free_cash_flow.is_finite());
            assert!(projection.present_value.is_finite());
        }
        assert!(v.pv_of_cash_flows.is_finite());
        assert!(v.enterprise_value.is_finite());
        assert!(v.equity_value.is_finite());

        assert_eq!(perpetuity_terminal_value(f64::MAX, 0.05, 0.0500001), 0.0);
        assert_eq!(exit_multiple_terminal_value(f64::MAX, 2.0), 0.0);
    }

    #[test]
    fn test_terminal_method_deserializes() {
        let method: TerminalValueMethod =
            serde_json::from_str(r#"{"kind":"exit_multiple","multiple":12.0}"#).unwrap();
        assert_eq!(method, TerminalValueMethod::ExitMultiple { multiple: 12.0 });
    }
}
