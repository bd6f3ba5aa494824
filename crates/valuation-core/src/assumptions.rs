//! Caller-supplied valuation assumptions and their allowed ranges.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::error::{Result, ValuationError};

/// Allowed range for growth rates.
pub const GROWTH_RATE_RANGE: RangeInclusive<f64> = -1.0..=1.0;
/// Allowed range for discount and interest rates.
pub const RATE_RANGE: RangeInclusive<f64> = 0.0..=1.0;
/// Allowed range for valuation multiples.
pub const MULTIPLE_RANGE: RangeInclusive<f64> = 0.0..=1000.0;
/// Allowed range for forecast horizons and hold periods, in years.
pub const YEARS_RANGE: RangeInclusive<u32> = 1..=50;

/// Method-specific scalar assumptions.
///
/// The formula functions accept any numbers; [`validate`](Self::validate) is
/// for the boundary where user input enters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValuationAssumptions {
    /// Annual cash-flow or dividend growth rate.
    pub growth_rate: f64,
    /// Annual discount rate.
    pub discount_rate: f64,
    /// Terminal EV/FCF multiple for exit-multiple DCF.
    pub terminal_multiple: f64,
    /// Explicit forecast horizon in whole years.
    pub forecast_years: u32,
    /// Interest rate on acquisition debt.
    pub interest_rate: f64,
    /// Exit EV/EBITDA multiple for LBO.
    pub exit_multiple: f64,
    /// LBO hold period in whole years.
    pub hold_years: u32,
}

impl Default for ValuationAssumptions {
    fn default() -> Self {
        Self {
            growth_rate: 0.05,
            discount_rate: 0.10,
            terminal_multiple: 12.0,
            forecast_years: 5,
            interest_rate: 0.08,
            exit_multiple: 10.0,
            hold_years: 5,
        }
    }
}

impl ValuationAssumptions {
    /// Checks every field against its range.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidParameter`] naming the first field
    /// outside its range.
    pub fn validate(&self) -> Result<()> {
        check_f64("growth_rate", self.growth_rate, &GROWTH_RATE_RANGE)?;
        check_f64("discount_rate", self.discount_rate, &RATE_RANGE)?;
        check_f64("terminal_multiple", self.terminal_multiple, &MULTIPLE_RANGE)?;
        check_years("forecast_years", self.forecast_years)?;
        check_f64("interest_rate", self.interest_rate, &RATE_RANGE)?;
        check_f64("exit_multiple", self.exit_multiple, &MULTIPLE_RANGE)?;
        check_years("hold_years", self.hold_years)?;
        Ok(())
    }
}

/// Checks a real-valued parameter against a closed range.
///
/// # Errors
///
/// Returns [`ValuationError::InvalidParameter`] when `value` is non-finite or
/// outside `range`.
pub fn check_f64(name: &str, value: f64, range: &RangeInclusive<f64>) -> Result<()> {
    if value.is_finite() && range.contains(&value) {
        Ok(())
    } else {
        Err(ValuationError::InvalidParameter(format!(
            "{name} = {value} is outside [{}, {}]",
            range.start(),
            range.end()
        )))
    }
}

fn check_years(name: &str, value: u32) -> Result<()> {
    if YEARS_RANGE.contains(&value) {
        Ok(())
    } else {
        Err(ValuationError::InvalidParameter(format!(
            "{name} = {value} must be between {} and {} years",
            YEARS_RANGE.start(),
            YEARS_RANGE.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ValuationAssumptions::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_discount() {
        let assumptions = ValuationAssumptions {
            discount_rate: 1.5,
            ..Default::default()
        };
        let err = assumptions.validate().unwrap_err();
        assert!(err.to_string().contains("discount_rate"));
    }

    #[test]
    fn test_rejects_zero_horizon() {
        let assumptions = ValuationAssumptions {
            forecast_years: 0,
            ..Default::default()
        };
        assert!(matches!(
            assumptions.validate(),
            Err(ValuationError::InvalidParameter(msg)) if msg.contains("forecast_years")
        ));
    }

    #[test]
    fn test_rejects_nan() {
        assert!(check_f64("growth_rate", f64::NAN, &GROWTH_RATE_RANGE).is_err());
        assert!(check_f64("growth_rate", -0.02, &GROWTH_RATE_RANGE).is_ok());
    }
}
