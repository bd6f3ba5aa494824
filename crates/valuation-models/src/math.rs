//! Shared arithmetic with the zero-on-degenerate policy.

/// Replaces NaN and infinities with `0.0`.
#[must_use]
pub fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// `numerator / denominator`, or `0.0` when the denominator is zero or the
/// quotient is not finite.
#[must_use]
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    finite_or_zero(numerator / denominator)
}

/// Equity value divided by shares, or `0.0` when shares are not positive.
#[must_use]
pub fn per_share(equity_value: f64, shares_outstanding: f64) -> f64 {
    if shares_outstanding > 0.0 {
        ratio(equity_value, shares_outstanding)
    } else {
        0.0
    }
}

/// Total debt minus cash.
#[must_use]
pub fn net_debt(total_debt: f64, cash: f64) -> f64 {
    finite_or_zero(total_debt - cash)
}

/// Enterprise value minus net debt.
#[must_use]
pub fn equity_value(enterprise_value: f64, net_debt: f64) -> f64 {
    finite_or_zero(enterprise_value - net_debt)
}

/// `(1 + rate)^years`.
#[must_use]
pub fn growth_factor(rate: f64, years: u32) -> f64 {
    (1.0 + rate).powf(f64::from(years))
}

/// Discounts `amount` received in `years` years at `rate`.
#[must_use]
pub fn present_value(amount: f64, rate: f64, years: u32) -> f64 {
    ratio(amount, growth_factor(rate, years))
}

/// Arithmetic mean of the finite values, or `None` if there are none.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return None;
    }
    Some(finite_or_zero(finite.iter().sum::<f64>() / finite.len() as f64))
}
