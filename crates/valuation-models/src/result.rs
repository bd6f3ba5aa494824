//! Named valuation outputs.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::math::finite_or_zero;

/// How a metric should be presented.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricUnit {
    /// A currency amount.
    Currency,
    /// A valuation multiple such as EV/EBITDA.
    Multiple,
    /// A rate expressed as a fraction.
    Percent,
}

/// A named valuation output.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Metric {
    /// Enterprise value.
    EnterpriseValue,
    /// EV implied by the revenue multiple.
    EvFromRevenue,
    /// EV implied by the EBITDA multiple.
    EvFromEbitda,
    /// Lowest EV across precedent deals.
    LowEnterpriseValue,
    /// Highest EV across precedent deals.
    HighEnterpriseValue,
    /// Equity value.
    EquityValue,
    /// Equity value per share.
    PricePerShare,
    /// Market capitalization.
    MarketCap,
    /// EV/EBITDA multiple.
    EvToEbitda,
    /// Price/earnings ratio.
    PriceToEarnings,
    /// Mean precedent-transaction multiple.
    MeanMultiple,
    /// Sum of discounted forecast cash flows.
    PresentValueOfCashFlows,
    /// Undiscounted terminal value.
    TerminalValue,
    /// Discounted terminal value.
    PresentValueOfTerminalValue,
    /// Next-year dividend per share.
    NextDividend,
    /// Dividend-discount intrinsic value per share.
    IntrinsicValue,
    /// Assets minus liabilities.
    NetAssetValue,
    /// Net asset value per share.
    NetAssetValuePerShare,
    /// LBO exit enterprise value.
    ExitEnterpriseValue,
    /// LBO exit equity value.
    ExitEquity,
    /// LBO sponsor equity invested.
    EquityInvested,
    /// Internal rate of return.
    Irr,
    /// Multiple on invested capital.
    Moic,
    /// CAPM cost of equity.
    CostOfEquity,
    /// A named business segment.
    Segment(String),
    /// Sum-of-the-parts total.
    Total,
}

impl Metric {
    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::EnterpriseValue => "Enterprise Value",
            Self::EvFromRevenue => "EV from Revenue",
            Self::EvFromEbitda => "EV from EBITDA",
            Self::LowEnterpriseValue => "Low Enterprise Value",
            Self::HighEnterpriseValue => "High Enterprise Value",
            Self::EquityValue => "Equity Value",
            Self::PricePerShare => "Price per Share",
            Self::MarketCap => "Market Cap",
            Self::EvToEbitda => "EV/EBITDA",
            Self::PriceToEarnings => "P/E",
            Self::MeanMultiple => "Mean Multiple",
            Self::PresentValueOfCashFlows => "PV of Cash Flows",
            Self::TerminalValue => "Terminal Value",
            Self::PresentValueOfTerminalValue => "PV of Terminal Value",
            Self::NextDividend => "Next Dividend",
            Self::IntrinsicValue => "Intrinsic Value",
            Self::NetAssetValue => "Net Asset Value",
            Self::NetAssetValuePerShare => "NAV per Share",
            Self::ExitEnterpriseValue => "Exit EV",
            Self::ExitEquity => "Exit Equity",
            Self::EquityInvested => "Equity Invested",
            Self::Irr => "IRR",
            Self::Moic => "MOIC",
            Self::CostOfEquity => "Cost of Equity",
            Self::Segment(name) => name,
            Self::Total => "Total",
        }
    }

    /// Presentation unit.
    #[must_use]
    pub const fn unit(&self) -> MetricUnit {
        match self {
            Self::EvToEbitda | Self::PriceToEarnings | Self::MeanMultiple | Self::Moic => {
                MetricUnit::Multiple
            }
            Self::Irr | Self::CostOfEquity => MetricUnit::Percent,
            _ => MetricUnit::Currency,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered metric values produced by one valuation.
///
/// Values are stored finite: NaN and infinities are recorded as `0.0`.
/// Serializes as a JSON object keyed by metric name, in insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValuationResult {
    entries: Vec<(Metric, f64)>,
}

impl ValuationResult {
    /// Creates an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a metric.
    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.entries.push((metric, finite_or_zero(value)));
        self
    }

    /// Looks up a metric by value.
    #[must_use]
    pub fn get(&self, metric: &Metric) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| m == metric)
            .map(|(_, v)| *v)
    }

    /// Looks up a metric by display name.
    #[must_use]
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(m, _)| m.name() == name)
            .map(|(_, v)| *v)
    }

    /// Iterates over the metrics in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Metric, f64)> {
        self.entries.iter().map(|(m, v)| (m, *v))
    }

    /// Number of metrics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if there are no metrics.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Metric, f64)> for ValuationResult {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |acc, (metric, value)| acc.with(metric, value))
    }
}

impl Serialize for ValuationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(m, v)| (m.name(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_and_lookup() {
        let result = ValuationResult::new()
            .with(Metric::EnterpriseValue, 250.0)
            .with(Metric::EquityValue, 240.0)
            .with(Metric::PricePerShare, 4.8);
        let names: Vec<&str> = result.iter().map(|(m, _)| m.name()).collect();
        assert_eq!(names, ["Enterprise Value", "Equity Value", "Price per Share"]);
        assert_eq!(result.get(&Metric::EquityValue), Some(240.0));
        assert_eq!(result.get_by_name("Price per Share"), Some(4.8));
        assert_eq!(result.get(&Metric::Irr), None);
    }

    #[test]
    fn test_non_finite_recorded_as_zero() {
        let result = ValuationResult::new().with(Metric::Irr, f64::NAN);
        assert_eq!(result.get(&Metric::Irr), Some(0.0));
    }

    #[test]
    fn test_serializes_as_named_map() {
        let result: ValuationResult = [
            (Metric::Segment("Cloud".to_string()), 120.0),
            (Metric::Total, 120.0),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(json, r#"{"Cloud":120.0,"Total":120.0}"#);
    }

    #[test]
    fn test_units() {
        assert_eq!(Metric::EvToEbitda.unit(), MetricUnit::Multiple);
        assert_eq!(Metric::Irr.unit(), MetricUnit::Percent);
        assert_eq!(Metric::PricePerShare.unit(), MetricUnit::Currency);
    }
}
