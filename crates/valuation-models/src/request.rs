//! A single valuation request carrying every input it needs.

use serde::{Deserialize, Serialize};

use crate::asset::{AssetBasedInputs, asset_based};
use crate::capm::CapmInputs;
use crate::comparables::{ComparablesInputs, comparable_multiples};
use crate::dcf::{DcfInputs, discounted_cash_flow};
use crate::ddm::{DdmInputs, dividend_discount};
use crate::lbo::{LboInputs, leveraged_buyout};
use crate::market::{EvEbitdaInputs, ev_ebitda, market_cap, price_to_earnings};
use crate::precedent::{PrecedentInputs, precedent_transactions};
use crate::result::{Metric, ValuationResult};
use crate::sotp::{Segment, sum_of_the_parts};

/// One valuation method with its inputs.
///
/// Deserializes from JSON tagged by `method`, for example
/// `{"method": "price_to_earnings", "price": 30.0, "eps": 2.0}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum ValuationRequest {
    /// Comparable-company multiples.
    ComparableMultiples(ComparablesInputs),
    /// Discounted cash flow.
    DiscountedCashFlow(DcfInputs),
    /// Market capitalization.
    MarketCap {
        /// Share price.
        price: f64,
        /// Shares outstanding.
        shares_outstanding: f64,
    },
    /// Enterprise value and EV/EBITDA.
    EvEbitda(EvEbitdaInputs),
    /// Price/earnings ratio.
    PriceToEarnings {
        /// Share price.
        price: f64,
        /// Trailing earnings per share.
        eps: f64,
    },
    /// Dividend discount model.
    DividendDiscount(DdmInputs),
    /// Net asset value.
    AssetBased(AssetBasedInputs),
    /// Leveraged buyout returns.
    LeveragedBuyout(LboInputs),
    /// Sum of the parts.
    SumOfTheParts {
        /// Segments in presentation order.
        segments: Vec<Segment>,
    },
    /// Precedent transactions.
    PrecedentTransactions(PrecedentInputs),
    /// CAPM cost of equity.
    CostOfEquity(CapmInputs),
}

impl ValuationRequest {
    /// Human-readable method name.
    #[must_use]
    pub const fn method(&self) -> &'static str {
        match self {
            Self::ComparableMultiples(_) => "Comparable Multiples",
            Self::DiscountedCashFlow(_) => "Discounted Cash Flow",
            Self::MarketCap { .. } => "Market Capitalization",
            Self::EvEbitda(_) => "EV/EBITDA",
            Self::PriceToEarnings { .. } => "P/E",
            Self::DividendDiscount(_) => "Dividend Discount",
            Self::AssetBased(_) => "Asset-Based",
            Self::LeveragedBuyout(_) => "Leveraged Buyout",
            Self::SumOfTheParts { .. } => "Sum of the Parts",
            Self::PrecedentTransactions(_) => "Precedent Transactions",
            Self::CostOfEquity(_) => "Cost of Equity",
        }
    }

    /// Runs the method and returns its named outputs.
    #[must_use]
    pub fn evaluate(&self) -> ValuationResult {
        match self {
            Self::ComparableMultiples(inputs) => (&comparable_multiples(inputs)).into(),
            Self::DiscountedCashFlow(inputs) => (&discounted_cash_flow(inputs)).into(),
            Self::MarketCap {
                price,
                shares_outstanding,
            } => {
                let cap = market_cap(*price, *shares_outstanding);
                ValuationResult::new().with(Metric::MarketCap, cap)
            }
            Self::EvEbitda(inputs) => (&ev_ebitda(inputs)).into(),
            Self::PriceToEarnings { price, eps } => {
                let pe = price_to_earnings(*price, *eps);
                ValuationResult::new().with(Metric::PriceToEarnings, pe)
            }
            Self::DividendDiscount(inputs) => (&dividend_discount(inputs)).into(),
            Self::AssetBased(inputs) => (&asset_based(inputs)).into(),
            Self::LeveragedBuyout(inputs) => (&leveraged_buyout(inputs)).into(),
            Self::SumOfTheParts { segments } => (&sum_of_the_parts(segments)).into(),
            Self::PrecedentTransactions(inputs) => (&precedent_transactions(inputs)).into(),
            Self::CostOfEquity(inputs) => inputs.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_deserialize_and_evaluate() {
        let request: ValuationRequest = serde_json::from_str(
            r#"{"method":"comparable_multiples","revenue":100.0,"ebitda":20.0,
                "ev_to_revenue":3.0,"ev_to_ebitda":10.0,"net_debt":10.0,
                "shares_outstanding":50.0}"#,
        )
        .unwrap();
        assert_eq!(request.method(), "Comparable Multiples");
        let result = request.evaluate();
        assert_relative_eq!(result.get(&Metric::PricePerShare).unwrap(), 4.8);
    }

    #[test]
    fn test_struct_variant() {
        let request: ValuationRequest =
            serde_json::from_str(r#"{"method":"price_to_earnings","price":30.0,"eps":0.0}"#)
                .unwrap();
        assert_eq!(request.evaluate().get(&Metric::PriceToEarnings), Some(0.0));
    }

    #[test]
    fn test_dcf_request_defaults_horizon() {
        let request: ValuationRequest = serde_json::from_str(
            r#"{"method":"discounted_cash_flow","base_free_cash_flow":14.0,
                "growth_rate":0.05,"discount_rate":0.10,
                "terminal":{"kind":"exit_multiple","multiple":12.0},
                "shares_outstanding":1.0}"#,
        )
        .unwrap();
        match &request {
            ValuationRequest::DiscountedCashFlow(inputs) => assert_eq!(inputs.forecast_years, 5),
            other => panic!("unexpected request {other:?}"),
        }
        let ev = request.evaluate().get(&Metric::EnterpriseValue).unwrap();
        assert!((ev - 194.15).abs() < 1e-2);
    }

    #[test]
    fn test_sotp_round_trip() {
        let request = ValuationRequest::SumOfTheParts {
            segments: vec![Segment::new("A", 1.0), Segment::new("B", 2.0)],
        };
        let json = serde_json::to_string(&request).unwrap();
        let parsed: ValuationRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, request);
        assert_eq!(parsed.evaluate().get(&Metric::Total), Some(3.0));
    }
}
