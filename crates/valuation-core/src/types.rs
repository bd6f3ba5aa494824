//! Core value types shared by the models, the data clients and the CLI.
//!
//! - [`Symbol`] - Trading symbol/ticker
//! - [`FinancialsSnapshot`] - Normalised financial figures for one company
//! - [`MarketQuote`] - Price and share count
//! - [`CompanyProfile`] - Display metadata

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::statement::{Financials, LineItem};

/// Share count used when the real figure is unknown or not positive.
pub const MIN_SHARES_OUTSTANDING: f64 = 1.0;

/// A trading symbol/ticker.
///
/// Symbols are automatically uppercased on creation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a new symbol from a string, converting to uppercase.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into().trim().to_uppercase())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Symbol {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Normalised financial figures for one company.
///
/// Every field is optional; the same-named accessor methods return `0.0` for
/// an absent figure so downstream formulas never see a hole.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialsSnapshot {
    /// End date of the reporting period the figures come from.
    pub period_end: Option<NaiveDate>,
    /// Total revenue.
    pub revenue: Option<f64>,
    /// EBITDA.
    pub ebitda: Option<f64>,
    /// Cash and cash equivalents.
    pub cash: Option<f64>,
    /// Total debt.
    pub total_debt: Option<f64>,
    /// Total stockholders' equity.
    pub total_equity: Option<f64>,
    /// Total assets.
    pub total_assets: Option<f64>,
    /// Total liabilities.
    pub total_liabilities: Option<f64>,
    /// Trailing earnings per share.
    pub eps: Option<f64>,
    /// Dividend yield as a fraction of price.
    pub dividend_yield: Option<f64>,
    /// Equity beta.
    pub beta: Option<f64>,
    /// Free cash flow.
    pub free_cash_flow: Option<f64>,
}

impl FinancialsSnapshot {
    /// The all-zero snapshot used when retrieval fails.
    #[must_use]
    pub fn zeroed() -> Self {
        Self::default()
    }

    /// Normalises raw statements through the safe field accessor.
    #[must_use]
    pub fn from_financials(financials: &Financials) -> Self {
        Self {
            period_end: financials.period_end,
            revenue: financials.line_item(LineItem::Revenue),
            ebitda: financials.line_item(LineItem::Ebitda),
            cash: financials.line_item(LineItem::Cash),
            total_debt: financials.line_item(LineItem::TotalDebt),
            total_equity: financials.line_item(LineItem::TotalEquity),
            total_assets: financials.line_item(LineItem::TotalAssets),
            total_liabilities: financials.line_item(LineItem::TotalLiabilities),
            eps: financials.line_item(LineItem::EarningsPerShare),
            dividend_yield: financials.line_item(LineItem::DividendYield),
            beta: financials.line_item(LineItem::Beta),
            free_cash_flow: financials.line_item(LineItem::FreeCashFlow),
        }
    }

    /// Revenue, or `0.0`.
    #[must_use]
    pub fn revenue(&self) -> f64 {
        self.revenue.unwrap_or_default()
    }

    /// EBITDA, or `0.0`.
    #[must_use]
    pub fn ebitda(&self) -> f64 {
        self.ebitda.unwrap_or_default()
    }

    /// Cash, or `0.0`.
    #[must_use]
    pub fn cash(&self) -> f64 {
        self.cash.unwrap_or_default()
    }

    /// Total debt, or `0.0`.
    #[must_use]
    pub fn total_debt(&self) -> f64 {
        self.total_debt.unwrap_or_default()
    }

    /// Total equity, or `0.0`.
    #[must_use]
    pub fn total_equity(&self) -> f64 {
        self.total_equity.unwrap_or_default()
    }

    /// Total assets, or `0.0`.
    #[must_use]
    pub fn total_assets(&self) -> f64 {
        self.total_assets.unwrap_or_default()
    }

    /// Total liabilities, or `0.0`.
    #[must_use]
    pub fn total_liabilities(&self) -> f64 {
        self.total_liabilities.unwrap_or_default()
    }

    /// Trailing EPS, or `0.0`.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps.unwrap_or_default()
    }

    /// Dividend yield, or `0.0`.
    #[must_use]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield.unwrap_or_default()
    }

    /// Beta, or `0.0`.
    #[must_use]
    pub fn beta(&self) -> f64 {
        self.beta.unwrap_or_default()
    }

    /// Free cash flow, or `0.0`.
    #[must_use]
    pub fn free_cash_flow(&self) -> f64 {
        self.free_cash_flow.unwrap_or_default()
    }

    /// Net debt: total debt minus cash.
    #[must_use]
    pub fn net_debt(&self) -> f64 {
        let net = self.total_debt() - self.cash();
        if net.is_finite() { net } else { 0.0 }
    }
}

/// Latest price and share count for one company.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketQuote {
    /// Current share price.
    pub price: f64,
    /// Shares outstanding, never below [`MIN_SHARES_OUTSTANDING`].
    pub shares_outstanding: f64,
    /// Time the quote was observed.
    pub timestamp: Option<DateTime<Utc>>,
}

impl MarketQuote {
    /// Creates a quote, clamping degenerate inputs.
    ///
    /// A negative or non-finite price becomes `0.0`; a share count that is
    /// not a positive finite number becomes [`MIN_SHARES_OUTSTANDING`].
    #[must_use]
    pub fn new(price: f64, shares_outstanding: f64) -> Self {
        let price = if price.is_finite() && price > 0.0 {
            price
        } else {
            0.0
        };
        let shares_outstanding = if shares_outstanding.is_finite() && shares_outstanding > 0.0 {
            shares_outstanding
        } else {
            MIN_SHARES_OUTSTANDING
        };
        Self {
            price,
            shares_outstanding,
            timestamp: None,
        }
    }

    /// Sets the observation time.
    #[must_use]
    pub const fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Price times shares outstanding.
    #[must_use]
    pub fn market_cap(&self) -> f64 {
        let cap = self.price * self.shares_outstanding;
        if cap.is_finite() { cap } else { 0.0 }
    }
}

impl Default for MarketQuote {
    fn default() -> Self {
        Self::new(0.0, MIN_SHARES_OUTSTANDING)
    }
}

/// Company display metadata.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyProfile {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Name shown to users.
    pub display_name: String,
    /// Business sector.
    pub sector: Option<String>,
    /// Industry within the sector.
    pub industry: Option<String>,
    /// Reporting currency.
    pub currency: Option<String>,
}

impl CompanyProfile {
    /// Creates a profile with the required fields.
    #[must_use]
    pub fn new(symbol: Symbol, display_name: impl Into<String>) -> Self {
        Self {
            symbol,
            display_name: display_name.into(),
            sector: None,
            industry: None,
            currency: None,
        }
    }

    /// Profile whose display name is just the ticker.
    #[must_use]
    pub fn fallback(symbol: &Symbol) -> Self {
        Self::new(symbol.clone(), symbol.as_str())
    }

    /// Sets the sector.
    #[must_use]
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    /// Sets the industry.
    #[must_use]
    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    /// Sets the currency.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statement::StatementTable;

    #[test]
    fn test_symbol_uppercases() {
        assert_eq!(Symbol::new(" msft ").as_str(), "MSFT");
        assert_eq!("aapl".parse::<Symbol>().unwrap(), Symbol::from("AAPL"));
    }

    #[test]
    fn test_quote_clamps_shares() {
        assert_eq!(MarketQuote::new(10.0, 0.0).shares_outstanding, 1.0);
        assert_eq!(MarketQuote::new(10.0, -5.0).shares_outstanding, 1.0);
        assert_eq!(MarketQuote::new(10.0, f64::NAN).shares_outstanding, 1.0);
        assert_eq!(MarketQuote::new(-1.0, 50.0).price, 0.0);
        assert_eq!(MarketQuote::new(4.0, 50.0).market_cap(), 200.0);
    }

    #[test]
    fn test_zeroed_snapshot() {
        let snapshot = FinancialsSnapshot::zeroed();
        assert_eq!(snapshot.revenue(), 0.0);
        assert_eq!(snapshot.net_debt(), 0.0);
        assert!(snapshot.beta.is_none());
    }

    #[test]
    fn test_snapshot_from_financials() {
        let financials = Financials {
            income_statement: StatementTable::new()
                .with("revenue", 100.0)
                .with("ebitda", 20.0)
                .with("eps", "2.5"),
            balance_sheet: StatementTable::new()
                .with("cashAndCashEquivalents", 15.0)
                .with("totalDebt", 25.0)
                .with("totalAssets", 300.0)
                .with("totalLiabilities", "unknown"),
            key_statistics: StatementTable::new().with("beta", 1.2),
            ..Default::default()
        };
        let snapshot = FinancialsSnapshot::from_financials(&financials);
        assert_eq!(snapshot.revenue(), 100.0);
        assert_eq!(snapshot.ebitda(), 20.0);
        assert_eq!(snapshot.eps(), 2.5);
        assert_eq!(snapshot.net_debt(), 10.0);
        assert_eq!(snapshot.total_liabilities, None);
        assert_eq!(snapshot.total_liabilities(), 0.0);
        assert_eq!(snapshot.beta(), 1.2);
        assert_eq!(snapshot.free_cash_flow(), 0.0);
    }

    #[test]
    fn test_profile_fallback() {
        let symbol = Symbol::new("nvda");
        let profile = CompanyProfile::fallback(&symbol).with_currency("USD");
        assert_eq!(profile.display_name, "NVDA");
        assert_eq!(profile.currency.as_deref(), Some("USD"));
    }
}
