#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/valuation/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Financial Modeling Prep (FMP) market-data client.
//!
//! This crate implements [`MarketDataClient`] for the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API.
//!
//! # Usage
//!
//! ```rust,ignore
//! use valuation_fmp::FmpClient;
//! use valuation_core::{MarketDataClient, Symbol};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!     let symbol = Symbol::new("AAPL");
//!
//!     let quote = client.get_quote(&symbol).await?;
//!     let snapshot = client.get_snapshot(&symbol).await?;
//!     println!("{} EBITDA {}", quote.market_cap(), snapshot.ebitda());
//!
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::env;
use std::fmt;
use valuation_core::{
    CompanyProfile, Financials, MarketDataClient, MarketQuote, Result, StatementTable, Symbol,
    ValuationError,
};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "FMP_API_KEY";

/// Financial Modeling Prep market-data client.
///
/// Provides:
/// - Latest quotes (price, market cap)
/// - Income statements, balance sheets, cash flow statements
/// - Company profiles, including beta and last dividend
#[derive(Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl fmt::Debug for FmpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FmpClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_key)
    }

    /// Create a new FMP client with a custom HTTP client.
    #[must_use]
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: FMP_BASE_URL.to_string(),
        }
    }

    /// Point the client at another deployment of the API.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::ProviderNotConfigured`] if the variable is
    /// not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var(API_KEY_ENV).map_err(|_| {
            ValuationError::ProviderNotConfigured(format!(
                "{API_KEY_ENV} environment variable not set"
            ))
        })?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key appended.
    fn url(&self, endpoint: &str) -> String {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!("{}/{endpoint}{separator}apikey={}", self.base_url, self.api_key)
    }

    /// Make a GET request and parse the JSON response.
    ///
    /// Transport errors are reported without the request URL, which carries
    /// the API key.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        tracing::debug!("FMP request: {}", endpoint);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ValuationError::Network(e.without_url().to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ValuationError::RateLimited {
                provider: "FMP".to_string(),
                retry_after: None,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ValuationError::Network(format!("HTTP {status}: {text}")));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ValuationError::Network(e.without_url().to_string()))?;

        // Check for FMP error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(ValuationError::Network(text));
        }

        serde_json::from_str(&text).map_err(|e| ValuationError::Parse(format!("{e}: {text}")))
    }

    /// Fetch the latest annual period of a statement endpoint as raw rows.
    async fn fetch_statement(
        &self,
        endpoint: &str,
        symbol: &Symbol,
    ) -> Result<Vec<Map<String, Value>>> {
        let endpoint = format!("{endpoint}?symbol={}&period=annual&limit=1", symbol.as_str());
        self.get(&endpoint).await
    }

    /// Fetch the three statements and the profile in parallel.
    ///
    /// The profile supplies the key statistics and is returned alongside so
    /// callers never request it twice.
    async fn fetch_financials(&self, symbol: &Symbol) -> (Result<Financials>, Result<FmpProfile>) {
        let (income_result, balance_result, cash_result, profile_result) = tokio::join!(
            self.fetch_statement("income-statement", symbol),
            self.fetch_statement("balance-sheet-statement", symbol),
            self.fetch_statement("cash-flow-statement", symbol),
            self.fetch_profile(symbol),
        );

        let key_statistics = match &profile_result {
            Ok(profile) => profile.key_statistics(),
            Err(e) => {
                tracing::debug!(symbol = %symbol, error = %e, "FMP profile unavailable");
                StatementTable::new()
            }
        };

        let financials = match (income_result, balance_result, cash_result) {
            (Err(e), Err(_), Err(_)) => Err(e),
            (i, b, c) => financials_from_periods(
                symbol,
                &i.unwrap_or_default(),
                &b.unwrap_or_default(),
                &c.unwrap_or_default(),
                key_statistics,
            ),
        };

        (financials, profile_result)
    }

    /// Fetch company profile from FMP API.
    async fn fetch_profile(&self, symbol: &Symbol) -> Result<FmpProfile> {
        let endpoint = format!("profile?symbol={}", symbol.as_str());
        let profiles: Vec<FmpProfile> = self.get(&endpoint).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| ValuationError::SymbolNotFound(symbol.to_string()))
    }
}

#[async_trait]
impl MarketDataClient for FmpClient {
    fn name(&self) -> &str {
        "FMP"
    }

    async fn get_quote(&self, symbol: &Symbol) -> Result<MarketQuote> {
        let endpoint = format!("quote?symbol={}", symbol.as_str());
        let quotes: Vec<FmpQuote> = self.get(&endpoint).await?;

        quotes
            .first()
            .map(FmpQuote::to_market_quote)
            .ok_or_else(|| ValuationError::SymbolNotFound(symbol.to_string()))
    }

    async fn get_financials(&self, symbol: &Symbol) -> Result<Financials> {
        self.fetch_financials(symbol).await.0
    }

    async fn get_financials_and_profile(
        &self,
        symbol: &Symbol,
    ) -> (Result<Financials>, Result<CompanyProfile>) {
        let (financials, profile) = self.fetch_financials(symbol).await;
        (financials, profile.map(|p| p.to_company_profile(symbol)))
    }

    async fn get_profile(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        let profile = self.fetch_profile(symbol).await?;
        Ok(profile.to_company_profile(symbol))
    }
}

/// Builds [`Financials`] from the latest period of each statement.
fn financials_from_periods(
    symbol: &Symbol,
    income: &[Map<String, Value>],
    balance: &[Map<String, Value>],
    cash: &[Map<String, Value>],
    key_statistics: StatementTable,
) -> Result<Financials> {
    if income.is_empty() && balance.is_empty() && cash.is_empty() {
        return Err(ValuationError::SymbolNotFound(symbol.to_string()));
    }

    Ok(Financials {
        period_end: period_end(income)
            .or_else(|| period_end(balance))
            .or_else(|| period_end(cash)),
        income_statement: StatementTable::from_periods(income),
        balance_sheet: StatementTable::from_periods(balance),
        cash_flow_statement: StatementTable::from_periods(cash),
        key_statistics,
    })
}

/// Reads the `date` field of the most recent period.
fn period_end(periods: &[Map<String, Value>]) -> Option<NaiveDate> {
    periods
        .first()
        .and_then(|p| p.get("date"))
        .and_then(Value::as_str)
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

// ============================================================================
// FMP API Response Types
// ============================================================================

/// FMP Quote response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmpQuote {
    #[allow(dead_code)]
    symbol: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    market_cap: f64,
    #[serde(default)]
    shares_outstanding: Option<f64>,
    #[serde(default)]
    timestamp: Option<i64>,
}

impl FmpQuote {
    /// Shares come from the quote when reported, otherwise market cap / price.
    fn to_market_quote(&self) -> MarketQuote {
        let shares = self.shares_outstanding.unwrap_or(if self.price > 0.0 {
            self.market_cap / self.price
        } else {
            0.0
        });
        let quote = MarketQuote::new(self.price, shares);
        match self.timestamp.and_then(|ts| DateTime::from_timestamp(ts, 0)) {
            Some(ts) => quote.with_timestamp(ts),
            None => quote,
        }
    }
}

/// FMP Company Profile response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FmpProfile {
    #[allow(dead_code)]
    symbol: String,
    #[serde(default)]
    company_name: String,
    #[serde(default)]
    price: f64,
    #[serde(default)]
    beta: Option<f64>,
    #[serde(default)]
    last_dividend: Option<f64>,
    sector: Option<String>,
    industry: Option<String>,
    currency: Option<String>,
}

impl FmpProfile {
    fn to_company_profile(&self, symbol: &Symbol) -> CompanyProfile {
        let mut profile = if self.company_name.trim().is_empty() {
            CompanyProfile::fallback(symbol)
        } else {
            CompanyProfile::new(symbol.clone(), self.company_name.trim())
        };
        if let Some(sector) = self.sector.as_deref().filter(|s| !s.is_empty()) {
            profile = profile.with_sector(sector);
        }
        if let Some(industry) = self.industry.as_deref().filter(|s| !s.is_empty()) {
            profile = profile.with_industry(industry);
        }
        if let Some(currency) = self.currency.as_deref().filter(|s| !s.is_empty()) {
            profile = profile.with_currency(currency);
        }
        profile
    }

    /// Beta and trailing dividend yield as a single-column table.
    fn key_statistics(&self) -> StatementTable {
        let mut table = StatementTable::new();
        if let Some(beta) = self.beta {
            table.insert("beta", beta);
        }
        if let Some(dividend) = self.last_dividend {
            if self.price > 0.0 {
                table.insert("dividendYield", dividend / self.price);
            }
        }
        table
    }
}
