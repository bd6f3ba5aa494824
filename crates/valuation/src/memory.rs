//! In-memory market-data client.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use valuation_core::{
    CompanyProfile, Financials, MarketDataClient, MarketQuote, Result, Symbol, ValuationError,
};

/// Everything known about one company, as entered by hand or loaded from a
/// file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CompanyData {
    /// Stock symbol.
    pub symbol: Symbol,
    /// Display name; the ticker is used when absent.
    #[serde(default)]
    pub name: Option<String>,
    /// Latest quote.
    pub quote: MarketQuote,
    /// Raw statements.
    #[serde(default)]
    pub financials: Financials,
}

/// A [`MarketDataClient`] serving data held in memory.
///
/// Useful for manual entry, offline runs and tests. Data is stored in
/// `RwLock`-protected `HashMap`s and cloned on every read. Lookups for a
/// symbol that was never added fail with
/// [`SymbolNotFound`](ValuationError::SymbolNotFound).
#[derive(Debug, Default)]
pub struct InMemoryClient {
    quotes: RwLock<HashMap<Symbol, MarketQuote>>,
    financials: RwLock<HashMap<Symbol, Financials>>,
    profiles: RwLock<HashMap<Symbol, CompanyProfile>>,
}

impl InMemoryClient {
    /// Create a new empty client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a client pre-loaded with companies.
    #[must_use]
    pub fn from_companies(companies: impl IntoIterator<Item = CompanyData>) -> Self {
        companies
            .into_iter()
            .fold(Self::new(), |client, company| client.with_company(company))
    }

    /// Adds a company.
    #[must_use]
    pub fn with_company(mut self, company: CompanyData) -> Self {
        let profile = match company.name {
            Some(name) => CompanyProfile::new(company.symbol.clone(), name),
            None => CompanyProfile::fallback(&company.symbol),
        };
        self.quotes
            .get_mut()
            .insert(company.symbol.clone(), company.quote);
        self.financials
            .get_mut()
            .insert(company.symbol.clone(), company.financials);
        self.profiles.get_mut().insert(company.symbol, profile);
        self
    }

    /// Stores or replaces a quote.
    pub async fn put_quote(&self, symbol: Symbol, quote: MarketQuote) {
        self.quotes.write().await.insert(symbol, quote);
    }

    /// Stores or replaces raw statements.
    pub async fn put_financials(&self, symbol: Symbol, financials: Financials) {
        self.financials.write().await.insert(symbol, financials);
    }

    /// Stores or replaces a profile.
    pub async fn put_profile(&self, profile: CompanyProfile) {
        self.profiles
            .write()
            .await
            .insert(profile.symbol.clone(), profile);
    }
}

#[async_trait]
impl MarketDataClient for InMemoryClient {
    fn name(&self) -> &str {
        "memory"
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn get_quote(&self, symbol: &Symbol) -> Result<MarketQuote> {
        let quotes = self.quotes.read().await;
        match quotes.get(symbol) {
            Some(quote) => Ok(quote.clone()),
            None => {
                debug!("No quote held in memory");
                Err(ValuationError::SymbolNotFound(symbol.to_string()))
            }
        }
    }

    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn get_financials(&self, symbol: &Symbol) -> Result<Financials> {
        let financials = self.financials.read().await;
        match financials.get(symbol) {
            Some(f) => Ok(f.clone()),
            None => {
                debug!("No financials held in memory");
                Err(ValuationError::SymbolNotFound(symbol.to_string()))
            }
        }
    }

    async fn get_profile(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        self.profiles
            .read()
            .await
            .get(symbol)
            .cloned()
            .ok_or_else(|| ValuationError::SymbolNotFound(symbol.to_string()))
    }
}
