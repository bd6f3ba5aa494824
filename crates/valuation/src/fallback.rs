//! A market-data client that falls back across several clients.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use valuation_core::{
    CompanyProfile, Financials, MarketDataClient, MarketQuote, Result, Symbol, ValuationError,
};

/// Tries each registered client in order until one succeeds.
///
/// A miss on one client is logged at debug level; the caller decides how to
/// report the final outcome. When every client fails, the last error is
/// returned. With no clients
/// registered every call fails with
/// [`ProviderNotConfigured`](ValuationError::ProviderNotConfigured).
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use valuation::{FallbackClient, FmpClient, InMemoryClient};
///
/// let client = FallbackClient::new()
///     .with_client(Arc::new(FmpClient::from_env()?))
///     .with_client(Arc::new(InMemoryClient::from_companies(saved)));
/// ```
#[derive(Default)]
pub struct FallbackClient {
    clients: Vec<Arc<dyn MarketDataClient>>,
}

impl std::fmt::Debug for FallbackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackClient")
            .field(
                "clients",
                &self.clients.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl FallbackClient {
    /// Create a new client with nothing registered.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a client. Clients are tried in registration order.
    pub fn register(&mut self, client: Arc<dyn MarketDataClient>) {
        debug!(client = client.name(), "Registering market data client");
        self.clients.push(client);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn MarketDataClient>) -> Self {
        self.register(client);
        self
    }

    /// Number of registered clients.
    #[must_use]
    pub fn len(&self) -> usize {
        self.clients.len()
    }

    /// Whether no client is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    fn ensure_configured(&self) -> Result<()> {
        if self.clients.is_empty() {
            return Err(ValuationError::ProviderNotConfigured(
                "No market data clients registered".to_string(),
            ));
        }
        Ok(())
    }
}

fn exhausted(last_error: Option<ValuationError>) -> ValuationError {
    last_error
        .unwrap_or_else(|| ValuationError::Other("All clients failed with no error".to_string()))
}

#[async_trait]
impl MarketDataClient for FallbackClient {
    fn name(&self) -> &str {
        "fallback"
    }

    async fn get_quote(&self, symbol: &Symbol) -> Result<MarketQuote> {
        self.ensure_configured()?;

        let mut last_error = None;
        for client in &self.clients {
            debug!(client = client.name(), symbol = %symbol, "Fetching quote");
            match client.get_quote(symbol).await {
                Ok(quote) => return Ok(quote),
                Err(e) => {
                    debug!(client = client.name(), error = %e, "Client failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(exhausted(last_error))
    }

    async fn get_financials(&self, symbol: &Symbol) -> Result<Financials> {
        self.ensure_configured()?;

        let mut last_error = None;
        for client in &self.clients {
            debug!(client = client.name(), symbol = %symbol, "Fetching financials");
            match client.get_financials(symbol).await {
                Ok(financials) => return Ok(financials),
                Err(e) => {
                    debug!(client = client.name(), error = %e, "Client failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        Err(exhausted(last_error))
    }

    async fn get_profile(&self, symbol: &Symbol) -> Result<CompanyProfile> {
        self.ensure_configured()?;

        let mut last_error = None;
        for client in &self.clients {
            match client.get_profile(symbol).await {
                Ok(profile) => return Ok(profile),
                Err(e) => {
                    debug!(client = client.name(), error = %e, "Profile lookup failed");
                    last_error = Some(e);
                }
            }
        }

        Err(exhausted(last_error))
    }

    async fn get_financials_and_profile(
        &self,
        symbol: &Symbol,
    ) -> (Result<Financials>, Result<CompanyProfile>) {
        if let Err(e) = self.ensure_configured() {
            return (Err(e), Err(ValuationError::SymbolNotFound(symbol.to_string())));
        }

        let mut last_error = None;
        for client in &self.clients {
            debug!(client = client.name(), symbol = %symbol, "Fetching financials and profile");
            match client.get_financials_and_profile(symbol).await {
                (Ok(financials), profile) => return (Ok(financials), profile),
                (Err(e), _) => {
                    debug!(client = client.name(), error = %e, "Client failed, trying next");
                    last_error = Some(e);
                }
            }
        }

        (
            Err(exhausted(last_error)),
            Err(ValuationError::SymbolNotFound(symbol.to_string())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{CompanyData, InMemoryClient};

    fn memory_with(symbol: &str, price: f64) -> Arc<dyn MarketDataClient> {
        Arc::new(InMemoryClient::from_companies([CompanyData {
            symbol: Symbol::new(symbol),
            name: None,
            quote: MarketQuote::new(price, 10.0),
            financials: Financials::default(),
        }]))
    }

    #[tokio::test]
    async fn test_empty_fallback_is_not_configured() {
        let client = FallbackClient::new();
        assert!(client.is_empty());
        let result = client.get_quote(&Symbol::new("AAPL")).await;
        assert!(matches!(
            result,
            Err(ValuationError::ProviderNotConfigured(_))
        ));
    }

    #[tokio::test]
    async fn test_falls_through_to_second_client() {
        let client = FallbackClient::new()
            .with_client(memory_with("AAA", 1.0))
            .with_client(memory_with("BBB", 2.0));
        assert_eq!(client.len(), 2);

        let quote = client.get_quote(&Symbol::new("BBB")).await.unwrap();
        assert_eq!(quote.price, 2.0);
    }

    #[tokio::test]
    async fn test_first_success_wins() {
        let client = FallbackClient::new()
            .with_client(memory_with("AAA", 1.0))
            .with_client(memory_with("AAA", 2.0));
        let quote = client.get_quote(&Symbol::new("AAA")).await.unwrap();
        assert_eq!(quote.price, 1.0);
    }

    #[tokio::test]
    async fn test_all_fail_returns_last_error() {
        let client = FallbackClient::new()
            .with_client(memory_with("AAA", 1.0))
            .with_client(memory_with("BBB", 2.0));
        let result = client.get_financials(&Symbol::new("ZZZ")).await;
        assert!(matches!(result, Err(ValuationError::SymbolNotFound(s)) if s == "ZZZ"));
    }

    #[tokio::test]
    async fn test_financials_and_profile_come_from_same_client() {
        let named = Arc::new(InMemoryClient::from_companies([CompanyData {
            symbol: Symbol::new("BBB"),
            name: Some("Bravo Inc".to_string()),
            quote: MarketQuote::new(2.0, 10.0),
            financials: Financials::default(),
        }]));
        let client = FallbackClient::new()
            .with_client(memory_with("AAA", 1.0))
            .with_client(named);

        let (financials, profile) = client.get_financials_and_profile(&Symbol::new("BBB")).await;
        assert!(financials.is_ok());
        assert_eq!(profile.unwrap().display_name, "Bravo Inc");

        let (financials, profile) = client.get_financials_and_profile(&Symbol::new("ZZZ")).await;
        assert!(matches!(financials, Err(ValuationError::SymbolNotFound(s)) if s == "ZZZ"));
        assert!(profile.is_err());
    }

    #[tokio::test]
    async fn test_empty_fallback_financials_and_profile() {
        let (financials, profile) =
            FallbackClient::new().get_financials_and_profile(&Symbol::new("AAA")).await;
        assert!(matches!(
            financials,
            Err(ValuationError::ProviderNotConfigured(_))
        ));
        assert!(profile.is_err());
    }

    #[test]
    fn test_debug_lists_client_names() {
        let client = FallbackClient::new().with_client(memory_with("AAA", 1.0));
        assert!(format!("{client:?}").contains("memory"));
    }
}
