//! The market-data client contract.
//!
//! The valuation core never performs I/O itself. Anything that can supply a
//! quote, raw statements and a profile for a symbol implements
//! [`MarketDataClient`]; absent statement rows are expected and are handled
//! by the [`statement`](crate::statement) accessor rather than here.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::Result,
    statement::Financials,
    types::{CompanyProfile, FinancialsSnapshot, MarketQuote, Symbol},
};

/// Source of market data for valuation inputs.
#[async_trait]
pub trait MarketDataClient: Send + Sync + Debug {
    /// Returns the name of this client (e.g., "FMP").
    fn name(&self) -> &str;

    /// Fetches the latest price and shares outstanding.
    ///
    /// Fails with [`SymbolNotFound`](crate::ValuationError::SymbolNotFound)
    /// for unknown identifiers.
    async fn get_quote(&self, symbol: &Symbol) -> Result<MarketQuote>;

    /// Fetches the most recent income statement, balance sheet and cash-flow
    /// statement as sparse tables.
    async fn get_financials(&self, symbol: &Symbol) -> Result<Financials>;

    /// Fetches company display metadata.
    async fn get_profile(&self, symbol: &Symbol) -> Result<CompanyProfile>;

    /// Fetches financials and the profile for the same symbol.
    ///
    /// Default implementation runs both lookups concurrently. Clients whose
    /// financials already require the profile override this to fetch it once.
    async fn get_financials_and_profile(
        &self,
        symbol: &Symbol,
    ) -> (Result<Financials>, Result<CompanyProfile>) {
        futures::join!(self.get_financials(symbol), self.get_profile(symbol))
    }

    /// Fetches financials and normalises them into a snapshot.
    ///
    /// Default implementation calls [`get_financials`](Self::get_financials)
    /// and runs the result through the safe field accessor.
    async fn get_snapshot(&self, symbol: &Symbol) -> Result<FinancialsSnapshot> {
        let financials = self.get_financials(symbol).await?;
        Ok(FinancialsSnapshot::from_financials(&financials))
    }
}
