//! Comparable-company peer table.

use futures::future::join_all;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use valuation_core::{
    CompanyProfile, FinancialsSnapshot, MarketDataClient, MarketQuote, Result, Symbol,
    ValuationError,
};
use valuation_models::{enterprise_value, ev_to_ebitda, price_to_earnings};

/// Market statistics for one peer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PeerRow {
    /// Ticker as requested.
    pub symbol: Symbol,
    /// Display name, the ticker when unknown.
    pub name: String,
    /// Share price.
    pub price: f64,
    /// Market capitalization.
    pub market_cap: f64,
    /// Enterprise value.
    pub enterprise_value: f64,
    /// EV/EBITDA multiple.
    pub ev_to_ebitda: f64,
    /// Price/earnings ratio.
    pub pe_ratio: f64,
}

impl PeerRow {
    /// The all-zero row reported for a peer whose data could not be loaded.
    #[must_use]
    pub fn zeroed(symbol: &Symbol) -> Self {
        Self {
            symbol: symbol.clone(),
            name: symbol.to_string(),
            price: 0.0,
            market_cap: 0.0,
            enterprise_value: 0.0,
            ev_to_ebitda: 0.0,
            pe_ratio: 0.0,
        }
    }

    /// Computes a row from loaded market data.
    #[must_use]
    pub fn from_market_data(
        symbol: &Symbol,
        name: impl Into<String>,
        quote: &MarketQuote,
        financials: &FinancialsSnapshot,
    ) -> Self {
        let market_cap = quote.market_cap();
        let ev = enterprise_value(market_cap, financials.total_debt(), financials.cash());
        Self {
            symbol: symbol.clone(),
            name: name.into(),
            price: quote.price,
            market_cap,
            enterprise_value: ev,
            ev_to_ebitda: ev_to_ebitda(ev, financials.ebitda()),
            pe_ratio: price_to_earnings(quote.price, financials.eps()),
        }
    }
}

/// Peer rows in the order the peers were requested.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerTable {
    rows: Vec<PeerRow>,
}

impl PeerTable {
    /// Wraps rows as-is.
    #[must_use]
    pub const fn new(rows: Vec<PeerRow>) -> Self {
        Self { rows }
    }

    /// All rows.
    #[must_use]
    pub fn rows(&self) -> &[PeerRow] {
        &self.rows
    }

    /// Consumes the table, returning its rows.
    #[must_use]
    pub fn into_rows(self) -> Vec<PeerRow> {
        self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Median EV/EBITDA over peers with a non-zero multiple.
    #[must_use]
    pub fn median_ev_to_ebitda(&self) -> Option<f64> {
        median(self.rows.iter().map(|r| r.ev_to_ebitda))
    }

    /// Median P/E over peers with a non-zero ratio.
    #[must_use]
    pub fn median_pe(&self) -> Option<f64> {
        median(self.rows.iter().map(|r| r.pe_ratio))
    }

    /// Converts the table into a polars `DataFrame`.
    ///
    /// Columns: `symbol`, `name`, `price`, `market_cap`,
    /// `enterprise_value`, `ev_to_ebitda`, `pe_ratio`.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let symbols: Vec<&str> = self.rows.iter().map(|r| r.symbol.as_str()).collect();
        let names: Vec<&str> = self.rows.iter().map(|r| r.name.as_str()).collect();
        let column = |name: &str, f: fn(&PeerRow) -> f64| {
            Column::new(name.into(), self.rows.iter().map(f).collect::<Vec<f64>>())
        };

        DataFrame::new(vec![
            Column::new("symbol".into(), symbols),
            Column::new("name".into(), names),
            column("price", |r| r.price),
            column("market_cap", |r| r.market_cap),
            column("enterprise_value", |r| r.enterprise_value),
            column("ev_to_ebitda", |r| r.ev_to_ebitda),
            column("pe_ratio", |r| r.pe_ratio),
        ])
        .map_err(|e| ValuationError::Other(e.to_string()))
    }
}

impl IntoIterator for PeerTable {
    type Item = PeerRow;
    type IntoIter = std::vec::IntoIter<PeerRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.into_iter()
    }
}

fn median(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut values: Vec<f64> = values.filter(|v| v.is_finite() && *v != 0.0).collect();
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2.0)
    } else {
        Some(values[mid])
    }
}

async fn fetch_row(client: &dyn MarketDataClient, symbol: &Symbol) -> PeerRow {
    let (quote, (financials, profile)) = tokio::join!(
        client.get_quote(symbol),
        client.get_financials_and_profile(symbol),
    );

    match (quote, financials) {
        (Ok(quote), Ok(financials)) => {
            let name = profile
                .map(|p| p.display_name)
                .unwrap_or_else(|_| CompanyProfile::fallback(symbol).display_name);
            let snapshot = FinancialsSnapshot::from_financials(&financials);
            PeerRow::from_market_data(symbol, name, &quote, &snapshot)
        }
        (Err(e), _) | (_, Err(e)) => {
            warn!(symbol = %symbol, error = %e, "Peer data unavailable, reporting zeros");
            PeerRow::zeroed(symbol)
        }
    }
}

/// Builds the peer table for `peers`, querying them concurrently.
///
/// Output order matches `peers`; duplicates are kept. A peer whose quote or
/// financials cannot be loaded contributes a zero row named by its ticker.
pub async fn build(peers: &[Symbol], client: &dyn MarketDataClient) -> PeerTable {
    debug!(client = client.name(), peer_count = peers.len(), "Building peer table");
    let rows = join_all(peers.iter().map(|symbol| fetch_row(client, symbol))).await;
    PeerTable::new(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{CompanyData, InMemoryClient};
    use approx::assert_relative_eq;
    use valuation_core::{Financials, StatementTable};

    fn company(symbol: &str, price: f64, ebitda: f64, eps: f64) -> CompanyData {
        CompanyData {
            symbol: Symbol::new(symbol),
            name: Some(format!("{symbol} Holdings")),
            quote: MarketQuote::new(price, 10.0),
            financials: Financials {
                income_statement: StatementTable::new()
                    .with("ebitda", ebitda)
                    .with("eps", eps),
                balance_sheet: StatementTable::new()
                    .with("totalDebt", 50.0)
                    .with("cashAndCashEquivalents", 20.0),
                ..Default::default()
            },
        }
    }

    fn client() -> InMemoryClient {
        InMemoryClient::from_companies([
            company("AAA", 10.0, 13.0, 2.0),
            company("BBB", 20.0, 23.0, 4.0),
            company("CCC", 30.0, 0.0, 0.0),
        ])
    }

    #[tokio::test]
    async fn test_empty_peer_list() {
        let table = build(&[], &client()).await;
        assert!(table.is_empty());
        assert_eq!(table.median_ev_to_ebitda(), None);
    }

    #[tokio::test]
    async fn test_rows_follow_input_order() {
        let peers = [Symbol::new("CCC"), Symbol::new("AAA"), Symbol::new("BBB")];
        let table = build(&peers, &client()).await;
        let symbols: Vec<&str> = table.rows().iter().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, ["CCC", "AAA", "BBB"]);

        let aaa = &table.rows()[1];
        assert_eq!(aaa.name, "AAA Holdings");
        assert_relative_eq!(aaa.market_cap, 100.0);
        assert_relative_eq!(aaa.enterprise_value, 130.0);
        assert_relative_eq!(aaa.ev_to_ebitda, 10.0);
        assert_relative_eq!(aaa.pe_ratio, 5.0);

        let ccc = &table.rows()[0];
        assert_eq!(ccc.ev_to_ebitda, 0.0);
        assert_eq!(ccc.pe_ratio, 0.0);
    }

    #[tokio::test]
    async fn test_failed_peer_yields_zero_row() {
        let peers = [Symbol::new("AAA"), Symbol::new("NOPE"), Symbol::new("BBB")];
        let table = build(&peers, &client()).await;
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows()[1], PeerRow::zeroed(&Symbol::new("NOPE")));
        assert_eq!(table.rows()[1].name, "NOPE");
        assert_eq!(table.rows()[2].symbol.as_str(), "BBB");
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let peers = [Symbol::new("AAA"), Symbol::new("AAA")];
        let table = build(&peers, &client()).await;
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0], table.rows()[1]);
    }

    #[tokio::test]
    async fn test_medians_skip_zero_rows() {
        let peers = [
            Symbol::new("AAA"),
            Symbol::new("BBB"),
            Symbol::new("CCC"),
            Symbol::new("NOPE"),
        ];
        let table = build(&peers, &client()).await;
        // AAA: 130 / 13 = 10, BBB: 230 / 23 = 10
        assert_relative_eq!(table.median_ev_to_ebitda().unwrap(), 10.0);
        // AAA: 5, BBB: 5
        assert_relative_eq!(table.median_pe().unwrap(), 5.0);
    }

    #[test]
    fn test_row_from_overflowing_quote_is_finite() {
        let financials = FinancialsSnapshot::from_financials(&Financials {
            income_statement: StatementTable::new().with("ebitda", 10.0).with("eps", 1.0),
            ..Default::default()
        });
        let row = PeerRow::from_market_data(
            &Symbol::new("BIG"),
            "Big Co",
            &MarketQuote::new(f64::MAX, 10.0),
            &financials,
        );
        assert_eq!(row.market_cap, 0.0);
        assert_eq!(row.enterprise_value, 0.0);
        assert_eq!(row.ev_to_ebitda, 0.0);
        assert!(row.pe_ratio.is_finite());
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median([3.0, 1.0, 2.0].into_iter()), Some(2.0));
        assert_eq!(median([4.0, 1.0, 3.0, 2.0].into_iter()), Some(2.5));
        assert_eq!(median([0.0, f64::NAN].into_iter()), None);
    }

    #[tokio::test]
    async fn test_to_dataframe() {
        let peers = [Symbol::new("AAA"), Symbol::new("NOPE")];
        let df = build(&peers, &client()).await.to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 7);
        for name in [
            "symbol",
            "name",
            "price",
            "market_cap",
            "enterprise_value",
            "ev_to_ebitda",
            "pe_ratio",
        ] {
            assert!(df.column(name).is_ok(), "missing column {name}");
        }
        let ev = df
            .column("enterprise_value")
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .clone();
        assert_eq!(ev.get(0), Some(130.0));
        assert_eq!(ev.get(1), Some(0.0));
    }
}
