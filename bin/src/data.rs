//! Market data access for the CLI.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;
use valuation::{
    CompanyData, FallbackClient, FmpClient, InMemoryClient, LoadedSnapshot, Symbol, load_snapshot,
};

/// Builds the client used for `--ticker` lookups and peer tables.
///
/// FMP is used when `FMP_API_KEY` is set. Companies from `--data` are tried
/// after it. With neither available every lookup fails and degrades to zeros.
pub(crate) fn connect(data: Option<&Path>) -> Result<FallbackClient> {
    let mut client = FallbackClient::new();

    match FmpClient::from_env() {
        Ok(fmp) => client.register(Arc::new(fmp)),
        Err(e) => debug!(error = %e, "FMP client not configured"),
    }

    if let Some(path) = data {
        let companies = read_companies(path)?;
        debug!(path = %path.display(), count = companies.len(), "Loaded company data file");
        client.register(Arc::new(InMemoryClient::from_companies(companies)));
    }

    Ok(client)
}

/// Reads a JSON array of companies.
pub(crate) fn read_companies(path: &Path) -> Result<Vec<CompanyData>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_companies(&contents)
        .with_context(|| format!("Invalid company data in {}", path.display()))
}

/// Parses company records. Statements a record omits are left empty.
pub(crate) fn parse_companies(contents: &str) -> Result<Vec<CompanyData>> {
    Ok(serde_json::from_str(contents)?)
}

/// Loads the snapshot for `ticker`.
///
/// A failed load is reported once, by the warning [`load_snapshot`] logs.
pub(crate) async fn load(
    ticker: Option<&str>,
    data: Option<&Path>,
) -> Result<Option<LoadedSnapshot>> {
    let Some(ticker) = ticker else {
        return Ok(None);
    };
    let client = connect(data)?;
    Ok(Some(load_snapshot(&client, &Symbol::new(ticker)).await))
}

/// Splits a comma-separated ticker list, dropping empty entries.
pub(crate) fn parse_symbols(symbols: &[String]) -> Vec<Symbol> {
    symbols
        .iter()
        .flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Symbol::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_symbols() {
        let symbols = parse_symbols(&["ko, pep".to_string(), "".to_string(), "KDP".to_string()]);
        let names: Vec<&str> = symbols.iter().map(Symbol::as_str).collect();
        assert_eq!(names, ["KO", "PEP", "KDP"]);
    }

    #[test]
    fn test_read_companies_missing_file() {
        let result = read_companies(Path::new("/nonexistent/companies.json"));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_companies_with_partial_statements() {
        let companies = parse_companies(
            r#"[{"symbol":"acme","name":"Acme Corp",
                 "quote":{"price":20.0,"shares_outstanding":100.0,"timestamp":null},
                 "financials":{"income_statement":{"revenue":[1000.0],"ebitda":[200.0]}}},
                {"symbol":"bare","quote":{"price":5.0,"shares_outstanding":10.0}}]"#,
        )
        .unwrap();
        assert_eq!(companies.len(), 2);
        assert_eq!(companies[0].financials.income_statement.get("ebitda"), 200.0);
        assert!(companies[0].financials.balance_sheet.is_empty());
        assert!(companies[1].financials.income_statement.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_partial_data_file() {
        let path = std::env::temp_dir()
            .join(format!("valuation-partial-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"[{"symbol":"ACME","quote":{"price":20.0,"shares_outstanding":100.0,"timestamp":null},
                 "financials":{"income_statement":{"ebitda":[200.0]}}}]"#,
        )
        .unwrap();

        let loaded = load(Some("acme"), Some(path.as_path())).await.unwrap().unwrap();
        std::fs::remove_file(&path).unwrap();

        assert!(!loaded.is_degraded());
        assert_eq!(loaded.financials.ebitda(), 200.0);
        assert_eq!(loaded.financials.total_debt(), 0.0);
        assert_eq!(loaded.market_cap(), 2000.0);
    }

    #[tokio::test]
    async fn test_load_without_ticker() {
        assert!(load(None, None).await.unwrap().is_none());
    }
}
