//! CLI subcommand modules.

use std::path::PathBuf;

use valuation::{LoadedSnapshot, ValuationRequest};

pub(crate) mod assets;
pub(crate) mod comps;
pub(crate) mod dcf;
pub(crate) mod ddm;
pub(crate) mod evaluate;
pub(crate) mod lbo;
pub(crate) mod peers;
pub(crate) mod precedents;
pub(crate) mod ratios;
pub(crate) mod sotp;

pub(crate) use assets::AssetsArgs;
pub(crate) use comps::CompsArgs;
pub(crate) use dcf::DcfArgs;
pub(crate) use ddm::DdmArgs;
pub(crate) use evaluate::EvaluateArgs;
pub(crate) use lbo::LboArgs;
pub(crate) use peers::PeersArgs;
pub(crate) use precedents::PrecedentsArgs;
pub(crate) use ratios::RatiosArgs;
pub(crate) use sotp::SotpArgs;

/// Options shared by every subcommand.
#[derive(Debug, Clone, Default)]
pub(crate) struct Context {
    /// Print results as JSON.
    pub(crate) json: bool,
    /// Company data file used alongside FMP.
    pub(crate) data: Option<PathBuf>,
}

/// Picks an explicit flag value, else the loaded value, else `default`.
pub(crate) fn resolve(
    flag: Option<f64>,
    loaded: Option<&LoadedSnapshot>,
    prefill: impl Fn(&LoadedSnapshot) -> f64,
    default: f64,
) -> f64 {
    flag.or_else(|| loaded.map(prefill)).unwrap_or(default)
}

/// Evaluates a request and prints it.
pub(crate) fn run_request(
    request: &ValuationRequest,
    loaded: Option<&LoadedSnapshot>,
    ctx: &Context,
) -> anyhow::Result<()> {
    let result = request.evaluate();
    crate::render::print_result(
        &crate::render::title(request.method(), loaded),
        &result,
        ctx.json,
    )
}

/// A loaded company with every prefilled field populated.
#[cfg(test)]
pub(crate) fn acme_snapshot() -> LoadedSnapshot {
    use valuation::{Financials, FinancialsSnapshot, MarketQuote, StatementTable, Symbol};

    let financials = Financials {
        income_statement: StatementTable::new()
            .with("revenue", 1000.0)
            .with("ebitda", 200.0)
            .with("eps", 2.5),
        balance_sheet: StatementTable::new()
            .with("totalDebt", 300.0)
            .with("cashAndCashEquivalents", 100.0)
            .with("totalAssets", 2500.0)
            .with("totalLiabilities", 1500.0),
        key_statistics: StatementTable::new().with("dividendYield", 0.03),
        ..Default::default()
    };
    let mut loaded = LoadedSnapshot::degraded(Symbol::new("ACME"), "");
    loaded.failure = None;
    loaded.quote = MarketQuote::new(20.0, 100.0);
    loaded.financials = FinancialsSnapshot::from_financials(&financials);
    loaded
}
