//! Asset-based valuation command.

use anyhow::Result;
use clap::Args;
use valuation::{LoadedSnapshot, ValuationRequest};
use valuation::models::AssetBasedInputs;

use super::{Context, resolve, run_request};
use crate::data;

/// Arguments for the assets command.
#[derive(Args, Debug)]
pub(crate) struct AssetsArgs {
    /// Prefill the balance sheet from this ticker
    #[arg(short, long)]
    pub(crate) ticker: Option<String>,

    /// Total assets
    #[arg(long)]
    pub(crate) assets: Option<f64>,

    /// Total liabilities
    #[arg(long)]
    pub(crate) liabilities: Option<f64>,

    /// Shares outstanding, to report NAV per share
    #[arg(long)]
    pub(crate) shares: Option<f64>,
}

/// Execute the assets command.
pub(crate) async fn execute(args: AssetsArgs, ctx: &Context) -> Result<()> {
    let loaded = data::load(args.ticker.as_deref(), ctx.data.as_deref()).await?;
    let loaded = loaded.as_ref();

    let inputs = inputs(&args, loaded);
    run_request(&ValuationRequest::AssetBased(inputs), loaded, ctx)
}

fn inputs(args: &AssetsArgs, loaded: Option<&LoadedSnapshot>) -> AssetBasedInputs {
    AssetBasedInputs {
        total_assets: resolve(args.assets, loaded, |l| l.financials.total_assets(), 0.0),
        total_liabilities: resolve(
            args.liabilities,
            loaded,
            |l| l.financials.total_liabilities(),
            0.0,
        ),
        shares_outstanding: args
            .shares
            .or_else(|| loaded.map(|l| l.quote.shares_outstanding)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::acme_snapshot;

    #[test]
    fn test_prefill_balance_sheet_and_shares() {
        let loaded = acme_snapshot();
        let args = AssetsArgs {
            ticker: Some("ACME".to_string()),
            assets: None,
            liabilities: Some(1000.0),
            shares: None,
        };
        let inputs = inputs(&args, Some(&loaded));
        assert_eq!(inputs.total_assets, 2500.0);
        assert_eq!(inputs.total_liabilities, 1000.0);
        assert_eq!(inputs.shares_outstanding, Some(100.0));
    }

    #[test]
    fn test_no_shares_without_ticker() {
        let args = AssetsArgs {
            ticker: None,
            assets: Some(10.0),
            liabilities: Some(4.0),
            shares: None,
        };
        let inputs = inputs(&args, None);
        assert_eq!(inputs.total_assets, 10.0);
        assert_eq!(inputs.shares_outstanding, None);
    }
}
