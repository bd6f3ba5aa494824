//! Leveraged buyout command.

use anyhow::Result;
use clap::Args;
use valuation::models::LboInputs;
use valuation::{LoadedSnapshot, ValuationAssumptions, ValuationRequest};

use super::{Context, resolve, run_request};
use crate::data;

/// Arguments for the lbo command.
#[derive(Args, Debug)]
pub(crate) struct LboArgs {
    /// Prefill purchase EV and exit EBITDA from this ticker
    #[arg(short, long)]
    pub(crate) ticker: Option<String>,

    /// Purchase enterprise value
    #[arg(long)]
    pub(crate) purchase_ev: Option<f64>,

    /// Acquisition debt
    #[arg(long, default_value = "0.0")]
    pub(crate) debt: f64,

    /// Interest rate on the acquisition debt
    #[arg(long, default_value = "0.08")]
    pub(crate) interest: f64,

    /// EBITDA at exit
    #[arg(long)]
    pub(crate) exit_ebitda: Option<f64>,

    /// Exit EV/EBITDA multiple
    #[arg(long, default_value = "10.0")]
    pub(crate) exit_multiple: f64,

    /// Hold period in years
    #[arg(short = 'n', long, default_value = "5")]
    pub(crate) years: u32,
}

/// Execute the lbo command.
pub(crate) async fn execute(args: LboArgs, ctx: &Context) -> Result<()> {
    ValuationAssumptions {
        interest_rate: args.interest,
        exit_multiple: args.exit_multiple,
        hold_years: args.years,
        ..Default::default()
    }
    .validate()?;

    let loaded = data::load(args.ticker.as_deref(), ctx.data.as_deref()).await?;
    let loaded = loaded.as_ref();

    let inputs = inputs(&args, loaded);
    run_request(&ValuationRequest::LeveragedBuyout(inputs), loaded, ctx)
}

/// Purchase EV defaults to the target's market cap plus net debt.
fn inputs(args: &LboArgs, loaded: Option<&LoadedSnapshot>) -> LboInputs {
    LboInputs {
        purchase_enterprise_value: resolve(
            args.purchase_ev,
            loaded,
            |l| l.market_cap() + l.financials.net_debt(),
            0.0,
        ),
        debt_used: args.debt,
        interest_rate: args.interest,
        exit_ebitda: resolve(args.exit_ebitda, loaded, |l| l.financials.ebitda(), 0.0),
        exit_multiple: args.exit_multiple,
        hold_years: args.years,
    }
}
