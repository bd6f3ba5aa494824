//! Dividend discount command.

use anyhow::Result;
use clap::Args;
use valuation::models::DdmInputs;
use valuation::{LoadedSnapshot, ValuationAssumptions, ValuationRequest};

use super::{Context, resolve, run_request};
use crate::data;

/// Arguments for the ddm command.
#[derive(Args, Debug)]
pub(crate) struct DdmArgs {
    /// Prefill price and dividend yield from this ticker
    #[arg(short, long)]
    pub(crate) ticker: Option<String>,

    /// Share price
    #[arg(long)]
    pub(crate) price: Option<f64>,

    /// Dividend yield as a fraction, e.g. 0.03
    #[arg(long = "yield")]
    pub(crate) dividend_yield: Option<f64>,

    /// Dividend growth rate
    #[arg(short, long, default_value = "0.05", allow_negative_numbers = true)]
    pub(crate) growth: f64,

    /// Discount rate
    #[arg(short, long, default_value = "0.10")]
    pub(crate) discount: f64,
}

/// Execute the ddm command.
pub(crate) async fn execute(args: DdmArgs, ctx: &Context) -> Result<()> {
    ValuationAssumptions {
        growth_rate: args.growth,
        discount_rate: args.discount,
        ..Default::default()
    }
    .validate()?;

    let loaded = data::load(args.ticker.as_deref(), ctx.data.as_deref()).await?;
    let loaded = loaded.as_ref();

    let inputs = inputs(&args, loaded);
    run_request(&ValuationRequest::DividendDiscount(inputs), loaded, ctx)
}

fn inputs(args: &DdmArgs, loaded: Option<&LoadedSnapshot>) -> DdmInputs {
    DdmInputs {
        price: resolve(args.price, loaded, |l| l.quote.price, 0.0),
        dividend_yield: resolve(
            args.dividend_yield,
            loaded,
            |l| l.financials.dividend_yield(),
            0.0,
        ),
        growth_rate: args.growth,
        discount_rate: args.discount,
    }
}
