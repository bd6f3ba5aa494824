//! Comparable multiples command.

use anyhow::Result;
use clap::Args;
use valuation::assumptions::{MULTIPLE_RANGE, check_f64};
use valuation::models::ComparablesInputs;
use tracing::warn;
use valuation::{LoadedSnapshot, ValuationRequest, peers};

use super::{Context, resolve, run_request};
use crate::data;

/// Arguments for the comps command.
#[derive(Args, Debug)]
pub(crate) struct CompsArgs {
    /// Prefill revenue, EBITDA, net debt and shares from this ticker
    #[arg(short, long)]
    pub(crate) ticker: Option<String>,

    /// Revenue (default 100)
    #[arg(long)]
    pub(crate) revenue: Option<f64>,

    /// EBITDA (default 20)
    #[arg(long)]
    pub(crate) ebitda: Option<f64>,

    /// Net debt, total debt minus cash (default 10)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) net_debt: Option<f64>,

    /// Shares outstanding (default 50)
    #[arg(long)]
    pub(crate) shares: Option<f64>,

    /// EV/Revenue multiple
    #[arg(long, default_value = "3.0")]
    pub(crate) ev_revenue: f64,

    /// EV/EBITDA multiple (default 10, or the peer median when --peers is given)
    #[arg(long)]
    pub(crate) ev_ebitda: Option<f64>,

    /// Peer tickers whose median EV/EBITDA is used as the multiple
    #[arg(long, value_delimiter = ',')]
    pub(crate) peers: Vec<String>,
}

/// Multiple used when neither `--ev-ebitda` nor a usable peer median is given.
const DEFAULT_EV_TO_EBITDA: f64 = 10.0;

/// Execute the comps command.
pub(crate) async fn execute(args: CompsArgs, ctx: &Context) -> Result<()> {
    check_f64("ev_revenue", args.ev_revenue, &MULTIPLE_RANGE)?;
    if let Some(multiple) = args.ev_ebitda {
        check_f64("ev_ebitda", multiple, &MULTIPLE_RANGE)?;
    }

    let median = match args.ev_ebitda {
        Some(_) => None,
        None => peer_median(&args.peers, ctx).await?,
    };
    let ev_to_ebitda = choose_ev_to_ebitda(args.ev_ebitda, median);

    let loaded = data::load(args.ticker.as_deref(), ctx.data.as_deref()).await?;
    let loaded = loaded.as_ref();

    let request = ValuationRequest::ComparableMultiples(inputs(&args, ev_to_ebitda, loaded));
    run_request(&request, loaded, ctx)
}

/// The explicit multiple, else the peer median when it is a usable multiple,
/// else the default.
fn choose_ev_to_ebitda(flag: Option<f64>, median: Option<f64>) -> f64 {
    if let Some(multiple) = flag {
        return multiple;
    }
    match median {
        Some(m) if check_f64("peer median EV/EBITDA", m, &MULTIPLE_RANGE).is_ok() => m,
        Some(m) => {
            warn!(
                median = m,
                fallback = DEFAULT_EV_TO_EBITDA,
                "Peer median EV/EBITDA out of range, using default multiple"
            );
            DEFAULT_EV_TO_EBITDA
        }
        None => DEFAULT_EV_TO_EBITDA,
    }
}

fn inputs(
    args: &CompsArgs,
    ev_to_ebitda: f64,
    loaded: Option<&LoadedSnapshot>,
) -> ComparablesInputs {
    ComparablesInputs {
        revenue: resolve(args.revenue, loaded, |l| l.financials.revenue(), 100.0),
        ebitda: resolve(args.ebitda, loaded, |l| l.financials.ebitda(), 20.0),
        ev_to_revenue: args.ev_revenue,
        ev_to_ebitda,
        net_debt: resolve(args.net_debt, loaded, |l| l.financials.net_debt(), 10.0),
        shares_outstanding: resolve(args.shares, loaded, |l| l.quote.shares_outstanding, 50.0),
    }
}

async fn peer_median(tickers: &[String], ctx: &Context) -> Result<Option<f64>> {
    let symbols = data::parse_symbols(tickers);
    if symbols.is_empty() {
        return Ok(None);
    }
    let client = data::connect(ctx.data.as_deref())?;
    let table = peers::build(&symbols, &client).await;
    let median = table.median_ev_to_ebitda();
    if !ctx.json {
        if let Some(m) = median {
            println!(
                "Peer median EV/EBITDA over {} peers: {}",
                table.len(),
                crate::render::format_multiple(m)
            );
        }
    }
    Ok(median)
}
