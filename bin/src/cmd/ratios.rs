//! Market ratio command: market cap, EV/EBITDA and P/E.

use anyhow::Result;
use clap::Args;
use valuation::models::{EvEbitdaInputs, ev_ebitda, market_cap, price_to_earnings};
use valuation::{LoadedSnapshot, Metric, ValuationResult};

use super::{Context, resolve};
use crate::{data, render};

/// Arguments for the ratios command.
#[derive(Args, Debug)]
pub(crate) struct RatiosArgs {
    /// Prefill every input from this ticker
    #[arg(short, long)]
    pub(crate) ticker: Option<String>,

    /// Share price
    #[arg(long)]
    pub(crate) price: Option<f64>,

    /// Shares outstanding
    #[arg(long)]
    pub(crate) shares: Option<f64>,

    /// Trailing earnings per share
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) eps: Option<f64>,

    /// Total debt
    #[arg(long)]
    pub(crate) debt: Option<f64>,

    /// Cash and equivalents
    #[arg(long)]
    pub(crate) cash: Option<f64>,

    /// EBITDA
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) ebitda: Option<f64>,
}

/// Execute the ratios command.
pub(crate) async fn execute(args: RatiosArgs, ctx: &Context) -> Result<()> {
    let loaded = data::load(args.ticker.as_deref(), ctx.data.as_deref()).await?;
    let loaded = loaded.as_ref();

    let result = ratios(&args, loaded);
    render::print_result(&render::title("Market Ratios", loaded), &result, ctx.json)
}

fn ratios(args: &RatiosArgs, loaded: Option<&LoadedSnapshot>) -> ValuationResult {
    let price = resolve(args.price, loaded, |l| l.quote.price, 0.0);
    let shares = resolve(args.shares, loaded, |l| l.quote.shares_outstanding, 1.0);
    let eps = resolve(args.eps, loaded, |l| l.financials.eps(), 0.0);
    let cap = market_cap(price, shares);

    let ev = ev_ebitda(&EvEbitdaInputs {
        market_cap: cap,
        total_debt: resolve(args.debt, loaded, |l| l.financials.total_debt(), 0.0),
        cash: resolve(args.cash, loaded, |l| l.financials.cash(), 0.0),
        ebitda: resolve(args.ebitda, loaded, |l| l.financials.ebitda(), 0.0),
    });

    ValuationResult::new()
        .with(Metric::MarketCap, cap)
        .with(Metric::EnterpriseValue, ev.enterprise_value)
        .with(Metric::EvToEbitda, ev.ev_to_ebitda)
        .with(Metric::PriceToEarnings, price_to_earnings(price, eps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::acme_snapshot;
    use approx::assert_relative_eq;

    fn args() -> RatiosArgs {
        RatiosArgs {
            ticker: Some("ACME".to_string()),
            price: None,
            shares: None,
            eps: None,
            debt: None,
            cash: None,
            ebitda: None,
        }
    }

    #[test]
    fn test_ratios_from_ticker() {
        let loaded = acme_snapshot();
        let result = ratios(&args(), Some(&loaded));
        assert_relative_eq!(result.get(&Metric::MarketCap).unwrap(), 2000.0);
        assert_relative_eq!(result.get(&Metric::EnterpriseValue).unwrap(), 2200.0);
        assert_relative_eq!(result.get(&Metric::EvToEbitda).unwrap(), 11.0);
        assert_relative_eq!(result.get(&Metric::PriceToEarnings).unwrap(), 8.0);
    }

    #[test]
    fn test_price_flag_overrides_quote() {
        let loaded = acme_snapshot();
        let mut args = args();
        args.price = Some(25.0);
        args.cash = Some(300.0);
        let result = ratios(&args, Some(&loaded));
        assert_relative_eq!(result.get(&Metric::MarketCap).unwrap(), 2500.0);
        assert_relative_eq!(result.get(&Metric::EnterpriseValue).unwrap(), 2500.0);
        assert_relative_eq!(result.get(&Metric::PriceToEarnings).unwrap(), 10.0);
    }
}
