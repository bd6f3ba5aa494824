//! Precedent transactions command.

use anyhow::Result;
use clap::{Args, ValueEnum};
use valuation::{LoadedSnapshot, ValuationRequest};
use valuation::models::PrecedentInputs;

use super::{Context, resolve, run_request};
use crate::data;

/// Which metric the deal multiples apply to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum DealMetric {
    /// EV/EBITDA deals
    #[default]
    Ebitda,
    /// EV/Revenue deals
    Revenue,
}

/// Arguments for the precedents command.
#[derive(Args, Debug)]
pub(crate) struct PrecedentsArgs {
    /// Prefill the target metric, net debt and shares from this ticker
    #[arg(short, long)]
    pub(crate) ticker: Option<String>,

    /// Deal multiples, comma separated
    #[arg(short, long, value_delimiter = ',', required = true)]
    pub(crate) multiples: Vec<f64>,

    /// Metric the multiples apply to
    #[arg(long, value_enum, default_value = "ebitda")]
    pub(crate) basis: DealMetric,

    /// Target's value of the metric
    #[arg(long)]
    pub(crate) metric: Option<f64>,

    /// Net debt
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) net_debt: Option<f64>,

    /// Shares outstanding
    #[arg(long)]
    pub(crate) shares: Option<f64>,
}

/// Execute the precedents command.
pub(crate) async fn execute(args: PrecedentsArgs, ctx: &Context) -> Result<()> {
    let loaded = data::load(args.ticker.as_deref(), ctx.data.as_deref()).await?;
    let loaded = loaded.as_ref();

    let inputs = inputs(&args, loaded);
    run_request(&ValuationRequest::PrecedentTransactions(inputs), loaded, ctx)
}

fn inputs(args: &PrecedentsArgs, loaded: Option<&LoadedSnapshot>) -> PrecedentInputs {
    let target_metric = match args.basis {
        DealMetric::Ebitda => resolve(args.metric, loaded, |l| l.financials.ebitda(), 0.0),
        DealMetric::Revenue => resolve(args.metric, loaded, |l| l.financials.revenue(), 0.0),
    };

    PrecedentInputs {
        target_metric,
        deal_multiples: args.multiples.clone(),
        net_debt: resolve(args.net_debt, loaded, |l| l.financials.net_debt(), 0.0),
        shares_outstanding: resolve(args.shares, loaded, |l| l.quote.shares_outstanding, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::acme_snapshot;

    fn args(basis: DealMetric) -> PrecedentsArgs {
        PrecedentsArgs {
            ticker: Some("ACME".to_string()),
            multiples: vec![8.0, 12.0],
            basis,
            metric: None,
            net_debt: None,
            shares: None,
        }
    }

    #[test]
    fn test_basis_selects_prefilled_metric() {
        let loaded = acme_snapshot();
        let ebitda = inputs(&args(DealMetric::Ebitda), Some(&loaded));
        assert_eq!(ebitda.target_metric, 200.0);
        assert_eq!(ebitda.net_debt, 200.0);
        assert_eq!(ebitda.shares_outstanding, 100.0);
        assert_eq!(ebitda.deal_multiples, [8.0, 12.0]);

        let revenue = inputs(&args(DealMetric::Revenue), Some(&loaded));
        assert_eq!(revenue.target_metric, 1000.0);
    }

    #[test]
    fn test_defaults_without_ticker() {
        let inputs = inputs(&args(DealMetric::Ebitda), None);
        assert_eq!(inputs.target_metric, 0.0);
        assert_eq!(inputs.shares_outstanding, 1.0);
    }
}
