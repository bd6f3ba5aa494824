//! Discounted cash flow command.

use anyhow::Result;
use clap::{Args, ValueEnum};
use valuation::models::{
    CapmInputs, DcfInputs, DcfValuation, TerminalValueMethod, cost_of_equity,
    discounted_cash_flow,
};
use valuation::{ValuationAssumptions, ValuationResult};

use super::{Context, resolve};
use crate::{data, render};

/// How the value beyond the forecast horizon is estimated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub(crate) enum TerminalKind {
    /// Final cash flow times a multiple
    #[default]
    Exit,
    /// Gordon growth on the final cash flow
    Perpetuity,
}

/// Arguments for the dcf command.
#[derive(Args, Debug)]
pub(crate) struct DcfArgs {
    /// Prefill free cash flow, debt, cash and shares from this ticker
    #[arg(short, long)]
    pub(crate) ticker: Option<String>,

    /// Current free cash flow
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) fcf: Option<f64>,

    /// Annual growth rate
    #[arg(short, long, default_value = "0.05", allow_negative_numbers = true)]
    pub(crate) growth: f64,

    /// Discount rate (ignored when --risk-free is given)
    #[arg(short, long, default_value = "0.10")]
    pub(crate) discount: f64,

    /// Forecast horizon in years
    #[arg(short = 'n', long, default_value = "5")]
    pub(crate) years: u32,

    /// Terminal value method
    #[arg(long, value_enum, default_value = "exit")]
    pub(crate) terminal: TerminalKind,

    /// Terminal multiple applied to the final cash flow
    #[arg(long, default_value = "12.0")]
    pub(crate) terminal_multiple: f64,

    /// Total debt
    #[arg(long)]
    pub(crate) debt: Option<f64>,

    /// Cash and equivalents
    #[arg(long)]
    pub(crate) cash: Option<f64>,

    /// Shares outstanding
    #[arg(long)]
    pub(crate) shares: Option<f64>,

    /// Risk-free rate; derives the discount rate from CAPM
    #[arg(long)]
    pub(crate) risk_free: Option<f64>,

    /// Equity risk premium used with --risk-free
    #[arg(long, default_value = "0.055")]
    pub(crate) erp: f64,

    /// Equity beta used with --risk-free (default: ticker beta, else 1)
    #[arg(long, allow_negative_numbers = true)]
    pub(crate) beta: Option<f64>,
}

/// Execute the dcf command.
pub(crate) async fn execute(args: DcfArgs, ctx: &Context) -> Result<()> {
    let loaded = data::load(args.ticker.as_deref(), ctx.data.as_deref()).await?;
    let loaded = loaded.as_ref();

    let discount_rate = match args.risk_free {
        Some(risk_free_rate) => {
            let capm = CapmInputs {
                risk_free_rate,
                beta: resolve(args.beta, loaded, |l| l.financials.beta(), 1.0),
                equity_risk_premium: args.erp,
            };
            let rate = cost_of_equity(&capm);
            if !ctx.json {
                println!(
                    "Discount rate from CAPM (beta {:.2}): {}",
                    capm.beta,
                    render::format_percent(rate)
                );
            }
            rate
        }
        None => args.discount,
    };

    ValuationAssumptions {
        growth_rate: args.growth,
        discount_rate,
        terminal_multiple: args.terminal_multiple,
        forecast_years: args.years,
        ..Default::default()
    }
    .validate()?;

    let terminal = match args.terminal {
        TerminalKind::Exit => TerminalValueMethod::ExitMultiple {
            multiple: args.terminal_multiple,
        },
        TerminalKind::Perpetuity => TerminalValueMethod::PerpetuityGrowth,
    };

    let inputs = DcfInputs {
        base_free_cash_flow: resolve(args.fcf, loaded, |l| l.financials.free_cash_flow(), 0.0),
        growth_rate: args.growth,
        discount_rate,
        forecast_years: args.years,
        terminal,
        total_debt: resolve(args.debt, loaded, |l| l.financials.total_debt(), 0.0),
        cash: resolve(args.cash, loaded, |l| l.financials.cash(), 0.0),
        shares_outstanding: resolve(args.shares, loaded, |l| l.quote.shares_outstanding, 1.0),
    };

    let valuation = discounted_cash_flow(&inputs);
    let result = ValuationResult::from(&valuation);
    if !ctx.json {
        println!("\n{}", projection_table(&valuation));
    }
    render::print_result(&render::title("Discounted Cash Flow", loaded), &result, ctx.json)
}

fn projection_table(valuation: &DcfValuation) -> String {
    let mut output = format!("{:<6}{:>20}{:>20}\n", "Year", "Free Cash Flow", "Present Value");
    for p in &valuation.projections {
        output.push_str(&format!(
            "{:<6}{:>20}{:>20}\n",
            p.year,
            render::format_currency(p.free_cash_flow),
            render::format_currency(p.present_value)
        ));
    }
    output
}
