//! Valuation CLI binary.
//!
//! Runs each valuation method from command-line inputs, optionally
//! pre-filled from market data for a ticker.

mod cmd;
mod data;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use cmd::{
    AssetsArgs, CompsArgs, Context, DcfArgs, DdmArgs, EvaluateArgs, LboArgs, PeersArgs,
    PrecedentsArgs, RatiosArgs, SotpArgs,
};

#[derive(Parser)]
#[command(name = "valuation")]
#[command(about = "Company valuation calculator", long_about = None)]
#[command(version, propagate_version = true)]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// JSON file of company data used for tickers FMP cannot serve
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Comparable multiples (EV/Revenue and EV/EBITDA)
    Comps(CompsArgs),

    /// Discounted cash flow
    Dcf(DcfArgs),

    /// Dividend discount model
    Ddm(DdmArgs),

    /// Leveraged buyout returns
    Lbo(LboArgs),

    /// Sum of the parts
    Sotp(SotpArgs),

    /// Precedent transactions
    Precedents(PrecedentsArgs),

    /// Net asset value
    Assets(AssetsArgs),

    /// Market cap, EV/EBITDA and P/E
    Ratios(RatiosArgs),

    /// Peer comparison table
    Peers(PeersArgs),

    /// Evaluate requests from a JSON file
    Evaluate(EvaluateArgs),
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let ctx = Context {
        json: cli.json,
        data: cli.data,
    };

    match cli.command {
        Commands::Comps(args) => cmd::comps::execute(args, &ctx).await?,
        Commands::Dcf(args) => cmd::dcf::execute(args, &ctx).await?,
        Commands::Ddm(args) => cmd::ddm::execute(args, &ctx).await?,
        Commands::Lbo(args) => cmd::lbo::execute(args, &ctx).await?,
        Commands::Sotp(args) => cmd::sotp::execute(args, &ctx)?,
        Commands::Precedents(args) => cmd::precedents::execute(args, &ctx).await?,
        Commands::Assets(args) => cmd::assets::execute(args, &ctx).await?,
        Commands::Ratios(args) => cmd::ratios::execute(args, &ctx).await?,
        Commands::Peers(args) => cmd::peers::execute(args, &ctx).await?,
        Commands::Evaluate(args) => cmd::evaluate::execute(args, &ctx)?,
    }

    Ok(())
}
