//! Peer comparison command.

use anyhow::{Result, bail};
use clap::Args;
use valuation::peers;

use super::Context;
use crate::{data, render};

/// Arguments for the peers command.
#[derive(Args, Debug)]
pub(crate) struct PeersArgs {
    /// Peer tickers, comma or space separated, shown in the given order
    #[arg(value_delimiter = ',', required = true)]
    pub(crate) symbols: Vec<String>,
}

/// Execute the peers command.
pub(crate) async fn execute(args: PeersArgs, ctx: &Context) -> Result<()> {
    let symbols = data::parse_symbols(&args.symbols);
    if symbols.is_empty() {
        bail!("no peer tickers given");
    }

    let client = data::connect(ctx.data.as_deref())?;
    let table = peers::build(&symbols, &client).await;

    if ctx.json {
        println!("{}", serde_json::to_string_pretty(table.rows())?);
    } else {
        println!("\n{}", render::peer_table(&table));
    }
    Ok(())
}
