//! Sum-of-the-parts command.

use anyhow::{Result, anyhow};
use clap::Args;
use valuation::ValuationRequest;
use valuation::models::Segment;

use super::{Context, run_request};

/// Arguments for the sotp command.
#[derive(Args, Debug)]
pub(crate) struct SotpArgs {
    /// Segment as NAME=VALUE, repeatable and kept in order
    #[arg(short, long = "segment", value_parser = parse_segment, required = true)]
    pub(crate) segments: Vec<Segment>,
}

/// Parses `NAME=VALUE`.
pub(crate) fn parse_segment(s: &str) -> Result<Segment> {
    let (name, value) = s
        .rsplit_once('=')
        .ok_or_else(|| anyhow!("expected NAME=VALUE, got '{s}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(anyhow!("segment name is empty in '{s}'"));
    }
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| anyhow!("invalid value in '{s}': {e}"))?;
    Ok(Segment::new(name, value))
}

/// Execute the sotp command.
pub(crate) fn execute(args: SotpArgs, ctx: &Context) -> Result<()> {
    run_request(
        &ValuationRequest::SumOfTheParts {
            segments: args.segments,
        },
        None,
        ctx,
    )
}
