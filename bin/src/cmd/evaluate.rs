//! Evaluates valuation requests read from a JSON file.

use anyhow::{Context as _, Result};
use clap::Args;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use valuation::ValuationRequest;

use super::{Context, run_request};

/// Arguments for the evaluate command.
#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// JSON file holding one request object or an array of them
    pub(crate) file: PathBuf,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RequestFile {
    One(ValuationRequest),
    Many(Vec<ValuationRequest>),
}

/// Reads the requests in file order.
pub(crate) fn read_requests(path: &Path) -> Result<Vec<ValuationRequest>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    parse_requests(&contents).with_context(|| format!("Invalid request in {}", path.display()))
}

fn parse_requests(contents: &str) -> Result<Vec<ValuationRequest>> {
    Ok(match serde_json::from_str(contents)? {
        RequestFile::One(request) => vec![request],
        RequestFile::Many(requests) => requests,
    })
}

/// Execute the evaluate command.
pub(crate) fn execute(args: EvaluateArgs, ctx: &Context) -> Result<()> {
    for request in read_requests(&args.file)? {
        run_request(&request, None, ctx)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use valuation::Metric;

    #[test]
    fn test_parse_single_request() {
        let requests =
            parse_requests(r#"{"method":"price_to_earnings","price":30.0,"eps":2.0}"#).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].evaluate().get(&Metric::PriceToEarnings), Some(15.0));
    }

    #[test]
    fn test_parse_request_list_keeps_order() {
        let requests = parse_requests(
            r#"[{"method":"market_cap","price":10.0,"shares_outstanding":5.0},
                {"method":"sum_of_the_parts","segments":[{"name":"A","value":1.0}]}]"#,
        )
        .unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method(), "Market Capitalization");
        assert_eq!(requests[1].method(), "Sum of the Parts");
    }

    #[test]
    fn test_parse_unknown_method() {
        assert!(parse_requests(r#"{"method":"astrology"}"#).is_err());
    }
}
