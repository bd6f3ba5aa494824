//! Text and JSON rendering of valuation output.

use anyhow::Result;
use valuation::{LoadedSnapshot, Metric, MetricUnit, PeerTable, ValuationResult};

/// Formats a currency amount as `$1,234.56`.
pub(crate) fn format_currency(value: f64) -> String {
    let rounded = format!("{:.2}", value.abs());
    let (integer, decimal) = rounded.split_once('.').unwrap_or((rounded.as_str(), "00"));
    let sign = if value < 0.0 && rounded != "0.00" { "-" } else { "" };
    format!("{sign}${}.{decimal}", add_thousands_separator(integer))
}

/// Formats a valuation multiple as `12.34x`.
pub(crate) fn format_multiple(value: f64) -> String {
    format!("{value:.2}x")
}

/// Formats a fractional rate as `12.34%`.
pub(crate) fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Formats a metric according to its unit.
pub(crate) fn format_metric(metric: &Metric, value: f64) -> String {
    match metric.unit() {
        MetricUnit::Currency => format_currency(value),
        MetricUnit::Multiple => format_multiple(value),
        MetricUnit::Percent => format_percent(value),
    }
}

fn add_thousands_separator(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().rev().collect();
    chars
        .chunks(3)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(",")
        .chars()
        .rev()
        .collect()
}

/// Renders a result as an aligned two-column table.
pub(crate) fn result_table(title: &str, result: &ValuationResult) -> String {
    let mut output = format!("{title}\n{}\n", "─".repeat(48));
    for (metric, value) in result.iter() {
        output.push_str(&format!(
            "{:<28}{:>20}\n",
            metric.name(),
            format_metric(metric, value)
        ));
    }
    output
}

/// Prints a result, as JSON when requested.
pub(crate) fn print_result(title: &str, result: &ValuationResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        println!("\n{}", result_table(title, result));
    }
    Ok(())
}

/// Title line naming the company when one was loaded.
pub(crate) fn title(method: &str, loaded: Option<&LoadedSnapshot>) -> String {
    match loaded {
        Some(l) if l.profile.display_name != l.symbol.as_str() => {
            format!("{method}: {} ({})", l.profile.display_name, l.symbol)
        }
        Some(l) => format!("{method}: {}", l.symbol),
        None => method.to_string(),
    }
}

/// Renders the peer comparison table.
pub(crate) fn peer_table(table: &PeerTable) -> String {
    let mut output = format!(
        "{:<8} {:<28} {:>12} {:>20} {:>20} {:>10} {:>10}\n",
        "Symbol", "Name", "Price", "Market Cap", "EV", "EV/EBITDA", "P/E"
    );
    output.push_str(&"─".repeat(114));
    output.push('\n');
    for row in table.rows() {
        let name: String = row.name.chars().take(28).collect();
        output.push_str(&format!(
            "{:<8} {:<28} {:>12} {:>20} {:>20} {:>10} {:>10}\n",
            row.symbol.as_str(),
            name,
            format_currency(row.price),
            format_currency(row.market_cap),
            format_currency(row.enterprise_value),
            format_multiple(row.ev_to_ebitda),
            format_multiple(row.pe_ratio),
        ));
    }
    if let Some(median) = table.median_ev_to_ebitda() {
        output.push_str(&format!("\nMedian EV/EBITDA: {}\n", format_multiple(median)));
    }
    if let Some(median) = table.median_pe() {
        output.push_str(&format!("Median P/E:       {}\n", format_multiple(median)));
    }
    output
}
