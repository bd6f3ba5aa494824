//! Sparse financial-statement tables and the safe field accessor.
//!
//! Providers deliver statements as loosely typed rows keyed by line-item
//! label. [`StatementTable`] holds those rows verbatim and [`get`] is the one
//! place where they are turned into numbers: a missing table, a missing row,
//! an empty row or a non-numeric cell all read as `0.0`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A sparse statement table: row label to period cells, most recent first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementTable {
    rows: BTreeMap<String, Vec<Value>>,
}

impl StatementTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from per-period JSON objects, most recent period first.
    ///
    /// Every label seen in any period becomes a row; periods lacking that
    /// label contribute a `null` cell so columns stay aligned.
    #[must_use]
    pub fn from_periods(periods: &[Map<String, Value>]) -> Self {
        let mut rows: BTreeMap<String, Vec<Value>> = BTreeMap::new();
        for label in periods.iter().flat_map(|p| p.keys()) {
            if rows.contains_key(label) {
                continue;
            }
            let cells = periods
                .iter()
                .map(|p| p.get(label).cloned().unwrap_or(Value::Null))
                .collect();
            rows.insert(label.clone(), cells);
        }
        Self { rows }
    }

    /// Sets a single-column row, replacing any existing row with that label.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<Value>) {
        self.rows.insert(label.into(), vec![value.into()]);
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, label: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(label, value);
        self
    }

    /// Returns the raw current-period cell for a label, if any.
    #[must_use]
    pub fn cell(&self, label: &str) -> Option<&Value> {
        self.rows.get(label).and_then(|cells| cells.first())
    }

    /// Returns the current-period value for a label, or `0.0`.
    #[must_use]
    pub fn get(&self, label: &str) -> f64 {
        get(Some(self), label)
    }

    /// Returns the current-period value for a label when it is numeric.
    #[must_use]
    pub fn try_get(&self, label: &str) -> Option<f64> {
        self.cell(label).and_then(numeric)
    }

    /// Returns an iterator over the row labels.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Reads the current-period value of `row_label` from `table`.
///
/// Returns `0.0` when the table is absent or empty, the label is missing,
/// the row has no cells, or the first cell is not a finite number. Numeric
/// strings such as `"1.5e9"` are accepted.
#[must_use]
pub fn get(table: Option<&StatementTable>, row_label: &str) -> f64 {
    table
        .and_then(|t| t.try_get(row_label))
        .unwrap_or_default()
}

fn numeric(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

/// Which statement a line item is reported on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementKind {
    /// Income statement.
    Income,
    /// Balance sheet.
    Balance,
    /// Cash-flow statement.
    CashFlow,
    /// Market-derived statistics (beta, dividend yield).
    KeyStatistics,
}

/// Canonical line items consumed by the valuation models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    /// Total revenue.
    Revenue,
    /// EBITDA.
    Ebitda,
    /// Trailing earnings per share.
    EarningsPerShare,
    /// Cash and cash equivalents.
    Cash,
    /// Total debt.
    TotalDebt,
    /// Total stockholders' equity.
    TotalEquity,
    /// Total assets.
    TotalAssets,
    /// Total liabilities.
    TotalLiabilities,
    /// Free cash flow.
    FreeCashFlow,
    /// Dividend yield as a fraction of price.
    DividendYield,
    /// Equity beta.
    Beta,
}

impl LineItem {
    /// All line items, in snapshot order.
    pub const ALL: [Self; 11] = [
        Self::Revenue,
        Self::Ebitda,
        Self::EarningsPerShare,
        Self::Cash,
        Self::TotalDebt,
        Self::TotalEquity,
        Self::TotalAssets,
        Self::TotalLiabilities,
        Self::FreeCashFlow,
        Self::DividendYield,
        Self::Beta,
    ];

    /// The statement this item is read from.
    #[must_use]
    pub const fn statement(&self) -> StatementKind {
        match self {
            Self::Revenue | Self::Ebitda | Self::EarningsPerShare => StatementKind::Income,
            Self::Cash
            | Self::TotalDebt
            | Self::TotalEquity
            | Self::TotalAssets
            | Self::TotalLiabilities => StatementKind::Balance,
            Self::FreeCashFlow => StatementKind::CashFlow,
            Self::DividendYield | Self::Beta => StatementKind::KeyStatistics,
        }
    }

    /// Row labels to try, in order of preference.
    #[must_use]
    pub const fn labels(&self) -> &'static [&'static str] {
        match self {
            Self::Revenue => &["revenue", "totalRevenue"],
            Self::Ebitda => &["ebitda", "normalizedEbitda"],
            Self::EarningsPerShare => &["eps", "epsDiluted"],
            Self::Cash => &["cashAndCashEquivalents", "cashAndShortTermInvestments"],
            Self::TotalDebt => &["totalDebt"],
            Self::TotalEquity => &["totalStockholdersEquity", "totalEquity"],
            Self::TotalAssets => &["totalAssets"],
            Self::TotalLiabilities => &["totalLiabilities"],
            Self::FreeCashFlow => &["freeCashFlow"],
            Self::DividendYield => &["dividendYield"],
            Self::Beta => &["beta"],
        }
    }
}

/// Raw statements for one company as returned by a data client.
///
/// Every field defaults when absent, so partial statement sets deserialize.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Financials {
    /// End date of the most recent reporting period, when known.
    pub period_end: Option<NaiveDate>,
    /// Income statement rows.
    pub income_statement: StatementTable,
    /// Balance sheet rows.
    pub balance_sheet: StatementTable,
    /// Cash-flow statement rows.
    pub cash_flow_statement: StatementTable,
    /// Market-derived statistics such as beta and dividend yield.
    pub key_statistics: StatementTable,
}

impl Financials {
    /// Returns the table for a statement kind.
    #[must_use]
    pub const fn table(&self, kind: StatementKind) -> &StatementTable {
        match kind {
            StatementKind::Income => &self.income_statement,
            StatementKind::Balance => &self.balance_sheet,
            StatementKind::CashFlow => &self.cash_flow_statement,
            StatementKind::KeyStatistics => &self.key_statistics,
        }
    }

    /// Reads a line item, trying each of its labels in turn.
    ///
    /// Returns `None` only when no label yields a numeric value.
    #[must_use]
    pub fn line_item(&self, item: LineItem) -> Option<f64> {
        let table = self.table(item.statement());
        let direct = item.labels().iter().find_map(|label| table.try_get(label));
        match (direct, item) {
            (Some(value), _) => Some(value),
            (None, LineItem::TotalDebt) => {
                let long = table.try_get("longTermDebt");
                let short = table.try_get("shortTermDebt");
                match (long, short) {
                    (None, None) => None,
                    (l, s) => Some(l.unwrap_or_default() + s.unwrap_or_default()),
                }
            }
            (None, _) => None,
        }
    }
}
