//! Shapes transactions into rows and columns for the exporters and front-ends.
//!
//! Nothing here touches the filesystem; see [`crate::export`] for that.

use finance_repo::transaction_repo::{CategoryTotal, Summary, Transaction};
use rust_decimal::{Decimal, RoundingStrategy};

/// Column layouts understood by the exporters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportLayout {
    /// Every column, in storage order, for spreadsheet export.
    Spreadsheet,
    /// The printable subset used by paginated reports.
    Paginated,
}

impl ReportLayout {
    pub const fn header(&self) -> &'static [&'static str] {
        match self {
            ReportLayout::Spreadsheet => &["ID", "Type", "Category", "Amount", "Description", "Date"],
            ReportLayout::Paginated => &["Type", "Category", "Amount", "Date", "Description"],
        }
    }

    fn row(&self, t: &Transaction) -> Vec<String> {
        let description = t.description.clone().unwrap_or_default();
        match self {
            ReportLayout::Spreadsheet => vec![
                t.id.to_string(),
                t.kind.to_string(),
                t.category.clone(),
                t.amount.to_string(),
                description,
                t.date.format("%Y-%m-%d").to_string(),
            ],
            ReportLayout::Paginated => vec![
                t.kind.to_string(),
                t.category.clone(),
                format_money(t.amount),
                t.date.format("%Y-%m-%d").to_string(),
                description,
            ],
        }
    }
}

/// A header plus row-major cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRows {
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl TableRows {
    pub fn new(header: &[&str], rows: Vec<Vec<String>>) -> TableRows {
        TableRows {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Splits the rows into pages of at most `rows_per_page` rows. An empty table still has one
    /// (empty) page so that the header gets printed.
    pub fn pages(&self, rows_per_page: usize) -> Vec<&[Vec<String>]> {
        if self.rows.is_empty() {
            return vec![&self.rows[..]];
        }
        self.rows.chunks(rows_per_page.max(1)).collect()
    }
}

/// Rows keep the order of `transactions`.
pub fn to_tabular(transactions: &[Transaction], layout: ReportLayout) -> TableRows {
    let rows = transactions.iter().map(|t| layout.row(t)).collect();
    TableRows::new(layout.header(), rows)
}

/// The type × category breakdown, one row per pair.
pub fn category_table(totals: &[CategoryTotal]) -> TableRows {
    let rows = totals
        .iter()
        .map(|t| {
            vec![
                t.kind.to_string(),
                t.category.clone(),
                format_money(t.total),
            ]
        })
        .collect();
    TableRows::new(&["Type", "Category", "Amount"], rows)
}

pub fn format_summary(summary: &Summary) -> String {
    format!(
        "Total Income: {}\nTotal Expenses: {}\nBalance: {}",
        format_money(summary.total_income),
        format_money(summary.total_expenses),
        format_money(summary.balance)
    )
}

pub fn format_money(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}
