//! Writes [`TableRows`] to disk.
//!
//! Two formats are supported: a CSV file that spreadsheet applications open directly, and a
//! paginated plain-text report with a bordered table on every page.

use crate::report::{to_tabular, ReportLayout, TableRows};
use crate::session::Session;
use anyhow::{bail, Context};
use directories::UserDirs;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub const ROWS_PER_PAGE: usize = 40;
const MAX_COLUMN_WIDTH: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Report,
}

impl ExportFormat {
    pub const fn layout(&self) -> ReportLayout {
        match self {
            ExportFormat::Csv => ReportLayout::Spreadsheet,
            ExportFormat::Report => ReportLayout::Paginated,
        }
    }

    pub const fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Report => "txt",
        }
    }
}

pub fn write_csv<W: Write>(table: &TableRows, writer: W) -> Result<(), anyhow::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(&table.header)
        .context("Unable to write CSV header")?;
    for row in &table.rows {
        csv_writer
            .write_record(row)
            .context("Unable to write CSV row")?;
    }
    csv_writer.flush().context("Unable to flush CSV output")?;
    Ok(())
}

pub fn write_paginated<W: Write>(
    table: &TableRows,
    title: &str,
    rows_per_page: usize,
    mut writer: W,
) -> Result<(), anyhow::Error> {
    let widths = column_widths(table);
    let pages = table.pages(rows_per_page);
    let page_count = pages.len();

    for (index, page) in pages.into_iter().enumerate() {
        if index > 0 {
            // form feed starts a new page when printed
            writeln!(writer, "\u{c}")?;
        }
        writeln!(writer, "{}", title)?;
        writeln!(writer)?;
        write_bordered(&table.header, page, &widths, &mut writer)?;
        writeln!(writer, "Page {} of {}", index + 1, page_count)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the whole table with borders and no paging.
pub fn write_table<W: Write>(table: &TableRows, mut writer: W) -> Result<(), anyhow::Error> {
    let widths = column_widths(table);
    write_bordered(&table.header, &table.rows, &widths, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn write_bordered<W: Write>(
    header: &[String],
    rows: &[Vec<String>],
    widths: &[usize],
    writer: &mut W,
) -> std::io::Result<()> {
    let separator = separator_line(widths);
    writeln!(writer, "{}", separator)?;
    writeln!(writer, "{}", table_line(header, widths))?;
    writeln!(writer, "{}", separator)?;
    for row in rows {
        writeln!(writer, "{}", table_line(row, widths))?;
    }
    writeln!(writer, "{}", separator)
}

fn column_widths(table: &TableRows) -> Vec<usize> {
    table
        .header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            table
                .rows
                .iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
                .min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

fn separator_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line
}

fn table_line(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::from("|");
    for (i, width) in widths.iter().enumerate() {
        let cell = cells.get(i).map(String::as_str).unwrap_or("");
        line.push_str(&format!(" {:<width$} |", truncate(cell, *width), width = *width));
    }
    line
}

fn truncate(cell: &str, width: usize) -> String {
    if cell.chars().count() <= width {
        cell.to_owned()
    } else {
        let mut truncated: String = cell.chars().take(width.saturating_sub(1)).collect();
        truncated.push('~');
        truncated
    }
}

/// The user's Downloads directory, or the working directory when there is none.
pub fn default_export_dir() -> PathBuf {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<username>_transactions.<ext>`, with path separators in the username replaced so the file
/// always lands directly in the export directory.
pub fn export_file_name(username: &str, format: ExportFormat) -> String {
    let username: String = username
        .chars()
        .map(|c| if matches!(c, '/' | '\\' | '\0') { '_' } else { c })
        .collect();
    format!("{}_transactions.{}", username, format.extension())
}

/// Writes all of the session's transactions to `<username>_transactions.<ext>` inside
/// `destination` and returns the path of the written file.
pub fn export_transactions(
    session: &Session,
    format: ExportFormat,
    destination: Option<&Path>,
) -> Result<PathBuf, anyhow::Error> {
    let transactions = session.transactions(None);
    if transactions.is_empty() {
        bail!("No transactions available for export");
    }
    let table = to_tabular(&transactions, format.layout());

    let dir = destination
        .map(Path::to_path_buf)
        .unwrap_or_else(default_export_dir);
    fs::create_dir_all(&dir)
        .with_context(|| format!("Unable to create export directory {}", dir.display()))?;
    let file_path = dir.join(export_file_name(session.username(), format));

    let file = File::create(&file_path)
        .with_context(|| format!("Unable to create {}", file_path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        ExportFormat::Csv => write_csv(&table, writer)?,
        ExportFormat::Report => {
            let title = format!("{}'s Transaction Report", session.username());
            write_paginated(&table, &title, ROWS_PER_PAGE, writer)?
        }
    }

    info!(path = %file_path.display(), rows = table.len(), "Transactions exported");
    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> TableRows {
        TableRows::new(
            &["Type", "Category", "Amount"],
            vec![
                vec![
                    "income".to_string(),
                    "Salary, March".to_string(),
                    "$2000.00".to_string(),
                ],
                vec![
                    "expense".to_string(),
                    "Food".to_string(),
                    "$4.50".to_string(),
                ],
            ],
        )
    }

    #[test]
    fn test_write_csv_quotes_fields() {
        let mut out = Vec::new();
        write_csv(&table(), &mut out).unwrap();
        let csv = String::from_utf8(out).unwrap();
        assert_eq!(
            "Type,Category,Amount\nincome,\"Salary, March\",$2000.00\nexpense,Food,$4.50\n",
            csv
        );
    }

    #[test]
    fn test_write_paginated() {
        let mut out = Vec::new();
        write_paginated(&table(), "Report", 1, &mut out).unwrap();
        let report = String::from_utf8(out).unwrap();

        assert!(report.starts_with("Report\n\n+---------+"));
        assert!(report.contains("| Type    | Category      | Amount   |"));
        assert!(report.contains("| income  | Salary, March | $2000.00 |"));
        assert!(report.contains("Page 1 of 2"));
        assert!(report.contains("Page 2 of 2"));
        assert_eq!(1, report.matches('\u{c}').count());
    }

    #[test]
    fn test_write_table() {
        let mut out = Vec::new();
        write_table(&table(), &mut out).unwrap();
        let lines: Vec<String> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_owned)
            .collect();

        assert_eq!(6, lines.len());
        assert_eq!("+---------+---------------+----------+", lines[0]);
        assert_eq!("| expense | Food          | $4.50    |", lines[4]);
        assert_eq!(lines[0], lines[5]);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            "alice_transactions.csv",
            export_file_name("alice", ExportFormat::Csv)
        );
        assert_eq!(
            ".._x_transactions.txt",
            export_file_name("../x", ExportFormat::Report)
        );
        assert_eq!(
            "a_b_c_transactions.csv",
            export_file_name("a\\b/c", ExportFormat::Csv)
        );
    }

    #[test]
    fn test_long_cells_are_truncated() {
        let long = "x".repeat(60);
        let table = TableRows::new(&["Description"], vec![vec![long]]);
        let mut out = Vec::new();
        write_paginated(&table, "Report", 10, &mut out).unwrap();
        let report = String::from_utf8(out).unwrap();

        let expected = format!("| {}~ |", "x".repeat(MAX_COLUMN_WIDTH - 1));
        assert!(report.contains(&expected));
    }
}
