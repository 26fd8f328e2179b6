//! Spreadsheet export of the visible contract rows

use crate::model::columns::ColumnSet;
use crate::model::contract::{format_plain_number, Contract, FieldValue};
use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// File name written into the export directory
pub const EXPORT_FILE_NAME: &str = "contracts.csv";

/// Cell text for an exported value; missing values are empty cells
fn export_cell(value: Option<FieldValue>) -> String {
    match value {
        Some(FieldValue::Number(n)) => format_plain_number(n),
        Some(other) => other.display(),
        None => String::new(),
    }
}

/// Write the header of visible column labels and one line per row
///
/// Returns the number of data rows written.
pub fn export_rows<W: Write>(rows: &[&Contract], columns: &ColumnSet, writer: W) -> Result<usize> {
    let visible = columns.visible();
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record(visible.iter().map(|c| c.label.as_str()))
        .context("Failed to write export header")?;

    for contract in rows {
        let record: Vec<String> = visible
            .iter()
            .map(|column| export_cell(contract.field(&column.id)))
            .collect();
        csv_writer
            .write_record(&record)
            .with_context(|| format!("Failed to write row for contract {}", contract.id))?;
    }

    csv_writer.flush().context("Failed to flush export")?;
    Ok(rows.len())
}

/// Export into `dir/contracts.csv`, creating the directory if needed
pub fn export_to_file(rows: &[&Contract], columns: &ColumnSet, dir: &Path) -> Result<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Could not create export directory {}", dir.display()))?;
    }

    let path = dir.join(EXPORT_FILE_NAME);
    let file =
        File::create(&path).with_context(|| format!("Could not create {}", path.display()))?;
    let count = export_rows(rows, columns, file)?;
    tracing::info!(rows = count, path = %path.display(), "exported contracts");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::sample_data::sample_contracts;

    fn export_string(rows: &[&Contract], columns: &ColumnSet) -> (usize, String) {
        let mut buffer = Vec::new();
        let count = export_rows(rows, columns, &mut buffer).unwrap();
        (count, String::from_utf8(buffer).unwrap())
    }

    #[test]
    fn test_export_uses_visible_columns_and_formats_cells() {
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().take(2).collect();
        let (count, text) = export_string(&rows, &ColumnSet::default());

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(count, 2);
        assert_eq!(lines[0], "Contract Name,Type,Date Uploaded,Status,Value");
        assert_eq!(
            lines[1],
            "Service Agreement - Tech Solutions Inc,Service Agreement,\"Feb 20, 2024\",Active,50000"
        );
        // Missing value becomes an empty cell
        assert_eq!(lines[2], "NDA - Project Phoenix,NDA,\"Feb 19, 2024\",Pending,");
    }

    #[test]
    fn test_export_follows_column_toggles() {
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().take(1).collect();
        let mut columns = ColumnSet::default();
        columns.toggle("value");
        columns.toggle("parties");

        let (_, text) = export_string(&rows, &columns);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Contract Name,Type,Date Uploaded,Status,Parties");
        assert!(lines[1].ends_with("\"Tech Solutions Inc, Acme Corp\""));
    }

    #[test]
    fn test_export_of_no_rows_is_header_only() {
        let (count, text) = export_string(&[], &ColumnSet::default());
        assert_eq!(count, 0);
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn test_export_to_file_writes_fixed_name() {
        let dir = std::env::temp_dir().join(format!("contract-tui-export-{}", std::process::id()));
        let contracts = sample_contracts();
        let rows: Vec<&Contract> = contracts.iter().collect();

        let path = export_to_file(&rows, &ColumnSet::default(), &dir).unwrap();
        assert_eq!(path, dir.join(EXPORT_FILE_NAME));

        let mut reader = csv::Reader::from_path(&path).unwrap();
        assert_eq!(reader.records().count(), contracts.len());
        let _ = fs::remove_dir_all(&dir);
    }
}
