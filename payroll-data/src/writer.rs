//! Output file naming and payslip row writing.
//!
//! Each input record produces exactly one output line: either the computed
//! payslip fields
//!
//! ```csv
//! full_name,pay_period,gross,tax,net,super
//! ```
//!
//! with all amounts as whole-number strings, or the invalid-record marker
//! followed by the validation diagnostic.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use payroll_core::PayslipRow;

/// First field of the output line emitted for a record that failed
/// validation.
pub const INVALID_RECORD_MARKER: &str = "INVALID RECORD - NO OUTPUT GENERATED";

/// Errors that can occur while writing the output file.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot write output '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Derives the output file path from the input file path:
/// `payroll.csv` becomes `payroll-out.csv` in the same directory.
pub fn output_path_for(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}-out.csv"))
}

/// Whole-dollar amounts carry no fractional part; render them without one.
fn dollars(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Writes one output line per row to `writer`.
pub fn write_rows<W: Write>(writer: W, rows: &[PayslipRow]) -> Result<(), OutputError> {
    // Payslip lines have six fields while invalid-record lines have two,
    // so the writer must accept records of unequal length.
    let mut csv_writer = csv::WriterBuilder::new().flexible(true).from_writer(writer);

    for row in rows {
        match row {
            PayslipRow::Payslip(payslip) => {
                csv_writer.write_record([
                    payslip.full_name.as_str(),
                    payslip.pay_period.as_str(),
                    &dollars(payslip.gross_income),
                    &dollars(payslip.income_tax),
                    &dollars(payslip.net_income),
                    &dollars(payslip.super_amount),
                ])?;
            }
            PayslipRow::Invalid { diagnostic } => {
                csv_writer.write_record([INVALID_RECORD_MARKER, diagnostic.as_str()])?;
            }
        }
    }

    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Creates (or truncates) `path` and writes all rows to it.
pub fn write_file(path: &Path, rows: &[PayslipRow]) -> Result<(), OutputError> {
    let file = File::create(path).map_err(|source| OutputError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_rows(file, rows)?;

    info!(rows = rows.len(), path = %path.display(), "output written");
    Ok(())
}
