//! Loader for the tax bracket configuration file.
//!
//! ## CSV format
//!
//! Comma-separated, **no header row**, brackets pre-sorted ascending by
//! lower limit:
//!
//! ```csv
//! lower,upper,rate_percent,lump_sum,threshold
//! ```
//!
//! The `upper` field is left empty on the topmost bracket to mark it as
//! unbounded. Example (2012-13 Australian resident rates):
//!
//! ```csv
//! 0,18200,0,0,0
//! 18201,37000,19,0,18200
//! 37001,80000,32.5,3572,37000
//! 80001,180000,37,17547,80000
//! 180001,,45,54547,180000
//! ```
//!
//! Reading stops as soon as the unbounded bracket row is consumed; any rows
//! after it are silently ignored. That is a long-standing quirk of the file
//! format, kept as-is.
//!
//! Loading is fail-fast: the first malformed row aborts the load and no
//! partial table is returned.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use payroll_core::{TaxBracket, TaxBracketTable, TaxTableError};

/// Number of fields a bracket row must carry.
const BRACKET_FIELDS: usize = 5;

/// Errors that can occur while loading the tax bracket configuration.
#[derive(Debug, Error)]
pub enum TaxConfigError {
    #[error("cannot read tax config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    /// A row with fewer than the five required fields.
    #[error("tax config row {row} has fewer than 5 fields")]
    TooFewFields { row: usize },

    /// A numeric field that failed to parse. Only the `upper` field may be
    /// empty (marking the topmost bracket); every other field must be a
    /// number.
    #[error("tax config row {row}: {field} value '{value}' is not a number")]
    Parse {
        row: usize,
        field: &'static str,
        value: String,
    },

    /// The parsed rows violate a structural invariant of the table.
    #[error(transparent)]
    Table(#[from] TaxTableError),
}

fn parse_field(
    record: &StringRecord,
    index: usize,
    field: &'static str,
    row: usize,
) -> Result<Decimal, TaxConfigError> {
    let value = &record[index];
    value.parse::<Decimal>().map_err(|_| TaxConfigError::Parse {
        row,
        field,
        value: value.to_string(),
    })
}

/// Reads bracket rows from `reader` and builds a validated table.
pub fn load_from_reader<R: Read>(reader: R) -> Result<TaxBracketTable, TaxConfigError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut brackets = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        let record = result?;
        let row = index + 1; // 1-based for user-facing messages

        if record.len() < BRACKET_FIELDS {
            return Err(TaxConfigError::TooFewFields { row });
        }

        let lower = parse_field(&record, 0, "lower limit", row)?;
        let upper = if record[1].is_empty() {
            None
        } else {
            Some(parse_field(&record, 1, "upper limit", row)?)
        };
        let rate_percent = parse_field(&record, 2, "rate", row)?;
        let lump_sum = parse_field(&record, 3, "lump sum", row)?;
        let threshold = parse_field(&record, 4, "threshold", row)?;

        let top = upper.is_none();
        brackets.push(TaxBracket {
            lower,
            upper,
            rate_percent,
            lump_sum,
            threshold,
        });

        if top {
            // Topmost bracket consumed; trailing rows are ignored.
            debug!("stopped reading tax config at unbounded bracket on row {row}");
            break;
        }
    }

    Ok(TaxBracketTable::new(brackets)?)
}

/// Parses the full config file contents from a string.
pub fn load_from_str(input: &str) -> Result<TaxBracketTable, TaxConfigError> {
    load_from_reader(input.as_bytes())
}

/// Convenience wrapper: open `path` and delegate to [`load_from_reader`].
pub fn load_from_file(path: &Path) -> Result<TaxBracketTable, TaxConfigError> {
    let file = File::open(path).map_err(|source| TaxConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_reader(file)
}
