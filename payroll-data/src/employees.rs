//! Loader for the employee payroll input file.
//!
//! ## CSV format
//!
//! Comma-separated, **no header row**:
//!
//! ```csv
//! first_name,last_name,annual_salary,super_rate,pay_period
//! ```
//!
//! The super rate may carry a `%` suffix. At least five fields per row;
//! extra fields are ignored. Example:
//!
//! ```csv
//! David,Rudd,60050,9%,01 March – 31 March
//! Ryan,Chen,120000,10%,01 March – 31 March
//! ```
//!
//! Rows that fail validation (including rows with fewer than five fields)
//! are returned as [`PayrollRecord::Invalid`] rather than failing the load;
//! only I/O and CSV structural errors are fatal.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;
use tracing::debug;

use payroll_core::PayrollRecord;

/// Errors that can occur while reading the payroll input file.
#[derive(Debug, Error)]
pub enum EmployeeLoadError {
    #[error("cannot read payroll input '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads employee rows from `reader`, validating each one.
///
/// Records come back in file order, invalid ones included.
pub fn load_from_reader<R: Read>(reader: R) -> Result<Vec<PayrollRecord>, EmployeeLoadError> {
    // No Trim::All here: validation trims per field itself, and diagnostics
    // must quote the raw input.
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in csv_reader.records() {
        let record = result?;

        if record.len() < 5 {
            let raw = record.iter().collect::<Vec<_>>().join(",");
            records.push(PayrollRecord::Invalid {
                diagnostic: format!("invalid payroll record <{raw}>: fewer than 5 fields"),
            });
            continue;
        }

        records.push(PayrollRecord::validate(
            &record[0], &record[1], &record[2], &record[3], &record[4],
        ));
    }

    debug!(
        total = records.len(),
        invalid = records.iter().filter(|r| !r.is_valid()).count(),
        "payroll input loaded"
    );
    Ok(records)
}

/// Parses the full payroll input from a string.
pub fn load_from_str(input: &str) -> Result<Vec<PayrollRecord>, EmployeeLoadError> {
    load_from_reader(input.as_bytes())
}

/// Convenience wrapper: open `path` and delegate to [`load_from_reader`].
pub fn load_from_file(path: &Path) -> Result<Vec<PayrollRecord>, EmployeeLoadError> {
    let file = File::open(path).map_err(|source| EmployeeLoadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_from_reader(file)
}
