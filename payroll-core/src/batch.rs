//! Order-preserving batch processing of payroll records.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::{PayslipCalculator, PayslipError};
use crate::models::{PayrollRecord, Payslip, TaxBracketTable};

/// One output row of a batch run: a computed payslip, or a marker carrying
/// the diagnostic of a record that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayslipRow {
    Payslip(Payslip),
    Invalid { diagnostic: String },
}

/// Applies payslip calculations across a collection of records.
#[derive(Debug, Clone)]
pub struct BatchProcessor<'a> {
    calculator: PayslipCalculator<'a>,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(table: &'a TaxBracketTable) -> Self {
        Self {
            calculator: PayslipCalculator::new(table),
        }
    }

    /// Produces one output row per input record, in input order.
    ///
    /// Invalid records become [`PayslipRow::Invalid`] markers and do not
    /// stop the run. A calculation failure on a valid record aborts the
    /// whole batch: with a consistent bracket table none of the per-record
    /// calculations can fail, so a failure means the run as a whole cannot
    /// be trusted.
    pub fn process_all(
        &self,
        records: &[PayrollRecord],
    ) -> Result<Vec<PayslipRow>, PayslipError> {
        let mut rows = Vec::with_capacity(records.len());

        for record in records {
            match record {
                PayrollRecord::Valid(employee) => {
                    let payslip = self.calculator.calculate(employee)?;
                    rows.push(PayslipRow::Payslip(payslip));
                }
                PayrollRecord::Invalid { diagnostic } => {
                    warn!("skipping record: {diagnostic}");
                    rows.push(PayslipRow::Invalid {
                        diagnostic: diagnostic.clone(),
                    });
                }
            }
        }

        Ok(rows)
    }
}
