mod payroll_record;
mod payslip;
mod tax_bracket;

pub use payroll_record::{Employee, PayrollRecord, MAX_SUPER_RATE_PERCENT};
pub use payslip::Payslip;
pub use tax_bracket::{TaxBracket, TaxBracketTable, TaxTableError};
