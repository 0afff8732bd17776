//! Monthly payroll calculations.

pub mod common;
pub mod payslip;

pub use payslip::{PayslipCalculator, PayslipError};
