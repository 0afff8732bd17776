use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Computed monthly payroll figures for one employee.
///
/// All monetary values are whole dollars, rounded half-up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payslip {
    pub full_name: String,
    pub pay_period: String,
    pub gross_income: Decimal,
    pub income_tax: Decimal,
    pub net_income: Decimal,
    pub super_amount: Decimal,
}
