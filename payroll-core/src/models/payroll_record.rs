use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Highest superannuation rate an employee may nominate, in percent.
pub const MAX_SUPER_RATE_PERCENT: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// A validated employee payroll input row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub first_name: String,
    pub last_name: String,
    pub annual_salary: Decimal,
    pub super_rate_percent: Decimal,
    pub pay_period: String,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One payroll input row after validation.
///
/// Rows that fail validation are carried through the batch as `Invalid`
/// rather than aborting it; the diagnostic embeds all five raw input fields
/// so the offending row can be found in the source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayrollRecord {
    Valid(Employee),
    Invalid { diagnostic: String },
}

impl PayrollRecord {
    /// Validates the five raw input fields of one payroll row.
    ///
    /// - every field is trimmed of surrounding whitespace;
    /// - first and last name must be non-empty after trimming;
    /// - the annual salary must parse as a decimal greater than zero;
    /// - the super rate may carry a trailing suffix (typically `%`); only
    ///   its leading numeric run is parsed, and the value must lie in
    ///   `[0, 50]`.
    pub fn validate(
        first_name: &str,
        last_name: &str,
        annual_salary: &str,
        super_rate: &str,
        pay_period: &str,
    ) -> PayrollRecord {
        let invalid = |reason: &str| PayrollRecord::Invalid {
            diagnostic: format!(
                "invalid payroll record <{first_name},{last_name},{annual_salary},{super_rate},{pay_period}>: {reason}"
            ),
        };

        let first = first_name.trim();
        let last = last_name.trim();
        if first.is_empty() {
            return invalid("first name is empty");
        }
        if last.is_empty() {
            return invalid("last name is empty");
        }

        let salary = match annual_salary.trim().parse::<Decimal>() {
            Ok(salary) => salary,
            Err(_) => return invalid("annual salary is not a number"),
        };
        if salary <= Decimal::ZERO {
            return invalid("annual salary must be greater than zero");
        }

        let rate = match parse_leading_decimal(super_rate.trim()) {
            Some(rate) => rate,
            None => return invalid("super rate is not a number"),
        };
        if rate < Decimal::ZERO || rate > MAX_SUPER_RATE_PERCENT {
            return invalid("super rate must be between 0% and 50%");
        }

        PayrollRecord::Valid(Employee {
            first_name: first.to_string(),
            last_name: last.to_string(),
            annual_salary: salary,
            super_rate_percent: rate,
            pay_period: pay_period.trim().to_string(),
        })
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, PayrollRecord::Valid(_))
    }
}

/// Parses the leading numeric run of `input`, so `"9%"` yields 9.
/// Returns `None` when the input does not start with a number.
fn parse_leading_decimal(input: &str) -> Option<Decimal> {
    let end = input
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(input.len());
    input[..end].parse::<Decimal>().ok()
}
