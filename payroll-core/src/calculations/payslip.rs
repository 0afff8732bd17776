//! Monthly payslip calculation against a tax bracket table.
//!
//! Annual tax for a salary is read off the bracket covering it:
//! `lump_sum + (salary - threshold) * rate_percent / 100`. All monthly
//! figures are that or the plain salary divided by twelve, rounded half-up
//! to whole dollars.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use payroll_core::{Employee, PayslipCalculator, TaxBracket, TaxBracketTable};
//!
//! let table = TaxBracketTable::new(vec![
//!     TaxBracket {
//!         lower: dec!(0),
//!         upper: Some(dec!(80000)),
//!         rate_percent: dec!(32.5),
//!         lump_sum: dec!(3572),
//!         threshold: dec!(37000),
//!     },
//!     TaxBracket {
//!         lower: dec!(80001),
//!         upper: None,
//!         rate_percent: dec!(37),
//!         lump_sum: dec!(17547),
//!         threshold: dec!(80000),
//!     },
//! ])
//! .unwrap();
//!
//! let employee = Employee {
//!     first_name: "David".into(),
//!     last_name: "Rudd".into(),
//!     annual_salary: dec!(60050),
//!     super_rate_percent: dec!(9),
//!     pay_period: "01 March – 31 March".into(),
//! };
//!
//! let payslip = PayslipCalculator::new(&table).calculate(&employee).unwrap();
//! assert_eq!(payslip.gross_income, dec!(5004));
//! assert_eq!(payslip.income_tax, dec!(922));
//! assert_eq!(payslip.net_income, dec!(4082));
//! assert_eq!(payslip.super_amount, dec!(450));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::calculations::common::round_dollars;
use crate::models::{Employee, Payslip, TaxBracketTable, MAX_SUPER_RATE_PERCENT};

/// Errors that can occur while computing a payslip.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayslipError {
    /// No tax bracket covers the annual salary.
    #[error("no tax bracket matches annual salary {0}")]
    NoMatchingBracket(Decimal),

    /// Monthly tax came out above gross pay. Net pay can never be negative,
    /// so this signals a misconfigured bracket table or corrupt input.
    #[error("monthly income tax {tax} exceeds gross income {gross}")]
    TaxExceedsGross { tax: Decimal, gross: Decimal },

    /// Super rate outside `[0, 50]` percent. Validation already rejects
    /// this; the calculator re-checks before trusting the value.
    #[error("super rate {0}% is outside the allowed 0-50% range")]
    SuperRateOutOfRange(Decimal),
}

/// Calculator for monthly payslip figures.
///
/// Borrows a validated [`TaxBracketTable`]; one calculator can serve any
/// number of employees.
#[derive(Debug, Clone)]
pub struct PayslipCalculator<'a> {
    table: &'a TaxBracketTable,
}

impl<'a> PayslipCalculator<'a> {
    pub fn new(table: &'a TaxBracketTable) -> Self {
        Self { table }
    }

    /// Monthly gross pay: annual salary over twelve, rounded.
    pub fn gross_income(&self, employee: &Employee) -> Decimal {
        round_dollars(employee.annual_salary / months_per_year())
    }

    /// Monthly income tax from the bracket covering the annual salary.
    pub fn income_tax(&self, employee: &Employee) -> Result<Decimal, PayslipError> {
        let salary = employee.annual_salary;
        let bracket = self
            .table
            .bracket_for(salary)
            .map_err(|_| PayslipError::NoMatchingBracket(salary))?;

        let annual_tax = (salary - bracket.threshold) * bracket.rate_percent
            / Decimal::ONE_HUNDRED
            + bracket.lump_sum;

        Ok(round_dollars(annual_tax / months_per_year()))
    }

    /// Monthly net pay: gross minus tax, rounded.
    pub fn net_income(&self, employee: &Employee) -> Result<Decimal, PayslipError> {
        let gross = self.gross_income(employee);
        let tax = self.income_tax(employee)?;
        if tax > gross {
            return Err(PayslipError::TaxExceedsGross { tax, gross });
        }

        Ok(round_dollars(gross - tax))
    }

    /// Monthly super contribution: gross times the nominated rate, rounded.
    pub fn super_amount(&self, employee: &Employee) -> Result<Decimal, PayslipError> {
        let rate = employee.super_rate_percent;
        if rate < Decimal::ZERO || rate > MAX_SUPER_RATE_PERCENT {
            return Err(PayslipError::SuperRateOutOfRange(rate));
        }

        Ok(round_dollars(self.gross_income(employee) * rate / Decimal::ONE_HUNDRED))
    }

    /// Computes gross, tax, net and super in that order and assembles the
    /// payslip. The first failing step is returned as the error.
    pub fn calculate(&self, employee: &Employee) -> Result<Payslip, PayslipError> {
        let gross_income = self.gross_income(employee);
        let income_tax = self.income_tax(employee)?;
        let net_income = self.net_income(employee)?;
        let super_amount = self.super_amount(employee)?;

        debug!(
            name = %employee.full_name(),
            %gross_income,
            %income_tax,
            "payslip calculated"
        );

        Ok(Payslip {
            full_name: employee.full_name(),
            pay_period: employee.pay_period.clone(),
            gross_income,
            income_tax,
            net_income,
            super_amount,
        })
    }
}

fn months_per_year() -> Decimal {
    Decimal::from(12)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::models::TaxBracket;

    /// 2012-13 Australian resident rates.
    fn resident_table() -> TaxBracketTable {
        TaxBracketTable::new(vec![
            TaxBracket {
                lower: dec!(0),
                upper: Some(dec!(18200)),
                rate_percent: dec!(0),
                lump_sum: dec!(0),
                threshold: dec!(0),
            },
            TaxBracket {
                lower: dec!(18201),
                upper: Some(dec!(37000)),
                rate_percent: dec!(19),
                lump_sum: dec!(0),
                threshold: dec!(18200),
            },
            TaxBracket {
                lower: dec!(37001),
                upper: Some(dec!(80000)),
                rate_percent: dec!(32.5),
                lump_sum: dec!(3572),
                threshold: dec!(37000),
            },
            TaxBracket {
                lower: dec!(80001),
                upper: Some(dec!(180000)),
                rate_percent: dec!(37),
                lump_sum: dec!(17547),
                threshold: dec!(80000),
            },
            TaxBracket {
                lower: dec!(180001),
                upper: None,
                rate_percent: dec!(45),
                lump_sum: dec!(54547),
                threshold: dec!(180000),
            },
        ])
        .unwrap()
    }

    fn employee(annual_salary: Decimal, super_rate_percent: Decimal) -> Employee {
        Employee {
            first_name: "David".into(),
            last_name: "Rudd".into(),
            annual_salary,
            super_rate_percent,
            pay_period: "01 March – 31 March".into(),
        }
    }

    // =========================================================================
    // gross_income tests
    // =========================================================================

    #[test]
    fn gross_income_is_salary_over_twelve_rounded() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        // 60050 / 12 = 5004.1666...
        assert_eq!(calculator.gross_income(&employee(dec!(60050), dec!(9))), dec!(5004));
        // 120000 / 12 = 10000 exactly
        assert_eq!(calculator.gross_income(&employee(dec!(120000), dec!(10))), dec!(10000));
        // 850000 / 12 = 70833.33...
        assert_eq!(calculator.gross_income(&employee(dec!(850000), dec!(25))), dec!(70833));
        // 895642 / 12 = 74636.83... rounds up
        assert_eq!(calculator.gross_income(&employee(dec!(895642), dec!(25))), dec!(74637));
    }

    // =========================================================================
    // income_tax tests
    // =========================================================================

    #[test]
    fn income_tax_middle_bracket() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        // (60050 - 37000) * 0.325 + 3572 = 11063.25; / 12 = 921.94
        let result = calculator.income_tax(&employee(dec!(60050), dec!(9)));

        assert_eq!(result, Ok(dec!(922)));
    }

    #[test]
    fn income_tax_fourth_bracket() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        // (120000 - 80000) * 0.37 + 17547 = 32347; / 12 = 2695.58
        let result = calculator.income_tax(&employee(dec!(120000), dec!(10)));

        assert_eq!(result, Ok(dec!(2696)));
    }

    #[test]
    fn income_tax_second_bracket() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        // (32185 - 18200) * 0.19 = 2657.15; / 12 = 221.43
        let result = calculator.income_tax(&employee(dec!(32185), dec!(25)));

        assert_eq!(result, Ok(dec!(221)));
    }

    #[test]
    fn income_tax_topmost_bracket() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        // (850000 - 180000) * 0.45 + 54547 = 356047; / 12 = 29670.58
        assert_eq!(
            calculator.income_tax(&employee(dec!(850000), dec!(25))),
            Ok(dec!(29671))
        );
        // (895642 - 180000) * 0.45 + 54547 = 376585.90; / 12 = 31382.16
        assert_eq!(
            calculator.income_tax(&employee(dec!(895642), dec!(25))),
            Ok(dec!(31382))
        );
    }

    #[test]
    fn income_tax_tax_free_threshold() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        let result = calculator.income_tax(&employee(dec!(18000), dec!(9)));

        assert_eq!(result, Ok(dec!(0)));
    }

    // =========================================================================
    // net_income tests
    // =========================================================================

    #[test]
    fn net_income_is_gross_minus_tax() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        assert_eq!(calculator.net_income(&employee(dec!(60050), dec!(9))), Ok(dec!(4082)));
        assert_eq!(calculator.net_income(&employee(dec!(120000), dec!(10))), Ok(dec!(7304)));
        assert_eq!(calculator.net_income(&employee(dec!(850000), dec!(25))), Ok(dec!(41162)));
    }

    #[test]
    fn net_income_fails_when_tax_exceeds_gross() {
        // Degenerate table taxing well above 100%.
        let table = TaxBracketTable::new(vec![TaxBracket {
            lower: dec!(0),
            upper: None,
            rate_percent: dec!(200),
            lump_sum: dec!(0),
            threshold: dec!(0),
        }])
        .unwrap();
        let calculator = PayslipCalculator::new(&table);

        let result = calculator.net_income(&employee(dec!(60000), dec!(9)));

        assert_eq!(
            result,
            Err(PayslipError::TaxExceedsGross {
                tax: dec!(10000),
                gross: dec!(5000),
            })
        );
    }

    // =========================================================================
    // super_amount tests
    // =========================================================================

    #[test]
    fn super_amount_is_rate_of_gross() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        // 5004 * 0.09 = 450.36
        assert_eq!(calculator.super_amount(&employee(dec!(60050), dec!(9))), Ok(dec!(450)));
        // 10000 * 0.10 = 1000
        assert_eq!(
            calculator.super_amount(&employee(dec!(120000), dec!(10))),
            Ok(dec!(1000))
        );
        // 2682 * 0.25 = 670.50 rounds up
        assert_eq!(calculator.super_amount(&employee(dec!(32185), dec!(25))), Ok(dec!(671)));
    }

    #[test]
    fn super_amount_rejects_rate_above_fifty() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        let result = calculator.super_amount(&employee(dec!(60050), dec!(60)));

        assert_eq!(result, Err(PayslipError::SuperRateOutOfRange(dec!(60))));
    }

    #[test]
    fn super_amount_rejects_negative_rate() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        let result = calculator.super_amount(&employee(dec!(60050), dec!(-1)));

        assert_eq!(result, Err(PayslipError::SuperRateOutOfRange(dec!(-1))));
    }

    // =========================================================================
    // calculate (integration) tests
    // =========================================================================

    #[test]
    fn calculate_standard_case() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        let payslip = calculator.calculate(&employee(dec!(60050), dec!(9))).unwrap();

        assert_eq!(payslip.full_name, "David Rudd");
        assert_eq!(payslip.pay_period, "01 March – 31 March");
        assert_eq!(payslip.gross_income, dec!(5004));
        assert_eq!(payslip.income_tax, dec!(922));
        assert_eq!(payslip.net_income, dec!(4082));
        assert_eq!(payslip.super_amount, dec!(450));
    }

    #[test]
    fn calculate_round_figures() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        let payslip = calculator.calculate(&employee(dec!(120000), dec!(10))).unwrap();

        assert_eq!(payslip.gross_income, dec!(10000));
        assert_eq!(payslip.income_tax, dec!(2696));
        assert_eq!(payslip.net_income, dec!(7304));
        assert_eq!(payslip.super_amount, dec!(1000));
    }

    #[test]
    fn calculate_high_earner() {
        let table = resident_table();
        let calculator = PayslipCalculator::new(&table);

        let payslip = calculator.calculate(&employee(dec!(895642), dec!(25))).unwrap();

        assert_eq!(payslip.gross_income, dec!(74637));
        assert_eq!(payslip.income_tax, dec!(31382));
        assert_eq!(payslip.net_income, dec!(43255));
        assert_eq!(payslip.super_amount, dec!(18659));
    }
}
