//! Shared calculation utilities.

use rust_decimal::Decimal;

/// Rounds a value half-up to the nearest whole dollar.
///
/// `floor(x)` when the fractional part is below 0.5, otherwise
/// `floor(x) + 1`. This is the rule the payroll figures are defined in
/// terms of; it is not banker's rounding, and unlike midpoint-away-from-zero
/// it keeps rounding upward for negative midpoints (`-0.5` becomes `0`).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use payroll_core::calculations::common::round_dollars;
///
/// assert_eq!(round_dollars(dec!(0.49)), dec!(0));
/// assert_eq!(round_dollars(dec!(0.5)), dec!(1));
/// assert_eq!(round_dollars(dec!(10.5)), dec!(11));
/// ```
pub fn round_dollars(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}
