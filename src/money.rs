//! Money scaling utilities
//!
//! Shared helpers for scaling minor-unit amounts by decimal factors
//! (billed metres, drop counts, waste uplifts). All rounding is
//! half-away-from-zero at the final minor-unit step.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::MoneyError;
use thiserror::Error;

/// Errors specific to money scaling.
#[derive(Debug, Error)]
pub enum MoneyMathError {
    /// A scaled amount overflowed or could not be safely represented.
    #[error("money scaling overflowed or was not representable")]
    Overflow,

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Scale a minor-unit amount by a decimal factor, rounding half away from zero.
///
/// # Errors
///
/// Returns [`MoneyMathError::Overflow`] if the multiplication overflows or the
/// result does not fit in an `i64`.
pub fn scale_minor(minor: i64, factor: Decimal) -> Result<i64, MoneyMathError> {
    Decimal::from_i64(minor)
        .ok_or(MoneyMathError::Overflow)?
        .checked_mul(factor)
        .ok_or(MoneyMathError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(MoneyMathError::Overflow)
}

/// Calculate a percentage of a minor-unit amount.
///
/// # Errors
///
/// Returns [`MoneyMathError::Overflow`] if the calculation overflows or cannot
/// be safely represented.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Result<i64, MoneyMathError> {
    // decimal_percentage doesn't expose its inner Decimal; multiplying by one
    // recovers it.
    scale_minor(minor, percent * Decimal::ONE)
}

/// Convert a decimal major-unit amount (e.g. a parsed "24.50") to minor units.
///
/// Returns `None` when the amount overflows or carries more precision than a
/// two-exponent currency can hold once rounded.
pub fn minor_from_major(amount: Decimal) -> Option<i64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Render a minor-unit amount as a bare major-unit number, trailing zeros
/// trimmed, as grid CSV cells are written.
pub fn major_string(minor: i64) -> String {
    Decimal::new(minor, 2).normalize().to_string()
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn scale_minor_multiplies_and_rounds() -> TestResult {
        assert_eq!(scale_minor(2000, Decimal::new(25, 1))?, 5000);
        assert_eq!(scale_minor(333, Decimal::new(5, 1))?, 167);

        Ok(())
    }

    #[test]
    fn scale_minor_rounds_midpoints_away_from_zero() -> TestResult {
        assert_eq!(scale_minor(5, Decimal::new(5, 1))?, 3);
        assert_eq!(scale_minor(-5, Decimal::new(5, 1))?, -3);

        Ok(())
    }

    #[test]
    fn scale_minor_overflow_returns_error() {
        let result = scale_minor(i64::MAX, Decimal::from(i64::MAX));

        assert!(matches!(result, Err(MoneyMathError::Overflow)));
    }

    #[test]
    fn percent_of_minor_calculates_correctly() -> TestResult {
        let percent = Percentage::from(0.25);

        assert_eq!(percent_of_minor(percent, 200)?, 50);

        Ok(())
    }

    #[test]
    fn percent_of_minor_zero_percent_is_zero() -> TestResult {
        assert_eq!(percent_of_minor(Percentage::from(0.0), 12_345)?, 0);

        Ok(())
    }

    #[test]
    fn minor_from_major_converts_two_decimal_amounts() {
        assert_eq!(minor_from_major(Decimal::new(2450, 2)), Some(2450));
        assert_eq!(minor_from_major(Decimal::from(120)), Some(12_000));
    }

    #[test]
    fn major_string_trims_trailing_zeros() {
        assert_eq!(major_string(12_000), "120");
        assert_eq!(major_string(17_550), "175.5");
        assert_eq!(major_string(5), "0.05");
    }
}
