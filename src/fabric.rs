//! Fabric Drops
//!
//! A drop is one full-height piece of fabric cut from the roll; drops are
//! joined side by side until the gathered width is covered. The drop count
//! multiplies per-drop rates; the pricing grid's "drop" axis is indexed by
//! finished height instead, not by this count.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use thiserror::Error;

/// Errors raised while calculating fabric requirements.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FabricError {
    /// The computed drop count does not fit the count type.
    #[error("fabric drop count is too large to represent")]
    DropCountOverflow,
}

/// Assumed fabric roll width for drop calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FabricWidthType {
    /// 140cm roll.
    Narrow,

    /// 280cm roll.
    #[default]
    Wide,
}

impl FabricWidthType {
    /// Roll width in centimetres.
    pub fn roll_width(self) -> Decimal {
        match self {
            Self::Narrow => Decimal::from(140),
            Self::Wide => Decimal::from(280),
        }
    }
}

/// Number of fabric drops needed to cover a finished width.
///
/// The gathered width is `finished_width x fullness`; the count is that
/// width divided by the roll width, rounded up, and never less than 1 even
/// when a single roll width more than covers the window.
///
/// # Errors
///
/// Returns [`FabricError::DropCountOverflow`] if the count exceeds `u32`.
pub fn drops_required(
    finished_width: Decimal,
    fullness: Decimal,
    roll_width: Decimal,
) -> Result<u32, FabricError> {
    let gathered = finished_width
        .checked_mul(fullness)
        .ok_or(FabricError::DropCountOverflow)?;

    let drops = gathered
        .checked_div(roll_width)
        .ok_or(FabricError::DropCountOverflow)?
        .ceil()
        .to_u32()
        .ok_or(FabricError::DropCountOverflow)?;

    Ok(drops.max(1))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn roll_widths() {
        assert_eq!(FabricWidthType::Narrow.roll_width(), Decimal::from(140));
        assert_eq!(FabricWidthType::Wide.roll_width(), Decimal::from(280));
    }

    #[test]
    fn default_roll_is_wide() {
        assert_eq!(FabricWidthType::default(), FabricWidthType::Wide);
    }

    #[test]
    fn partial_drop_rounds_up() -> TestResult {
        // 300 / 137 = 2.19..., so a third drop is needed.
        let drops = drops_required(Decimal::from(300), Decimal::ONE, Decimal::from(137))?;

        assert_eq!(drops, 3);

        Ok(())
    }

    #[test]
    fn narrow_window_still_needs_one_drop() -> TestResult {
        let drops = drops_required(
            Decimal::from(60),
            Decimal::ONE,
            FabricWidthType::Wide.roll_width(),
        )?;

        assert_eq!(drops, 1);

        Ok(())
    }

    #[test]
    fn fullness_multiplies_the_covered_width() -> TestResult {
        // 200cm track at 2.0x fullness needs 400cm of fabric: two 280cm drops.
        let drops = drops_required(
            Decimal::from(200),
            Decimal::TWO,
            FabricWidthType::Wide.roll_width(),
        )?;

        assert_eq!(drops, 2);

        Ok(())
    }

    #[test]
    fn exact_multiple_does_not_round_up() -> TestResult {
        let drops = drops_required(
            Decimal::from(280),
            Decimal::ONE,
            FabricWidthType::Narrow.roll_width(),
        )?;

        assert_eq!(drops, 2);

        Ok(())
    }

    #[test]
    fn drop_count_is_at_least_one_for_any_positive_width() -> TestResult {
        for width in [1, 10, 139, 140, 141, 280, 1000] {
            let drops = drops_required(
                Decimal::from(width),
                Decimal::ONE,
                FabricWidthType::Narrow.roll_width(),
            )?;

            assert!(drops >= 1, "width {width} produced zero drops");
        }

        Ok(())
    }

    #[test]
    fn absurd_width_overflows_instead_of_wrapping() {
        let result = drops_required(
            Decimal::MAX,
            Decimal::ONE,
            Decimal::new(1, 10),
        );

        assert!(matches!(result, Err(FabricError::DropCountOverflow)));
    }
}
