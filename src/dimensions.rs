//! Order Dimensions
//!
//! Normalises raw order-form input into canonical metric dimensions. All
//! lengths are centimetres; defaults (fullness 1, quantity 1) are applied
//! here, once, and never downstream.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::rates::{FinishMode, HeadingKey};

/// Errors raised while normalising raw order input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    /// A field could not be parsed as a number.
    #[error("{field} {value:?} is not a number")]
    NotNumeric {
        /// Name of the offending form field.
        field: &'static str,

        /// The raw value as entered.
        value: String,
    },

    /// A length field was zero or negative.
    #[error("{field} must be greater than zero, got {value}")]
    NotPositive {
        /// Name of the offending form field.
        field: &'static str,

        /// The parsed value.
        value: Decimal,
    },

    /// The fullness ratio gathers less fabric than the track is wide.
    #[error("fullness ratio must be at least 1, got {0}")]
    FullnessBelowOne(Decimal),

    /// The order quantity was zero.
    #[error("quantity must be at least 1")]
    ZeroQuantity,
}

/// Raw order-entry values as they arrive from the quote form.
///
/// Lengths are free-text strings; `fullness` and `quantity` may be blank.
#[derive(Debug, Clone, Default)]
pub struct OrderForm {
    /// Finished width in centimetres.
    pub width: String,

    /// Finished height (drop) in centimetres.
    pub height: String,

    /// Fullness ratio; blank means 1 (blinds, shutters).
    pub fullness: Option<String>,

    /// Number of panels/units; blank means 1.
    pub quantity: Option<String>,

    /// Whether hand-finished construction was requested.
    pub hand_finished: bool,

    /// Optional heading style carrying its own rate override.
    pub heading: Option<HeadingKey>,
}

impl OrderForm {
    /// Normalise the form into canonical [`OrderDimensions`].
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionError`] if the width or height is non-numeric or
    /// non-positive, the fullness ratio is below 1, or the quantity is zero.
    pub fn normalize(&self) -> Result<OrderDimensions, DimensionError> {
        let finished_width = parse_length("width", &self.width)?;
        let finished_height = parse_length("height", &self.height)?;

        let fullness = match self.fullness.as_deref() {
            Some(raw) => {
                let ratio = parse_number("fullness", raw)?;

                if ratio < Decimal::ONE {
                    return Err(DimensionError::FullnessBelowOne(ratio));
                }

                ratio
            }
            None => Decimal::ONE,
        };

        let quantity = match self.quantity.as_deref() {
            Some(raw) => {
                let count =
                    raw.trim()
                        .parse::<u32>()
                        .map_err(|_err| DimensionError::NotNumeric {
                            field: "quantity",
                            value: raw.to_string(),
                        })?;

                if count == 0 {
                    return Err(DimensionError::ZeroQuantity);
                }

                count
            }
            None => 1,
        };

        let finish = if self.hand_finished {
            FinishMode::Hand
        } else {
            FinishMode::Machine
        };

        Ok(OrderDimensions {
            finished_width,
            finished_height,
            fullness,
            quantity,
            finish,
            heading: self.heading,
        })
    }
}

/// Canonical dimensions for one quoted line item.
///
/// Always constructed through [`OrderForm::normalize`] or [`OrderDimensions::new`],
/// so every length is a positive centimetre value and the fullness ratio is
/// at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderDimensions {
    finished_width: Decimal,
    finished_height: Decimal,
    fullness: Decimal,
    quantity: u32,
    finish: FinishMode,
    heading: Option<HeadingKey>,
}

impl OrderDimensions {
    /// Create dimensions from already-validated values.
    ///
    /// # Errors
    ///
    /// Returns a [`DimensionError`] under the same rules as
    /// [`OrderForm::normalize`].
    pub fn new(
        finished_width: Decimal,
        finished_height: Decimal,
        fullness: Decimal,
        quantity: u32,
        finish: FinishMode,
        heading: Option<HeadingKey>,
    ) -> Result<Self, DimensionError> {
        if finished_width <= Decimal::ZERO {
            return Err(DimensionError::NotPositive {
                field: "width",
                value: finished_width,
            });
        }

        if finished_height <= Decimal::ZERO {
            return Err(DimensionError::NotPositive {
                field: "height",
                value: finished_height,
            });
        }

        if fullness < Decimal::ONE {
            return Err(DimensionError::FullnessBelowOne(fullness));
        }

        if quantity == 0 {
            return Err(DimensionError::ZeroQuantity);
        }

        Ok(Self {
            finished_width,
            finished_height,
            fullness,
            quantity,
            finish,
            heading,
        })
    }

    /// Finished width in centimetres.
    pub const fn finished_width(&self) -> Decimal {
        self.finished_width
    }

    /// Finished height (drop) in centimetres.
    pub const fn finished_height(&self) -> Decimal {
        self.finished_height
    }

    /// Fullness ratio applied to the finished width.
    pub const fn fullness(&self) -> Decimal {
        self.fullness
    }

    /// Number of panels/units ordered.
    pub const fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Requested construction mode.
    pub const fn finish(&self) -> FinishMode {
        self.finish
    }

    /// Optional heading style reference.
    pub const fn heading(&self) -> Option<HeadingKey> {
        self.heading
    }

    /// Finished height expressed in metres.
    pub fn height_in_metres(&self) -> Decimal {
        self.finished_height / Decimal::ONE_HUNDRED
    }

    /// Finished width x height expressed in square metres.
    pub fn area_in_square_metres(&self) -> Decimal {
        (self.finished_width / Decimal::ONE_HUNDRED) * (self.finished_height / Decimal::ONE_HUNDRED)
    }
}

fn parse_number(field: &'static str, raw: &str) -> Result<Decimal, DimensionError> {
    raw.trim()
        .parse::<Decimal>()
        .map_err(|_err| DimensionError::NotNumeric {
            field,
            value: raw.to_string(),
        })
}

fn parse_length(field: &'static str, raw: &str) -> Result<Decimal, DimensionError> {
    let value = parse_number(field, raw)?;

    if value <= Decimal::ZERO {
        return Err(DimensionError::NotPositive { field, value });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn form(width: &str, height: &str) -> OrderForm {
        OrderForm {
            width: width.to_string(),
            height: height.to_string(),
            ..OrderForm::default()
        }
    }

    #[test]
    fn normalize_parses_lengths_and_applies_defaults() -> TestResult {
        let dims = form("120", "210.5").normalize()?;

        assert_eq!(dims.finished_width(), Decimal::from(120));
        assert_eq!(dims.finished_height(), Decimal::new(2105, 1));
        assert_eq!(dims.fullness(), Decimal::ONE);
        assert_eq!(dims.quantity(), 1);
        assert_eq!(dims.finish(), FinishMode::Machine);
        assert_eq!(dims.heading(), None);

        Ok(())
    }

    #[test]
    fn normalize_accepts_surrounding_whitespace() -> TestResult {
        let dims = form(" 120 ", " 200 ").normalize()?;

        assert_eq!(dims.finished_width(), Decimal::from(120));

        Ok(())
    }

    #[test]
    fn normalize_rejects_non_numeric_width() {
        let result = form("wide", "200").normalize();

        assert!(matches!(
            result,
            Err(DimensionError::NotNumeric { field: "width", .. })
        ));
    }

    #[test]
    fn normalize_rejects_zero_and_negative_lengths() {
        assert!(matches!(
            form("0", "200").normalize(),
            Err(DimensionError::NotPositive { field: "width", .. })
        ));
        assert!(matches!(
            form("120", "-3").normalize(),
            Err(DimensionError::NotPositive { field: "height", .. })
        ));
    }

    #[test]
    fn normalize_rejects_fullness_below_one() {
        let mut raw = form("120", "200");
        raw.fullness = Some("0.8".to_string());

        assert!(matches!(
            raw.normalize(),
            Err(DimensionError::FullnessBelowOne(_))
        ));
    }

    #[test]
    fn normalize_parses_fullness_and_quantity() -> TestResult {
        let mut raw = form("120", "200");
        raw.fullness = Some("2.2".to_string());
        raw.quantity = Some("3".to_string());
        raw.hand_finished = true;

        let dims = raw.normalize()?;

        assert_eq!(dims.fullness(), Decimal::new(22, 1));
        assert_eq!(dims.quantity(), 3);
        assert_eq!(dims.finish(), FinishMode::Hand);

        Ok(())
    }

    #[test]
    fn normalize_rejects_zero_quantity() {
        let mut raw = form("120", "200");
        raw.quantity = Some("0".to_string());

        assert!(matches!(raw.normalize(), Err(DimensionError::ZeroQuantity)));
    }

    #[test]
    fn normalize_rejects_fractional_quantity() {
        let mut raw = form("120", "200");
        raw.quantity = Some("1.5".to_string());

        assert!(matches!(
            raw.normalize(),
            Err(DimensionError::NotNumeric {
                field: "quantity",
                ..
            })
        ));
    }

    #[test]
    fn new_enforces_the_same_rules_as_normalize() {
        assert!(matches!(
            OrderDimensions::new(
                Decimal::ZERO,
                Decimal::from(200),
                Decimal::ONE,
                1,
                FinishMode::Machine,
                None,
            ),
            Err(DimensionError::NotPositive { field: "width", .. })
        ));

        assert!(matches!(
            OrderDimensions::new(
                Decimal::from(120),
                Decimal::from(200),
                Decimal::ONE,
                0,
                FinishMode::Machine,
                None,
            ),
            Err(DimensionError::ZeroQuantity)
        ));
    }

    #[test]
    fn metric_conversions() -> TestResult {
        let dims = OrderDimensions::new(
            Decimal::from(150),
            Decimal::from(220),
            Decimal::ONE,
            1,
            FinishMode::Machine,
            None,
        )?;

        assert_eq!(dims.height_in_metres(), Decimal::new(22, 1));
        assert_eq!(dims.area_in_square_metres(), Decimal::new(33, 1));

        Ok(())
    }
}
