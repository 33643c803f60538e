//! Pricing Grids
//!
//! A two-axis discrete price matrix: width buckets across, drop buckets
//! down. Buckets carry their display label and the numeric bounds derived
//! from it at parse time. The "drop" axis is indexed by finished height in
//! centimetres, not by fabric-drop count.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::spans::{self, Span};

mod labels;
mod parse;

pub use parse::GridParseError;

/// Errors raised by grid point lookups.
///
/// A dimension falling outside every configured bucket is rejected rather
/// than clamped to the nearest bucket; silent clamping would hide pricing
/// mistakes from the merchant.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridLookupError {
    /// The queried width is outside every width bucket.
    #[error("width {0}cm is outside every configured width bucket")]
    WidthOutOfRange(Decimal),

    /// The queried height is outside every drop bucket.
    #[error("drop {0}cm is outside every configured drop bucket")]
    DropOutOfRange(Decimal),

    /// The resolved cell is absent from the matrix.
    #[error("grid cell ({drop_index}, {width_index}) is missing")]
    CellMissing {
        /// Resolved drop bucket index.
        drop_index: usize,

        /// Resolved width bucket index.
        width_index: usize,
    },
}

/// One grid axis: ordered bucket labels plus the bounds derived from them.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxis {
    labels: Vec<String>,
    buckets: Vec<Span<usize>>,
}

impl GridAxis {
    /// Return the bucket labels in configured order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of buckets on this axis.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the axis has no buckets.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Resolve a point to its bucket index, first match winning.
    pub fn index_of(&self, point: Decimal) -> Option<usize> {
        spans::resolve(&self.buckets, point).copied()
    }
}

/// A parsed pricing grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PricingGrid<'a> {
    widths: GridAxis,
    drops: GridAxis,
    cells: Vec<Vec<Money<'a, Currency>>>,
}

impl<'a> PricingGrid<'a> {
    /// Return the width axis.
    pub const fn widths(&self) -> &GridAxis {
        &self.widths
    }

    /// Return the drop axis.
    pub const fn drops(&self) -> &GridAxis {
        &self.drops
    }

    /// Price the cell covering a finished width and height, both in
    /// centimetres.
    ///
    /// # Errors
    ///
    /// Returns a [`GridLookupError`] naming the offending axis and value
    /// when either dimension is outside every configured bucket.
    pub fn lookup(
        &self,
        width: Decimal,
        height: Decimal,
    ) -> Result<Money<'a, Currency>, GridLookupError> {
        let width_index = self
            .widths
            .index_of(width)
            .ok_or(GridLookupError::WidthOutOfRange(width))?;

        let drop_index = self
            .drops
            .index_of(height)
            .ok_or(GridLookupError::DropOutOfRange(height))?;

        self.cells
            .get(drop_index)
            .and_then(|row| row.get(width_index))
            .copied()
            .ok_or(GridLookupError::CellMissing {
                drop_index,
                width_index,
            })
    }
}
