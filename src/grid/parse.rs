//! Grid CSV parsing and serialisation
//!
//! The persisted grid format is a rectangular CSV. Row 1 is
//! `Drop/Width,<width label>,...`; every later row is `<drop label>,<price>,...`
//! with exactly as many price cells as there are width labels. A malformed
//! row invalidates the whole grid; partial grids are never accepted.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    grid::{GridAxis, PricingGrid, labels},
    money::{major_string, minor_from_major},
    spans::Span,
};

/// Corner cell written by the serialiser; ignored when parsing.
const CORNER_CELL: &str = "Drop/Width";

/// Errors raised while parsing a grid CSV. Row numbers are 1-based.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridParseError {
    /// The file contained no rows at all.
    #[error("pricing grid CSV is empty")]
    Empty,

    /// The header row defined no width columns.
    #[error("pricing grid header defines no width columns")]
    NoWidthColumns,

    /// The file had a header but no data rows.
    #[error("pricing grid has no data rows")]
    NoRows,

    /// A data row's cell count did not match the header.
    #[error("row {row}: expected {expected} price cells, found {found}")]
    RowWidthMismatch {
        /// 1-based row number.
        row: usize,

        /// Width columns declared by the header.
        expected: usize,

        /// Price cells found on this row.
        found: usize,
    },

    /// A price cell did not parse as a number.
    #[error("row {row}: price cell {value:?} is not numeric")]
    NonNumericPrice {
        /// 1-based row number.
        row: usize,

        /// The offending cell text.
        value: String,
    },

    /// A bucket label did not match the range grammar.
    #[error("row {row}: range label {label:?} is not \"<min>-<max>cm\" or \"<min>cm+\"")]
    InvalidLabel {
        /// 1-based row number.
        row: usize,

        /// The offending label text.
        label: String,
    },
}

impl<'a> PricingGrid<'a> {
    /// Parse a pricing grid from CSV text.
    ///
    /// Cell prices are major-unit amounts in the given currency. Bucket
    /// bounds are derived from the labels here, once; any label or price
    /// that fails to parse rejects the whole grid with its 1-based row
    /// number.
    ///
    /// # Errors
    ///
    /// Returns a [`GridParseError`] describing the first defect found.
    pub fn parse(csv: &str, currency: &'a Currency) -> Result<Self, GridParseError> {
        let mut rows = csv.lines().map(|line| line.trim_end_matches('\r'));

        let header = rows.next().ok_or(GridParseError::Empty)?;
        let mut header_cells = header.split(',');

        // The corner cell is display text only.
        let _corner = header_cells.next().ok_or(GridParseError::Empty)?;

        let widths = parse_axis_labels(header_cells.map(str::to_string), 1)?;

        if widths.is_empty() {
            return Err(GridParseError::NoWidthColumns);
        }

        let mut drop_labels = Vec::new();
        let mut cells = Vec::new();

        for (index, line) in rows.enumerate() {
            let row = index + 2;
            let mut row_cells = line.split(',');

            let label = row_cells
                .next()
                .ok_or(GridParseError::RowWidthMismatch {
                    row,
                    expected: widths.len(),
                    found: 0,
                })?
                .to_string();

            let prices = row_cells
                .map(|cell| parse_price_cell(cell, row, currency))
                .collect::<Result<Vec<_>, _>>()?;

            if prices.len() != widths.len() {
                return Err(GridParseError::RowWidthMismatch {
                    row,
                    expected: widths.len(),
                    found: prices.len(),
                });
            }

            drop_labels.push(label);
            cells.push(prices);
        }

        if cells.is_empty() {
            return Err(GridParseError::NoRows);
        }

        let drops = parse_axis_labels(drop_labels.into_iter(), 2)?;

        Ok(Self {
            widths,
            drops,
            cells,
        })
    }

    /// Serialise the grid back to its CSV form.
    ///
    /// Labels are reproduced verbatim; prices are written as bare
    /// major-unit numbers with trailing zeros trimmed, so parsing the
    /// documented sample and serialising it again reproduces the file
    /// byte for byte.
    pub fn to_csv(&self) -> String {
        let mut out = String::from(CORNER_CELL);

        for label in self.widths.labels() {
            out.push(',');
            out.push_str(label);
        }

        out.push('\n');

        for (label, row) in self.drops.labels().iter().zip(&self.cells) {
            out.push_str(label);

            for cell in row {
                out.push(',');
                out.push_str(&major_string(cell.to_minor_units()));
            }

            out.push('\n');
        }

        out
    }
}

/// Build an axis from labels, deriving bucket bounds as we go.
///
/// `first_row` is the 1-based row the first label sits on: 1 for the width
/// header, 2 for the first drop row.
fn parse_axis_labels<I>(label_iter: I, first_row: usize) -> Result<GridAxis, GridParseError>
where
    I: Iterator<Item = String>,
{
    let mut axis_labels = Vec::new();
    let mut buckets = Vec::new();

    for (index, label) in label_iter.enumerate() {
        let (min, max) = labels::bounds(&label).ok_or_else(|| GridParseError::InvalidLabel {
            // Width labels share the header row; drop labels advance a row
            // each.
            row: if first_row == 1 { 1 } else { first_row + index },
            label: label.clone(),
        })?;

        buckets.push(Span::new(min, max, index));
        axis_labels.push(label);
    }

    Ok(GridAxis {
        labels: axis_labels,
        buckets,
    })
}

fn parse_price_cell<'a>(
    cell: &str,
    row: usize,
    currency: &'a Currency,
) -> Result<Money<'a, Currency>, GridParseError> {
    cell.trim()
        .parse::<Decimal>()
        .ok()
        .and_then(minor_from_major)
        .map(|minor| Money::from_minor(minor, currency))
        .ok_or_else(|| GridParseError::NonNumericPrice {
            row,
            value: cell.to_string(),
        })
}
