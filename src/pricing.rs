//! Price Aggregation
//!
//! The top of the pricing pipeline: normalised dimensions and a template go
//! in, a [`PriceResult`] comes out. Every failure is terminal for the call;
//! no partial or estimated price is ever returned, because a wrong quote is
//! worse than no quote.

use std::io;

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    dimensions::{DimensionError, OrderDimensions, OrderForm},
    fabric::{self, FabricError},
    grid::GridLookupError,
    money::{MoneyMathError, percent_of_minor, scale_minor},
    rates::{RateError, resolve_rate},
    template::{LiningCharges, PricingMethod, PricingTemplate},
};

/// Errors raised while pricing an order line.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The order form failed validation.
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    /// The template could not resolve a rate for the request.
    #[error(transparent)]
    Rate(#[from] RateError),

    /// The order's dimensions fell outside the pricing grid.
    #[error(transparent)]
    GridLookup(#[from] GridLookupError),

    /// Fabric drop arithmetic failed.
    #[error(transparent)]
    Fabric(#[from] FabricError),

    /// Money scaling failed.
    #[error(transparent)]
    Money(#[from] MoneyMathError),

    /// The template selects grid pricing but carries no grid.
    #[error("template prices from a grid but no grid is configured")]
    GridMissing,
}

/// The priced outcome for one order line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceResult<'a> {
    unit_price: Money<'a, Currency>,
    quantity_used: u32,
    lining_cost: Money<'a, Currency>,
    subtotal: Money<'a, Currency>,
    total: Money<'a, Currency>,
}

impl<'a> PriceResult<'a> {
    /// The resolved per-unit rate or grid cell price.
    pub const fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// The billed unit count: total drops for per-drop pricing, otherwise
    /// the order quantity.
    pub const fn quantity_used(&self) -> u32 {
        self.quantity_used
    }

    /// Lining fabric and labour cost across the whole line.
    pub const fn lining_cost(&self) -> Money<'a, Currency> {
        self.lining_cost
    }

    /// Method subtotal before lining and waste.
    pub const fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Final total: subtotal plus lining, uplifted by the waste percentage.
    pub const fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Write a tabular breakdown of the result.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the sink fails.
    pub fn write_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut builder = Builder::default();

        builder.push_record(["Unit price", &self.unit_price.to_string()]);
        builder.push_record(["Quantity billed", &self.quantity_used.to_string()]);
        builder.push_record(["Subtotal", &self.subtotal.to_string()]);
        builder.push_record(["Lining", &self.lining_cost.to_string()]);
        builder.push_record(["Total", &self.total.to_string()]);

        let mut table = builder.build();

        table.with(Style::sharp());
        table.modify(Columns::last(), Alignment::right());

        writeln!(writer, "{table}")
    }
}

/// Normalise a raw order form and price it against a template.
///
/// # Errors
///
/// Returns a [`QuoteError`] from either normalisation or pricing.
pub fn quote<'a>(
    template: &PricingTemplate<'a>,
    form: &OrderForm,
) -> Result<PriceResult<'a>, QuoteError> {
    let dims = form.normalize()?;

    price_order(template, &dims)
}

/// Price normalised order dimensions against a template.
///
/// # Errors
///
/// Returns a [`QuoteError`] when a rate or grid cell cannot be resolved or
/// the arithmetic cannot be represented.
pub fn price_order<'a>(
    template: &PricingTemplate<'a>,
    dims: &OrderDimensions,
) -> Result<PriceResult<'a>, QuoteError> {
    let currency = template.currency();
    let quantity = Decimal::from(dims.quantity());

    let (unit_price, quantity_used, subtotal_minor) = method_subtotal(template, dims, quantity)?;

    let lining_minor = match template.lining() {
        Some(lining) => lining_total(lining, dims, quantity)?,
        None => 0,
    };

    let base_minor = subtotal_minor
        .checked_add(lining_minor)
        .ok_or(MoneyMathError::Overflow)?;
    let waste_minor = percent_of_minor(template.waste(), base_minor)?;
    let total_minor = base_minor
        .checked_add(waste_minor)
        .ok_or(MoneyMathError::Overflow)?;

    Ok(PriceResult {
        unit_price,
        quantity_used,
        lining_cost: Money::from_minor(lining_minor, currency),
        subtotal: Money::from_minor(subtotal_minor, currency),
        total: Money::from_minor(total_minor, currency),
    })
}

/// Run the configured method's resolver path: the effective unit price, the
/// billed unit count, and the method subtotal in minor units.
fn method_subtotal<'a>(
    template: &PricingTemplate<'a>,
    dims: &OrderDimensions,
    quantity: Decimal,
) -> Result<(Money<'a, Currency>, u32, i64), QuoteError> {
    match template.method() {
        PricingMethod::PerMetre => {
            let rate =
                resolve_rate(template, dims.heading(), dims.finished_height(), dims.finish())?;
            let billed_metres = dims
                .height_in_metres()
                .checked_mul(quantity)
                .ok_or(MoneyMathError::Overflow)?;

            Ok((
                rate,
                dims.quantity(),
                scale_minor(rate.to_minor_units(), billed_metres)?,
            ))
        }
        PricingMethod::PerDrop => {
            let rate =
                resolve_rate(template, dims.heading(), dims.finished_height(), dims.finish())?;
            let drops = fabric::drops_required(
                dims.finished_width(),
                dims.fullness(),
                template.fabric_width().roll_width(),
            )?;
            let total_drops = drops
                .checked_mul(dims.quantity())
                .ok_or(FabricError::DropCountOverflow)?;

            Ok((
                rate,
                total_drops,
                scale_minor(rate.to_minor_units(), Decimal::from(total_drops))?,
            ))
        }
        PricingMethod::PerPanel | PricingMethod::PerUnit => {
            let rate =
                resolve_rate(template, dims.heading(), dims.finished_height(), dims.finish())?;

            Ok((
                rate,
                dims.quantity(),
                scale_minor(rate.to_minor_units(), quantity)?,
            ))
        }
        PricingMethod::PerSquareMetre => {
            let rate =
                resolve_rate(template, dims.heading(), dims.finished_height(), dims.finish())?;
            let billed_area = dims
                .area_in_square_metres()
                .checked_mul(quantity)
                .ok_or(MoneyMathError::Overflow)?;

            Ok((
                rate,
                dims.quantity(),
                scale_minor(rate.to_minor_units(), billed_area)?,
            ))
        }
        PricingMethod::Grid => {
            let grid = template.grid().ok_or(QuoteError::GridMissing)?;
            let cell = grid.lookup(dims.finished_width(), dims.finished_height())?;

            Ok((
                cell,
                dims.quantity(),
                scale_minor(cell.to_minor_units(), quantity)?,
            ))
        }
    }
}

/// Lining cost across the whole line: fabric per billed metre plus labour
/// per item.
fn lining_total(
    lining: &LiningCharges<'_>,
    dims: &OrderDimensions,
    quantity: Decimal,
) -> Result<i64, MoneyMathError> {
    let billed_metres = dims
        .height_in_metres()
        .checked_mul(quantity)
        .ok_or(MoneyMathError::Overflow)?;
    let fabric_minor = scale_minor(lining.price_per_metre().to_minor_units(), billed_metres)?;
    let labour_minor = scale_minor(lining.labour_per_item().to_minor_units(), quantity)?;

    fabric_minor
        .checked_add(labour_minor)
        .ok_or(MoneyMathError::Overflow)
}
