//! Pelmet
//!
//! Pelmet is a template-driven pricing resolution engine for made-to-measure window furnishings.
//!
//! A merchant-authored [`template::PricingTemplate`] and one order's
//! [`dimensions::OrderDimensions`] go in; a [`pricing::PriceResult`] comes
//! out. The pipeline is a pure, synchronous computation: dimensions are
//! normalised, fabric drops counted, the effective rate (or grid cell)
//! resolved, and the result aggregated with lining and waste.

pub mod dimensions;
pub mod fabric;
pub mod fixtures;
pub mod grid;
pub mod money;
pub mod prelude;
pub mod pricing;
pub mod rates;
pub mod spans;
pub mod template;
pub mod utils;
