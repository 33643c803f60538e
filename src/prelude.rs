//! Pelmet prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    dimensions::{DimensionError, OrderDimensions, OrderForm},
    fabric::{FabricError, FabricWidthType, drops_required},
    fixtures::{FixtureError, LoadedTemplate, TemplateLibrary},
    grid::{GridAxis, GridLookupError, GridParseError, PricingGrid},
    money::MoneyMathError,
    pricing::{PriceResult, QuoteError, price_order, quote},
    rates::{BaseRates, FinishMode, HeadingKey, ModeRates, RateError, resolve_rate},
    spans::Span,
    template::{LiningCharges, PricingMethod, PricingTemplate},
};
