//! Pricing Templates
//!
//! Merchant-authored pricing configuration. A template picks one pricing
//! method and carries the rates, tiers, overrides, grid, lining charges and
//! waste uplift that method needs. Templates are immutable for the duration
//! of a pricing call.

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::{
    fabric::FabricWidthType,
    grid::PricingGrid,
    rates::{BaseRates, HeadingKey, ModeRates},
    spans::Span,
};

/// How a template turns dimensions into a price.
///
/// Closed set: every screen that quotes a price dispatches on this enum, so
/// each resolver path is statically checked rather than compared by string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMethod {
    /// Rate x finished height in metres x quantity. Height, not fabric
    /// width, is the billed dimension for this method.
    PerMetre,

    /// Rate x fabric drop count x quantity.
    PerDrop,

    /// Rate x quantity, regardless of drops.
    PerPanel,

    /// Rate x finished area in square metres x quantity.
    PerSquareMetre,

    /// Rate x quantity.
    PerUnit,

    /// Grid cell for (width, height) x quantity.
    Grid,
}

/// Lining charges added on top of the method subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiningCharges<'a> {
    price_per_metre: Money<'a, Currency>,
    labour_per_item: Money<'a, Currency>,
}

impl<'a> LiningCharges<'a> {
    /// Create lining charges from a per-metre fabric price and per-item labour.
    pub const fn new(
        price_per_metre: Money<'a, Currency>,
        labour_per_item: Money<'a, Currency>,
    ) -> Self {
        Self {
            price_per_metre,
            labour_per_item,
        }
    }

    /// Lining fabric price per metre of finished height.
    pub const fn price_per_metre(&self) -> Money<'a, Currency> {
        self.price_per_metre
    }

    /// Labour charge per lined item.
    pub const fn labour_per_item(&self) -> Money<'a, Currency> {
        self.labour_per_item
    }
}

/// A merchant-authored pricing template.
#[derive(Debug, Clone)]
pub struct PricingTemplate<'a> {
    method: PricingMethod,
    base_rates: BaseRates<'a>,
    height_tiers: SmallVec<[Span<ModeRates<'a>>; 4]>,
    heading_overrides: SlotMap<HeadingKey, ModeRates<'a>>,
    fabric_width: FabricWidthType,
    grid: Option<PricingGrid<'a>>,
    lining: Option<LiningCharges<'a>>,
    waste: Percentage,
}

impl<'a> PricingTemplate<'a> {
    /// Create a template with no tiers, overrides, grid or lining, the
    /// default wide fabric roll, and zero waste.
    pub fn new(method: PricingMethod, base_rates: BaseRates<'a>) -> Self {
        Self {
            method,
            base_rates,
            height_tiers: SmallVec::new(),
            heading_overrides: SlotMap::with_key(),
            fabric_width: FabricWidthType::default(),
            grid: None,
            lining: None,
            waste: Percentage::from(0.0),
        }
    }

    /// Replace the height tiers, preserving the given order.
    #[must_use]
    pub fn with_height_tiers<I>(mut self, tiers: I) -> Self
    where
        I: IntoIterator<Item = Span<ModeRates<'a>>>,
    {
        self.height_tiers = tiers.into_iter().collect();
        self
    }

    /// Set the assumed fabric roll width for drop calculations.
    #[must_use]
    pub fn with_fabric_width(mut self, fabric_width: FabricWidthType) -> Self {
        self.fabric_width = fabric_width;
        self
    }

    /// Attach a pricing grid.
    #[must_use]
    pub fn with_grid(mut self, grid: PricingGrid<'a>) -> Self {
        self.grid = Some(grid);
        self
    }

    /// Attach lining charges.
    #[must_use]
    pub fn with_lining(mut self, lining: LiningCharges<'a>) -> Self {
        self.lining = Some(lining);
        self
    }

    /// Set the waste uplift applied after the base computation.
    #[must_use]
    pub fn with_waste(mut self, waste: Percentage) -> Self {
        self.waste = waste;
        self
    }

    /// Register a heading-style rate override and return its key.
    pub fn add_heading_override(&mut self, rates: ModeRates<'a>) -> HeadingKey {
        self.heading_overrides.insert(rates)
    }

    /// Return the pricing method.
    pub const fn method(&self) -> PricingMethod {
        self.method
    }

    /// Return the base rates.
    pub const fn base_rates(&self) -> &BaseRates<'a> {
        &self.base_rates
    }

    /// Return the height tiers in merchant order.
    pub fn height_tiers(&self) -> &[Span<ModeRates<'a>>] {
        &self.height_tiers
    }

    /// Return the override registered for a heading key, if any.
    pub fn heading_override(&self, key: HeadingKey) -> Option<&ModeRates<'a>> {
        self.heading_overrides.get(key)
    }

    /// Return the assumed fabric roll width.
    pub const fn fabric_width(&self) -> FabricWidthType {
        self.fabric_width
    }

    /// Return the attached grid, if any.
    pub const fn grid(&self) -> Option<&PricingGrid<'a>> {
        self.grid.as_ref()
    }

    /// Return the lining charges, if any.
    pub const fn lining(&self) -> Option<&LiningCharges<'a>> {
        self.lining.as_ref()
    }

    /// Return the waste uplift.
    pub const fn waste(&self) -> Percentage {
        self.waste
    }

    /// Whether this template prices hand-finished construction at all.
    pub const fn offers_hand_finishing(&self) -> bool {
        self.base_rates.hand().is_some()
    }

    /// The currency every rate in this template is denominated in.
    pub fn currency(&self) -> &'a Currency {
        self.base_rates.machine().currency()
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::GBP;

    use super::*;

    fn base() -> BaseRates<'static> {
        BaseRates::new(Money::from_minor(20_00, GBP))
    }

    #[test]
    fn new_template_has_empty_configuration() {
        let template = PricingTemplate::new(PricingMethod::PerUnit, base());

        assert_eq!(template.method(), PricingMethod::PerUnit);
        assert!(template.height_tiers().is_empty());
        assert_eq!(template.fabric_width(), FabricWidthType::Wide);
        assert!(template.grid().is_none());
        assert!(template.lining().is_none());
        assert_eq!(template.waste(), Percentage::from(0.0));
        assert!(!template.offers_hand_finishing());
    }

    #[test]
    fn builders_set_configuration() {
        let template = PricingTemplate::new(PricingMethod::PerDrop, base())
            .with_fabric_width(FabricWidthType::Narrow)
            .with_lining(LiningCharges::new(
                Money::from_minor(4_50, GBP),
                Money::from_minor(6_00, GBP),
            ))
            .with_waste(Percentage::from(0.05))
            .with_height_tiers([Span::closed(
                Decimal::ONE,
                Decimal::from(200),
                ModeRates::machine_only(Money::from_minor(24_00, GBP)),
            )]);

        assert_eq!(template.fabric_width(), FabricWidthType::Narrow);
        assert_eq!(template.waste(), Percentage::from(0.05));
        assert_eq!(template.height_tiers().len(), 1);
        assert_eq!(
            template.lining().map(LiningCharges::price_per_metre),
            Some(Money::from_minor(4_50, GBP))
        );
    }

    #[test]
    fn heading_overrides_are_keyed_per_template() {
        let mut template = PricingTemplate::new(PricingMethod::PerMetre, base());
        let key = template.add_heading_override(ModeRates::machine_only(Money::from_minor(
            28_00, GBP,
        )));

        assert!(template.heading_override(key).is_some());
        assert!(template.heading_override(HeadingKey::default()).is_none());
    }

    #[test]
    fn offers_hand_finishing_tracks_base_hand_rate() {
        let offered = PricingTemplate::new(
            PricingMethod::PerMetre,
            BaseRates::with_hand(Money::from_minor(20_00, GBP), Money::from_minor(35_00, GBP)),
        );

        assert!(offered.offers_hand_finishing());
    }

    #[test]
    fn currency_comes_from_the_base_rate() {
        let template = PricingTemplate::new(PricingMethod::PerMetre, base());

        assert_eq!(template.currency(), GBP);
    }
}
