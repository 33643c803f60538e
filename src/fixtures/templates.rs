//! Template Fixtures
//!
//! Serde shapes for template YAML and their conversion into engine types.
//! Money values are strings like `"24.00 GBP"`; percentages accept `"5%"`
//! or `"0.05"`. Every money value in one template must share a currency.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use serde::Deserialize;

use crate::{
    fabric::FabricWidthType,
    fixtures::{FixtureError, LoadedTemplate},
    grid::PricingGrid,
    money::minor_from_major,
    rates::{BaseRates, ModeRates},
    spans::Span,
    template::{LiningCharges, PricingMethod, PricingTemplate},
};

/// Wrapper for a template fixture file.
#[derive(Debug, Deserialize)]
pub struct TemplateFixture {
    /// The template configuration.
    pub template: TemplateConfig,
}

/// Pricing method names as persisted by the settings UI.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodConfig {
    /// Rate per billed metre of drop.
    PerMetre,

    /// Rate per fabric drop.
    PerDrop,

    /// Rate per panel.
    PerPanel,

    /// Rate per square metre.
    PerSqm,

    /// Rate per unit.
    PerUnit,

    /// Grid lookup.
    PricingGrid,
}

impl From<MethodConfig> for PricingMethod {
    fn from(config: MethodConfig) -> Self {
        match config {
            MethodConfig::PerMetre => Self::PerMetre,
            MethodConfig::PerDrop => Self::PerDrop,
            MethodConfig::PerPanel => Self::PerPanel,
            MethodConfig::PerSqm => Self::PerSquareMetre,
            MethodConfig::PerUnit => Self::PerUnit,
            MethodConfig::PricingGrid => Self::Grid,
        }
    }
}

/// Fabric roll width names.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FabricWidthConfig {
    /// 140cm roll.
    Narrow,

    /// 280cm roll.
    Wide,
}

impl From<FabricWidthConfig> for FabricWidthType {
    fn from(config: FabricWidthConfig) -> Self {
        match config {
            FabricWidthConfig::Narrow => Self::Narrow,
            FabricWidthConfig::Wide => Self::Wide,
        }
    }
}

/// Base rate configuration.
#[derive(Debug, Deserialize)]
pub struct BaseRateConfig {
    /// Machine rate (e.g. "20.00 GBP").
    pub machine: String,

    /// Hand rate; present only when the merchant offers hand finishing.
    pub hand: Option<String>,
}

/// One height tier.
#[derive(Debug, Deserialize)]
pub struct TierConfig {
    /// Lower bound of the tier in centimetres, inclusive.
    pub min: Decimal,

    /// Upper bound of the tier in centimetres, inclusive.
    pub max: Decimal,

    /// Machine rate override for the tier.
    pub machine: Option<String>,

    /// Hand rate override for the tier.
    pub hand: Option<String>,
}

/// Rates for one heading style.
#[derive(Debug, Deserialize)]
pub struct OverrideConfig {
    /// Machine rate override.
    pub machine: Option<String>,

    /// Hand rate override.
    pub hand: Option<String>,
}

/// Lining charges.
#[derive(Debug, Deserialize)]
pub struct LiningConfig {
    /// Lining fabric price per metre of drop.
    pub price_per_metre: String,

    /// Labour charge per lined item.
    pub labour_per_item: String,
}

/// Template fixture configuration.
#[derive(Debug, Deserialize)]
pub struct TemplateConfig {
    /// Pricing method.
    pub method: MethodConfig,

    /// Base rates.
    pub base_rate: BaseRateConfig,

    /// Height tiers in merchant order.
    #[serde(default)]
    pub height_tiers: Vec<TierConfig>,

    /// Heading-style overrides keyed by heading name.
    #[serde(default)]
    pub heading_overrides: FxHashMap<String, OverrideConfig>,

    /// Assumed fabric roll width; defaults to wide.
    pub fabric_width: Option<FabricWidthConfig>,

    /// Name of a grid CSV under `grids/`.
    pub grid: Option<String>,

    /// Lining charges.
    pub lining: Option<LiningConfig>,

    /// Waste uplift (e.g. "5%" or "0.05").
    pub waste: Option<String>,
}

/// Money parser that pins the first currency it sees and rejects mixtures.
#[derive(Debug, Default)]
struct MoneyParser {
    currency: Option<&'static Currency>,
}

impl MoneyParser {
    fn parse(&mut self, text: &str) -> Result<Money<'static, Currency>, FixtureError> {
        let (minor, currency) = parse_price(text)?;

        if let Some(existing) = self.currency
            && existing != currency
        {
            return Err(FixtureError::CurrencyMismatch(
                existing.iso_alpha_code.to_string(),
                currency.iso_alpha_code.to_string(),
            ));
        }

        self.currency = Some(currency);

        Ok(Money::from_minor(minor, currency))
    }

    fn parse_optional(
        &mut self,
        text: Option<&str>,
    ) -> Result<Option<Money<'static, Currency>>, FixtureError> {
        text.map(|value| self.parse(value)).transpose()
    }
}

/// Build a [`LoadedTemplate`] from parsed configuration and an optional
/// grid CSV already read from disk.
pub(crate) fn build_template(
    config: TemplateConfig,
    grid_csv: Option<&str>,
) -> Result<LoadedTemplate, FixtureError> {
    let mut parser = MoneyParser::default();

    let machine = parser.parse(&config.base_rate.machine)?;
    let base = match &config.base_rate.hand {
        Some(hand) => BaseRates::with_hand(machine, parser.parse(hand)?),
        None => BaseRates::new(machine),
    };

    let tiers = config
        .height_tiers
        .iter()
        .map(|tier| {
            Ok(Span::closed(
                tier.min,
                tier.max,
                ModeRates::new(
                    parser.parse_optional(tier.machine.as_deref())?,
                    parser.parse_optional(tier.hand.as_deref())?,
                ),
            ))
        })
        .collect::<Result<Vec<_>, FixtureError>>()?;

    let mut template =
        PricingTemplate::new(config.method.into(), base).with_height_tiers(tiers);

    if let Some(fabric_width) = config.fabric_width {
        template = template.with_fabric_width(fabric_width.into());
    }

    if let Some(lining) = &config.lining {
        template = template.with_lining(LiningCharges::new(
            parser.parse(&lining.price_per_metre)?,
            parser.parse(&lining.labour_per_item)?,
        ));
    }

    if let Some(waste) = &config.waste {
        template = template.with_waste(parse_percentage(waste)?);
    }

    if let Some(csv) = grid_csv {
        let currency = parser.currency.ok_or(FixtureError::NoCurrency)?;

        template = template.with_grid(PricingGrid::parse(csv, currency)?);
    }

    let mut heading_keys = FxHashMap::default();

    for (name, rates) in config.heading_overrides {
        let key = template.add_heading_override(ModeRates::new(
            parser.parse_optional(rates.machine.as_deref())?,
            parser.parse_optional(rates.hand.as_deref())?,
        ));

        heading_keys.insert(name, key);
    }

    Ok(LoadedTemplate::new(template, heading_keys))
}

/// Parse a price string (e.g. "24.00 GBP") into minor units and currency.
///
/// # Errors
///
/// Returns an error if the string is not "AMOUNT CODE", the amount does not
/// parse as a decimal, or the currency code is not an ISO currency.
pub fn parse_price(text: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let (amount_text, code) = text
        .trim()
        .rsplit_once(' ')
        .ok_or_else(|| FixtureError::InvalidPrice(text.to_string()))?;

    let amount = amount_text
        .trim()
        .parse::<Decimal>()
        .map_err(|_err| FixtureError::InvalidPrice(text.to_string()))?;

    let minor =
        minor_from_major(amount).ok_or_else(|| FixtureError::InvalidPrice(text.to_string()))?;

    let currency =
        iso::find(code.trim()).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;

    Ok((minor, currency))
}

/// Parse a percentage string: "5%" for five percent, or "0.05" as a ratio.
///
/// # Errors
///
/// Returns an error if the value cannot be parsed.
pub fn parse_percentage(text: &str) -> Result<Percentage, FixtureError> {
    let trimmed = text.trim();

    if let Some(percent_text) = trimmed.strip_suffix('%') {
        let value = percent_text
            .trim()
            .parse::<f64>()
            .map_err(|_err| FixtureError::InvalidPercentage(text.to_string()))?;

        return Ok(Percentage::from(value / 100.0));
    }

    let value = trimmed
        .parse::<f64>()
        .map_err(|_err| FixtureError::InvalidPercentage(text.to_string()))?;

    Ok(Percentage::from(value))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_reads_amount_and_currency() -> TestResult {
        let (minor, currency) = parse_price("24.00 GBP")?;

        assert_eq!(minor, 24_00);
        assert_eq!(currency, GBP);

        Ok(())
    }

    #[test]
    fn parse_price_rejects_missing_currency() {
        assert!(matches!(
            parse_price("24.00"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        assert!(matches!(
            parse_price("24.00 ZZZ"),
            Err(FixtureError::UnknownCurrency(code)) if code == "ZZZ"
        ));
    }

    #[test]
    fn parse_price_rejects_non_numeric_amount() {
        assert!(matches!(
            parse_price("lots GBP"),
            Err(FixtureError::InvalidPrice(_))
        ));
    }

    #[test]
    fn parse_percentage_accepts_both_forms() -> TestResult {
        assert_eq!(parse_percentage("5%")?, Percentage::from(0.05));
        assert_eq!(parse_percentage("0.05")?, Percentage::from(0.05));

        Ok(())
    }

    #[test]
    fn parse_percentage_rejects_text() {
        assert!(matches!(
            parse_percentage("some"),
            Err(FixtureError::InvalidPercentage(_))
        ));
    }

    #[test]
    fn money_parser_pins_the_first_currency() -> TestResult {
        let mut parser = MoneyParser::default();

        parser.parse("10.00 GBP")?;

        let result = parser.parse("10.00 EUR");

        assert!(matches!(result, Err(FixtureError::CurrencyMismatch(_, _))));

        Ok(())
    }

    #[test]
    fn method_names_map_onto_engine_methods() {
        assert_eq!(
            PricingMethod::from(MethodConfig::PerSqm),
            PricingMethod::PerSquareMetre
        );
        assert_eq!(
            PricingMethod::from(MethodConfig::PricingGrid),
            PricingMethod::Grid
        );
    }

    #[test]
    fn build_template_defaults_fabric_width_to_wide() -> TestResult {
        let config: TemplateFixture = serde_norway::from_str(
            "template:\n  method: per_drop\n  base_rate:\n    machine: 45.00 GBP\n",
        )?;

        let loaded = build_template(config.template, None)?;

        assert_eq!(
            loaded.template().fabric_width(),
            FabricWidthType::Wide
        );

        Ok(())
    }

    #[test]
    fn build_template_wires_tiers_in_file_order() -> TestResult {
        let config: TemplateFixture = serde_norway::from_str(
            "template:\n  method: per_metre\n  base_rate:\n    machine: 20.00 GBP\n  height_tiers:\n    - min: 1\n      max: 200\n      machine: 24.00 GBP\n    - min: 201\n      max: 250\n      machine: 30.00 GBP\n",
        )?;

        let loaded = build_template(config.template, None)?;
        let tiers = loaded.template().height_tiers();

        assert_eq!(tiers.len(), 2);
        assert_eq!(tiers.first().map(Span::min), Some(Decimal::ONE));

        Ok(())
    }
}
