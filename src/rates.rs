//! Rate Resolution
//!
//! Effective per-unit rates are resolved through a fixed precedence chain:
//! heading-style override, then the first matching height tier, then the
//! template's base rate. Each level may define machine and hand rates
//! independently; resolution walks the chain until it finds a rate for the
//! requested construction mode.

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use thiserror::Error;

use crate::{spans, template::PricingTemplate};

new_key_type! {
    /// Heading Style Key
    pub struct HeadingKey;
}

/// Errors raised during rate resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RateError {
    /// Hand finishing was requested but the template's base rate defines no
    /// hand rate, so no hand price is resolvable anywhere in the chain.
    #[error("hand finishing requested but the template defines no hand rate")]
    HandFinishNotOffered,
}

/// Construction mode being priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishMode {
    /// Standard machine construction.
    Machine,

    /// Hand-finished construction, priced separately.
    Hand,
}

/// Optional machine and hand rates for one level of the precedence chain.
///
/// Height tiers and heading overrides may define either mode, both, or
/// neither; a missing mode falls through to the next level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeRates<'a> {
    machine: Option<Money<'a, Currency>>,
    hand: Option<Money<'a, Currency>>,
}

impl<'a> ModeRates<'a> {
    /// Create rates from optional machine and hand values.
    pub const fn new(
        machine: Option<Money<'a, Currency>>,
        hand: Option<Money<'a, Currency>>,
    ) -> Self {
        Self { machine, hand }
    }

    /// Create rates with a machine rate only.
    pub const fn machine_only(machine: Money<'a, Currency>) -> Self {
        Self::new(Some(machine), None)
    }

    /// Create rates with both machine and hand values.
    pub const fn with_hand(machine: Money<'a, Currency>, hand: Money<'a, Currency>) -> Self {
        Self::new(Some(machine), Some(hand))
    }

    /// Return the rate for the requested mode, if this level defines one.
    pub const fn rate(&self, mode: FinishMode) -> Option<Money<'a, Currency>> {
        match mode {
            FinishMode::Machine => self.machine,
            FinishMode::Hand => self.hand,
        }
    }
}

/// A template's base rates: machine always present, hand optional.
///
/// A present hand rate is what "offers hand finishing" means; there is no
/// separate flag to drift out of sync.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaseRates<'a> {
    machine: Money<'a, Currency>,
    hand: Option<Money<'a, Currency>>,
}

impl<'a> BaseRates<'a> {
    /// Create base rates for machine-only construction.
    pub const fn new(machine: Money<'a, Currency>) -> Self {
        Self {
            machine,
            hand: None,
        }
    }

    /// Create base rates offering hand finishing.
    pub const fn with_hand(machine: Money<'a, Currency>, hand: Money<'a, Currency>) -> Self {
        Self {
            machine,
            hand: Some(hand),
        }
    }

    /// Return the machine rate.
    pub const fn machine(&self) -> Money<'a, Currency> {
        self.machine
    }

    /// Return the optional hand rate.
    pub const fn hand(&self) -> Option<Money<'a, Currency>> {
        self.hand
    }

    /// Return the rate for the requested mode, if defined.
    pub const fn rate(&self, mode: FinishMode) -> Option<Money<'a, Currency>> {
        match mode {
            FinishMode::Machine => Some(self.machine),
            FinishMode::Hand => self.hand,
        }
    }
}

/// Resolve the effective rate for one pricing query.
///
/// Precedence, highest first:
///
/// 1. the heading override, when the order references a heading and the
///    override defines the requested mode;
/// 2. the first height tier containing the finished height that defines the
///    requested mode (tier order is the merchant's, never re-sorted);
/// 3. the base rate.
///
/// A tier gap is not an error; the query falls through to the base rate.
///
/// # Errors
///
/// Returns [`RateError::HandFinishNotOffered`] when hand finishing is
/// requested on a template with no base hand rate. Falling back to the
/// machine rate would silently corrupt the quote, so this is terminal.
pub fn resolve_rate<'a>(
    template: &PricingTemplate<'a>,
    heading: Option<HeadingKey>,
    height: Decimal,
    mode: FinishMode,
) -> Result<Money<'a, Currency>, RateError> {
    if mode == FinishMode::Hand && !template.offers_hand_finishing() {
        return Err(RateError::HandFinishNotOffered);
    }

    let heading_rate = heading
        .and_then(|key| template.heading_override(key))
        .and_then(|rates| rates.rate(mode));

    heading_rate
        .or_else(|| {
            spans::resolve(template.height_tiers(), height).and_then(|rates| rates.rate(mode))
        })
        .or_else(|| template.base_rates().rate(mode))
        .ok_or(RateError::HandFinishNotOffered)
}
