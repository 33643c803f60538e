//! Inclusive Range Resolution
//!
//! Ordered `[min, max] -> value` span lists used by height-based rate tiers
//! and by both pricing grid axes. Spans are matched in list order and both
//! endpoints are inclusive; a query that no span contains is a valid
//! not-found outcome, not an error.

use rust_decimal::Decimal;

/// An inclusive numeric interval carrying an arbitrary value.
///
/// `max` of `None` means the span is open-ended above, as in a final
/// "200cm+" grid bucket.
#[derive(Debug, Clone, PartialEq)]
pub struct Span<T> {
    min: Decimal,
    max: Option<Decimal>,
    value: T,
}

impl<T> Span<T> {
    /// Create a span with an explicit optional upper bound.
    pub const fn new(min: Decimal, max: Option<Decimal>, value: T) -> Self {
        Self { min, max, value }
    }

    /// Create a span bounded at both ends.
    pub const fn closed(min: Decimal, max: Decimal, value: T) -> Self {
        Self::new(min, Some(max), value)
    }

    /// Create a span with no upper bound.
    pub const fn open_ended(min: Decimal, value: T) -> Self {
        Self::new(min, None, value)
    }

    /// Return the lower bound.
    pub const fn min(&self) -> Decimal {
        self.min
    }

    /// Return the optional upper bound.
    pub const fn max(&self) -> Option<Decimal> {
        self.max
    }

    /// Return the carried value.
    pub const fn value(&self) -> &T {
        &self.value
    }

    /// Whether the span contains the point, inclusive at both ends.
    pub fn contains(&self, point: Decimal) -> bool {
        self.min <= point && self.max.is_none_or(|max| point <= max)
    }
}

/// Resolve a point against an ordered span list.
///
/// The first span in list order that contains the point wins. Configured
/// order is semantic and never re-sorted: merchants may deliberately place a
/// narrow span before a broader one to override it.
pub fn resolve<T>(spans: &[Span<T>], point: Decimal) -> Option<&T> {
    spans.iter().find(|span| span.contains(point)).map(Span::value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn first_matching_span_wins() {
        let spans = [
            Span::closed(dec(100), dec(150), "narrow"),
            Span::closed(dec(0), dec(300), "broad"),
        ];

        assert_eq!(resolve(&spans, dec(120)), Some(&"narrow"));
        assert_eq!(resolve(&spans, dec(50)), Some(&"broad"));
    }

    #[test]
    fn overlapping_spans_resolve_by_list_order_not_bounds() {
        // Both spans contain 120; the earlier one must win even though the
        // later one starts lower.
        let spans = [
            Span::closed(dec(100), dec(200), "first"),
            Span::closed(dec(0), dec(400), "second"),
        ];

        assert_eq!(resolve(&spans, dec(120)), Some(&"first"));
    }

    #[test]
    fn both_endpoints_are_inclusive() {
        let spans = [
            Span::closed(dec(1), dec(200), "low"),
            Span::closed(dec(201), dec(250), "high"),
        ];

        assert_eq!(resolve(&spans, dec(200)), Some(&"low"));
        assert_eq!(resolve(&spans, dec(201)), Some(&"high"));
        assert_eq!(resolve(&spans, dec(250)), Some(&"high"));
    }

    #[test]
    fn unmatched_point_returns_none() {
        let spans = [Span::closed(dec(1), dec(200), "only")];

        assert_eq!(resolve(&spans, dec(201)), None);
        assert_eq!(resolve(&spans, dec(0)), None);
    }

    #[test]
    fn gap_between_spans_returns_none() {
        let spans = [
            Span::closed(dec(1), dec(100), "low"),
            Span::closed(dec(150), dec(200), "high"),
        ];

        assert_eq!(resolve(&spans, dec(125)), None);
    }

    #[test]
    fn open_ended_span_matches_everything_above_min() {
        let spans = [
            Span::closed(dec(0), dec(200), "bounded"),
            Span::open_ended(dec(201), "open"),
        ];

        assert_eq!(resolve(&spans, dec(201)), Some(&"open"));
        assert_eq!(resolve(&spans, dec(10_000)), Some(&"open"));
        assert_eq!(resolve(&spans, dec(200)), Some(&"bounded"));
    }

    #[test]
    fn empty_span_list_resolves_nothing() {
        let spans: [Span<&str>; 0] = [];

        assert_eq!(resolve(&spans, dec(10)), None);
    }

    #[test]
    fn accessors_return_constructor_values() {
        let span = Span::closed(dec(1), dec(200), 7_usize);

        assert_eq!(span.min(), dec(1));
        assert_eq!(span.max(), Some(dec(200)));
        assert_eq!(span.value(), &7);

        let open = Span::open_ended(dec(201), 8_usize);

        assert_eq!(open.max(), None);
    }
}
