//! Bucket label grammar
//!
//! Grid axis buckets are persisted as display labels: `"0-100cm"` (hyphen or
//! en dash) or `"200cm+"` for an open-ended final bucket. Numeric bounds are
//! derived from the label once, at parse time; lookups never re-read the
//! label text.

use rust_decimal::Decimal;

/// Derive `(min, max)` bounds from a bucket label. `None` max means the
/// bucket is open-ended above.
pub fn bounds(label: &str) -> Option<(Decimal, Option<Decimal>)> {
    let text = label.trim();

    if let Some(lower) = text.strip_suffix('+') {
        return Some((length(lower)?, None));
    }

    let (low, high) = text.split_once(['-', '\u{2013}'])?;

    Some((length(low)?, Some(length(high)?)))
}

fn length(text: &str) -> Option<Decimal> {
    text.trim().trim_end_matches("cm").trim().parse().ok()
}
