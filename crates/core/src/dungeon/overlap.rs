//! Placement of a corridor across the shared extent of two facing structures.

use crate::types::Span;

/// Offset along the perpendicular axis at which a corridor of
/// `corridor_width` can join `anchor` to `target`, or `None` when it cannot.
///
/// The corridor sits at the midpoint of the overlap of the two spans, after
/// pulling `clearance` in from both ends and another `corridor_width` in from
/// the high end so the far edge of the corridor keeps the same clearance.
/// That covers all four arrangements: target contains anchor, anchor contains
/// target, and either end of the anchor poking into the target.
///
/// Spans that do not overlap, or whose overlap is narrower than
/// `corridor_width + 2 * clearance`, have no valid offset.
pub fn corridor_offset(
    anchor: Span,
    target: Span,
    clearance: i32,
    corridor_width: i32,
) -> Option<i32> {
    let shared = anchor.intersection(target)?;
    let low = i64::from(shared.low) + i64::from(clearance);
    let high = i64::from(shared.high) - i64::from(clearance) - i64::from(corridor_width);
    if high < low {
        return None;
    }
    i32::try_from(midpoint(low, high)).ok()
}

/// Floor of the mean; lies within `[low, high]`, so it fits wherever they do.
fn midpoint(low: i64, high: i64) -> i64 {
    (low + high).div_euclid(2)
}
