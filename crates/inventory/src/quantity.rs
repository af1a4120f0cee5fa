//! Quantity arithmetic shared by every collection.
//!
//! All counts are `i64`. Stored quantities are always positive; a count that
//! reaches zero means the record goes away.

/// Apply `delta` to a stored quantity, flooring at zero.
///
/// Returns `None` when the result is zero and the record must be removed.
pub fn settle(current: i64, delta: i64) -> Option<i64> {
    let next = current.saturating_add(delta).max(0);
    if next == 0 { None } else { Some(next) }
}

/// How much of `required` is still uncovered by stock on hand and queued purchases.
pub fn shortfall(required: i64, have: i64, queued: i64) -> i64 {
    required
        .saturating_sub(have)
        .saturating_sub(queued)
        .max(0)
}
