//! Clamp helpers shared by the caret and scroll-offset arithmetic.
//!
//! Everything here works on `usize` and never underflows: a subtraction
//! that would go below zero saturates, and an upper bound that is smaller
//! than the lower bound collapses to the lower bound.

/// Clamp `value` into `low..=high`.
///
/// Unlike [`Ord::clamp`] this does not panic when `high < low`; the lower
/// bound wins.
#[inline]
pub fn clamp(value: usize, low: usize, high: usize) -> usize {
    value.min(high).max(low)
}

/// Largest valid scroll offset for `len` lines shown `height` at a time.
#[inline]
pub const fn max_offset(len: usize, height: usize) -> usize {
    len.saturating_sub(height)
}

/// Move `offset` forward by `amount`, stopping at `max`.
#[inline]
pub fn step_down(offset: usize, amount: usize, max: usize) -> usize {
    offset.saturating_add(amount).min(max)
}

/// Move `offset` back by `amount`, stopping at zero.
#[inline]
pub const fn step_up(offset: usize, amount: usize) -> usize {
    offset.saturating_sub(amount)
}
