//! Largest-remainder rounding
//!
//! Whole units lost to flooring are handed back to the entries with the
//! largest fractional parts. Ties keep their input order.

use std::cmp::Ordering;

/// Fractional part of a non-negative amount
fn fraction(value: f64) -> f64 {
    value - value.floor()
}

/// Sum of the floored values
pub fn floored_sum(values: &[f64]) -> f64 {
    values.iter().map(|v| v.floor()).sum()
}

/// Order `eligible` indices by descending fractional part (stable)
pub fn remainder_order(values: &[f64], eligible: &[usize]) -> Vec<usize> {
    let mut order = eligible.to_vec();
    order.sort_by(|&a, &b| {
        fraction(values[b])
            .partial_cmp(&fraction(values[a]))
            .unwrap_or(Ordering::Equal)
    });
    order
}

/// Top up `values` so their floored sum reaches `target`.
///
/// Only whole missing units are distributed, and only to `eligible` entries.
/// When more units are missing than there are eligible entries, every
/// eligible entry gets the same base amount and the largest remainders get
/// one extra unit each. Values already at or above `target` come back
/// unchanged.
pub fn top_up(values: &[f64], eligible: &[usize], target: f64) -> Vec<f64> {
    let mut out = values.to_vec();

    let deficit = (target - floored_sum(values)).floor();
    if deficit < 1.0 || eligible.is_empty() {
        return out;
    }

    let units = deficit as u64;
    let slots = eligible.len() as u64;
    let base = units / slots;
    let extra = (units % slots) as usize;

    for (rank, idx) in remainder_order(values, eligible).into_iter().enumerate() {
        let bonus = base + u64::from(rank < extra);
        out[idx] += bonus as f64;
    }

    out
}
