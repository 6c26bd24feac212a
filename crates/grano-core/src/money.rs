//! Money math helpers.
//!
//! All monetary amounts in Grano POS are **whole currency units** stored as
//! `i64` (the shop prices everything in whole pesos; there are no cents).
//! Percentage and averaging steps produce fractional intermediates, so every
//! derived amount passes through [`round_units`] before it is stored or
//! compared. Re-running a calculation over the same inputs therefore always
//! reproduces the persisted figures.
//!
//! ## Rounding policy
//!
//! [`round_units`] rounds halves away from zero (`12.5 -> 13`), matching how
//! the shop has always quoted discounts on paper. Each calculation step
//! rounds exactly once, at the point the intermediate becomes a money amount.

// ============================================================================
// Rounding
// ============================================================================

/// Round a fractional amount to whole currency units.
///
/// Halves round away from zero.
///
/// ## Example
/// ```
/// use grano_core::money::round_units;
///
/// assert_eq!(round_units(12.4), 12);
/// assert_eq!(round_units(12.5), 13);
/// assert_eq!(round_units(1249.9999), 1250);
/// ```
pub fn round_units(value: f64) -> i64 {
    value.round() as i64
}

/// Compute `pct` percent of `amount`, rounded to whole units.
///
/// ## Example
/// ```
/// use grano_core::money::percent_of;
///
/// assert_eq!(percent_of(9_800, 10.0), 980);
/// assert_eq!(percent_of(125, 10.0), 13); // 12.5 rounds up
/// assert_eq!(percent_of(9_800, 0.0), 0);
/// ```
pub fn percent_of(amount: i64, pct: f64) -> i64 {
    round_units(amount as f64 * pct / 100.0)
}

// ============================================================================
// Averages and Ratios
// ============================================================================

/// Quantity-weighted average unit price of a bucket of items.
///
/// Returns the exact (unrounded) average; callers round once at the end of
/// their own calculation. A zero or negative quantity yields `0.0`.
pub fn weighted_avg_price(total_amount: i64, total_qty: i64) -> f64 {
    if total_qty <= 0 {
        return 0.0;
    }
    total_amount as f64 / total_qty as f64
}

/// Margin as a percentage of net revenue, rounded to one decimal place.
///
/// Returns `0.0` when `net` is zero or negative so a fully discounted sale
/// never divides by zero.
///
/// ## Example
/// ```
/// use grano_core::money::margin_pct;
///
/// assert_eq!(margin_pct(3_675, 9_800), 37.5);
/// assert_eq!(margin_pct(1, 3), 33.3);
/// assert_eq!(margin_pct(500, 0), 0.0);
/// ```
pub fn margin_pct(margin: i64, net: i64) -> f64 {
    if net <= 0 {
        return 0.0;
    }
    (margin as f64 / net as f64 * 1000.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_units_rounds_halves_away_from_zero() {
        assert_eq!(round_units(0.0), 0);
        assert_eq!(round_units(0.49), 0);
        assert_eq!(round_units(0.5), 1);
        assert_eq!(round_units(2.5), 3);
        assert_eq!(round_units(-2.5), -3);
    }

    #[test]
    fn percent_of_whole_amounts() {
        assert_eq!(percent_of(10_000, 10.0), 1_000);
        assert_eq!(percent_of(10_000, 100.0), 10_000);
        assert_eq!(percent_of(0, 50.0), 0);
    }

    #[test]
    fn percent_of_rounds_fractional_results() {
        // 9_999 * 10% = 999.9 -> 1_000
        assert_eq!(percent_of(9_999, 10.0), 1_000);
        // 333 * 1.5% = 4.995 -> 5
        assert_eq!(percent_of(333, 1.5), 5);
    }

    #[test]
    fn weighted_avg_is_exact_until_rounded() {
        // Three units at mixed prices: (2*9_800 + 1*9_500) / 3
        let avg = weighted_avg_price(2 * 9_800 + 9_500, 3);
        assert!((avg - 9_700.0).abs() < f64::EPSILON);
    }

    #[test]
    fn weighted_avg_of_empty_bucket_is_zero() {
        assert_eq!(weighted_avg_price(0, 0), 0.0);
        assert_eq!(weighted_avg_price(5_000, 0), 0.0);
    }

    #[test]
    fn margin_pct_has_one_decimal() {
        // 1/3 = 33.333...% -> 33.3
        assert_eq!(margin_pct(1, 3), 33.3);
        // 2/3 = 66.666...% -> 66.7
        assert_eq!(margin_pct(2, 3), 66.7);
        assert_eq!(margin_pct(0, 100), 0.0);
    }

    #[test]
    fn margin_pct_guards_zero_net() {
        assert_eq!(margin_pct(100, 0), 0.0);
        assert_eq!(margin_pct(100, -5), 0.0);
    }
}
