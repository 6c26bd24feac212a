//! Bundle promotion evaluator.
//!
//! The shop's standing offer: one 1 kg bag plus one 425 g bag sells for a
//! fixed pair price instead of the two list prices. The evaluator looks at
//! a cart, counts how many such pairs it contains, and returns the discount
//! that brings each pair down to the pair price.
//!
//! ```text
//!   cart lines
//!       │  size label contains "1 kg"?  ──────►  large bucket
//!       │  else contains "425 g"?       ──────►  small bucket
//!       ▼
//!   pairs = min(large qty, small qty)
//!   per-pair = max(0, avg(large) + avg(small) - pair price)
//!   discount = round(per-pair × pairs)
//! ```
//!
//! Buckets use the quantity-weighted average price, so mixed-price carts
//! (e.g. an older batch still at last season's price) discount fairly.
//! Rounding happens exactly once, on the final amount.

use serde::{Deserialize, Serialize};

use crate::money;
use crate::types::SaleLine;

/// Default pair price for the 1 kg + 425 g bundle.
pub const DEFAULT_PAIR_PRICE: i64 = 12_500;

/// Canonical size tokens the evaluator matches on.
pub const SIZE_LARGE: &str = "1 kg";
pub const SIZE_SMALL: &str = "425 g";

// ============================================================================
// Configuration
// ============================================================================

/// Bundle parameters. The defaults describe the current standing offer;
/// keeping them in one struct means a price change next season is a single
/// edit, not a hunt through the calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleConfig {
    /// Substring that puts a line in the large bucket.
    pub size_large: String,
    /// Substring that puts a line in the small bucket.
    pub size_small: String,
    /// Combined price one pair sells for.
    pub pair_price: i64,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            size_large: SIZE_LARGE.to_string(),
            size_small: SIZE_SMALL.to_string(),
            pair_price: DEFAULT_PAIR_PRICE,
        }
    }
}

/// What the evaluator found in a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleOutcome {
    /// Number of matched 1 kg + 425 g pairs.
    pub pairs: i64,
    /// Total bundle discount in whole units. Zero when the pair price is
    /// not below the buckets' combined average price.
    pub discount: i64,
}

// ============================================================================
// Evaluation
// ============================================================================

/// Evaluate the bundle promotion over a cart.
///
/// Returns a zero outcome when `apply` is false or the cart contains no
/// complete pair. Size matching is a case-sensitive substring test against
/// each line's size label; a line matching the large token is never also
/// counted as small.
pub fn evaluate(lines: &[SaleLine], apply: bool, config: &BundleConfig) -> BundleOutcome {
    if !apply {
        return BundleOutcome::default();
    }

    let mut large_qty = 0i64;
    let mut large_amount = 0i64;
    let mut small_qty = 0i64;
    let mut small_amount = 0i64;

    for line in lines {
        if line.size.contains(config.size_large.as_str()) {
            large_qty += line.quantity;
            large_amount += line.line_total();
        } else if line.size.contains(config.size_small.as_str()) {
            small_qty += line.quantity;
            small_amount += line.line_total();
        }
    }

    let pairs = large_qty.min(small_qty);
    if pairs == 0 {
        return BundleOutcome::default();
    }

    let avg_large = money::weighted_avg_price(large_amount, large_qty);
    let avg_small = money::weighted_avg_price(small_amount, small_qty);
    let per_pair = (avg_large + avg_small - config.pair_price as f64).max(0.0);

    BundleOutcome {
        pairs,
        discount: money::round_units(per_pair * pairs as f64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(size: &str, quantity: i64, unit_price: i64) -> SaleLine {
        SaleLine {
            product_id: format!("p-{size}"),
            product_name: "Café Honduras".into(),
            size: size.into(),
            quantity,
            unit_price,
            unit_cost: 0,
        }
    }

    #[test]
    fn one_pair_at_list_prices() {
        // 9_800 + 5_200 = 15_000 list; pair price 12_500 -> 2_500 off.
        let lines = vec![line("1 kg", 2, 9_800), line("425 g", 1, 5_200)];
        let outcome = evaluate(&lines, true, &BundleConfig::default());
        assert_eq!(outcome, BundleOutcome { pairs: 1, discount: 2_500 });
    }

    #[test]
    fn pairs_limited_by_smaller_bucket() {
        let lines = vec![line("1 kg", 5, 9_800), line("425 g", 3, 5_200)];
        let outcome = evaluate(&lines, true, &BundleConfig::default());
        assert_eq!(outcome.pairs, 3);
        assert_eq!(outcome.discount, 3 * 2_500);
    }

    #[test]
    fn disabled_flag_short_circuits() {
        let lines = vec![line("1 kg", 1, 9_800), line("425 g", 1, 5_200)];
        let outcome = evaluate(&lines, false, &BundleConfig::default());
        assert_eq!(outcome, BundleOutcome::default());
    }

    #[test]
    fn no_pair_without_both_sizes() {
        let only_large = vec![line("1 kg", 4, 9_800)];
        assert_eq!(evaluate(&only_large, true, &BundleConfig::default()), BundleOutcome::default());

        let only_small = vec![line("425 g", 2, 5_200)];
        assert_eq!(evaluate(&only_small, true, &BundleConfig::default()), BundleOutcome::default());
    }

    #[test]
    fn unrelated_sizes_stay_out_of_buckets() {
        let lines = vec![
            line("1 kg", 1, 9_800),
            line("425 g", 1, 5_200),
            line("250 g drip", 3, 3_900),
        ];
        let outcome = evaluate(&lines, true, &BundleConfig::default());
        assert_eq!(outcome.pairs, 1);
        assert_eq!(outcome.discount, 2_500);
    }

    #[test]
    fn substring_match_catches_decorated_labels() {
        // "1 kg gift box" still counts as a large bag.
        let lines = vec![line("1 kg gift box", 1, 10_500), line("425 g", 1, 5_200)];
        let outcome = evaluate(&lines, true, &BundleConfig::default());
        assert_eq!(outcome.pairs, 1);
        assert_eq!(outcome.discount, 10_500 + 5_200 - 12_500);
    }

    #[test]
    fn discount_floors_at_zero_when_pair_price_not_cheaper() {
        // Promo-priced cart already below the pair price: no negative
        // discount, but the pair is still reported.
        let lines = vec![line("1 kg", 1, 8_000), line("425 g", 1, 4_000)];
        let outcome = evaluate(&lines, true, &BundleConfig::default());
        assert_eq!(outcome, BundleOutcome { pairs: 1, discount: 0 });
    }

    #[test]
    fn weighted_average_blends_mixed_prices() {
        // Large bucket: 2 @ 9_800 + 1 @ 9_500 -> avg 9_700.
        let lines = vec![
            line("1 kg", 2, 9_800),
            line("1 kg", 1, 9_500),
            line("425 g", 3, 5_200),
        ];
        let outcome = evaluate(&lines, true, &BundleConfig::default());
        assert_eq!(outcome.pairs, 3);
        // per pair: 9_700 + 5_200 - 12_500 = 2_400
        assert_eq!(outcome.discount, 7_200);
    }

    #[test]
    fn rounds_once_on_the_total() {
        // avg large = (9_800 + 9_501) / 2 = 9_650.5
        // per pair  = 9_650.5 + 5_200 - 12_500 = 2_350.5
        // total     = round(2_350.5 * 2) = 4_701, not round(2_350.5) * 2.
        let lines = vec![
            line("1 kg", 1, 9_800),
            line("1 kg", 1, 9_501),
            line("425 g", 2, 5_200),
        ];
        let outcome = evaluate(&lines, true, &BundleConfig::default());
        assert_eq!(outcome.discount, 4_701);
    }

    #[test]
    fn custom_config_changes_tokens_and_price() {
        let config = BundleConfig {
            size_large: "500 g".into(),
            size_small: "200 g".into(),
            pair_price: 7_000,
        };
        let lines = vec![line("500 g", 1, 5_500), line("200 g", 1, 2_500)];
        let outcome = evaluate(&lines, true, &config);
        assert_eq!(outcome, BundleOutcome { pairs: 1, discount: 1_000 });
    }
}
