//! Sale totals calculator.
//!
//! Pure function from a cart and its pricing flags to a [`Totals`] block.
//! Discounts stack **sequentially**, and the order is part of the contract:
//!
//! ```text
//!   gross ─ bundle ──► afterBundle
//!                        │ × 10%  (affiliate flag)
//!                        ▼
//!                      afterAffiliate
//!                        │ × manual% (clamped 0..=100)
//!                        ▼
//!                       net  (floored at 0)
//! ```
//!
//! The affiliate discount is taken on the bundle-reduced amount, and the
//! manual discount on the amount after both. Each step rounds to whole
//! units as it produces a money amount, so replaying a stored sale's cart
//! through this function reproduces its persisted totals exactly.

use crate::money;
use crate::promo::{self, BundleConfig};
use crate::types::{SaleDraft, SaleLine, Totals};

/// Flat percentage granted to affiliate partners (gyms, cafés).
pub const AFFILIATE_DISCOUNT_PCT: f64 = 10.0;

/// Compute the totals block for a cart.
///
/// `discount_pct` is the manual discount in percent; values outside
/// `0..=100` are clamped, never rejected. The bundle promotion is
/// re-evaluated here on every call rather than cached, so the result always
/// reflects the cart as given.
pub fn compute(
    lines: &[SaleLine],
    discount_pct: f64,
    apply_bundle: bool,
    is_affiliate: bool,
    bundle: &BundleConfig,
) -> Totals {
    let gross: i64 = lines.iter().map(SaleLine::line_total).sum();

    let bundle_discount = promo::evaluate(lines, apply_bundle, bundle).discount;
    let after_bundle = gross - bundle_discount;

    let affiliate_discount = if is_affiliate {
        money::percent_of(after_bundle, AFFILIATE_DISCOUNT_PCT)
    } else {
        0
    };

    let manual_pct = discount_pct.clamp(0.0, 100.0);
    let manual_discount = money::percent_of(after_bundle - affiliate_discount, manual_pct);

    let discount = bundle_discount + affiliate_discount + manual_discount;
    let net = (after_bundle - affiliate_discount - manual_discount).max(0);

    let cost: i64 = lines.iter().map(SaleLine::line_cost).sum();
    let margin = (net - cost).max(0);

    Totals {
        gross,
        discount,
        net,
        cost,
        margin,
        margin_pct: money::margin_pct(margin, net),
    }
}

/// Convenience wrapper: compute totals straight from a draft's own lines
/// and flags.
pub fn for_draft(draft: &SaleDraft, bundle: &BundleConfig) -> Totals {
    compute(
        &draft.lines,
        draft.discount_pct,
        draft.apply_bundle,
        draft.is_affiliate,
        bundle,
    )
}
