//! Input validation for catalog entries, customers and sale drafts.
//!
//! These checks run before anything touches storage. They cover shape only
//! (required fields, ranges); stock availability is checked by the ledger
//! at commit time because it needs a live read.

use crate::error::{ValidationError, ValidationResult};
use crate::types::SaleDraft;

pub const MAX_SKU_LEN: usize = 40;
pub const MAX_NAME_LEN: usize = 120;
pub const MAX_SIZE_LEN: usize = 60;

// ============================================================================
// Catalog Fields
// ============================================================================

pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    if sku.trim().is_empty() {
        return Err(ValidationError::Required { field: "sku" });
    }
    if sku.len() > MAX_SKU_LEN {
        return Err(ValidationError::TooLong { field: "sku", max: MAX_SKU_LEN });
    }
    Ok(())
}

pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong { field: "name", max: MAX_NAME_LEN });
    }
    Ok(())
}

pub fn validate_size_label(size: &str) -> ValidationResult<()> {
    if size.trim().is_empty() {
        return Err(ValidationError::Required { field: "size" });
    }
    if size.len() > MAX_SIZE_LEN {
        return Err(ValidationError::TooLong { field: "size", max: MAX_SIZE_LEN });
    }
    Ok(())
}

/// Prices and costs may be zero (giveaways, samples) but never negative.
pub fn validate_amount(amount: i64, field: &'static str) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::Negative { field });
    }
    Ok(())
}

pub fn validate_stock_qty(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::Negative { field: "stockQty" });
    }
    Ok(())
}

// ============================================================================
// Customers
// ============================================================================

pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }
    if name.len() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong { field: "name", max: MAX_NAME_LEN });
    }
    Ok(())
}

// ============================================================================
// Sale Drafts
// ============================================================================

/// Shape checks for a draft about to be committed.
///
/// An empty cart is rejected here; per-product stock checks happen inside
/// the ledger against a fresh read. The manual discount percentage is
/// deliberately NOT validated: the calculator clamps it to `0..=100`.
pub fn validate_draft(draft: &SaleDraft) -> ValidationResult<()> {
    if draft.lines.is_empty() {
        return Err(ValidationError::EmptyCart);
    }
    for line in &draft.lines {
        if line.quantity < 1 {
            return Err(ValidationError::MustBePositive { field: "quantity" });
        }
        validate_amount(line.unit_price, "unitPrice")?;
        validate_amount(line.unit_cost, "unitCost")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SaleLine;

    fn draft_with(lines: Vec<SaleLine>) -> SaleDraft {
        SaleDraft { lines, ..SaleDraft::default() }
    }

    fn line(quantity: i64, unit_price: i64) -> SaleLine {
        SaleLine {
            product_id: "p-1".into(),
            product_name: "Café Honduras".into(),
            size: "1 kg".into(),
            quantity,
            unit_price,
            unit_cost: 0,
        }
    }

    #[test]
    fn sku_must_be_present_and_short() {
        assert!(validate_sku("HON-1KG").is_ok());
        assert_eq!(validate_sku("   "), Err(ValidationError::Required { field: "sku" }));
        assert!(validate_sku(&"x".repeat(41)).is_err());
    }

    #[test]
    fn amounts_allow_zero_but_not_negative() {
        assert!(validate_amount(0, "unitPrice").is_ok());
        assert_eq!(
            validate_amount(-1, "unitPrice"),
            Err(ValidationError::Negative { field: "unitPrice" })
        );
    }

    #[test]
    fn stock_cannot_start_negative() {
        assert!(validate_stock_qty(0).is_ok());
        assert!(validate_stock_qty(-3).is_err());
    }

    #[test]
    fn empty_cart_is_rejected() {
        assert_eq!(validate_draft(&draft_with(vec![])), Err(ValidationError::EmptyCart));
    }

    #[test]
    fn zero_quantity_line_is_rejected() {
        let draft = draft_with(vec![line(0, 9_800)]);
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::MustBePositive { field: "quantity" })
        );
    }

    #[test]
    fn negative_price_line_is_rejected() {
        let draft = draft_with(vec![line(1, -5)]);
        assert_eq!(
            validate_draft(&draft),
            Err(ValidationError::Negative { field: "unitPrice" })
        );
    }

    #[test]
    fn well_formed_draft_passes() {
        let draft = draft_with(vec![line(2, 9_800)]);
        assert!(validate_draft(&draft).is_ok());
    }
}
