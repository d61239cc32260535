//! # Validation Module
//!
//! Caller-side input validation for Aurum POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                           │
//! │                                                                  │
//! │  Layer 1: Calling layer (forms / integrations)                   │
//! │  ├── Runs THIS MODULE before invoking a store mutation           │
//! │  └── Disables the action while a draft is invalid                │
//! │           │                                                      │
//! │           ▼                                                      │
//! │  Layer 2: Store (aurum-store)                                    │
//! │  └── NO validation. The stores trust their callers by contract   │
//! │      and record whatever they are handed.                        │
//! │                                                                  │
//! │  That split is deliberate: the ledger's stores are record        │
//! │  keepers, not gatekeepers.                                       │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use aurum_core::validation::validate_product_draft;
//! use aurum_core::{Category, ProductDraft};
//!
//! let draft = ProductDraft {
//!     name: "Anillo de plata".to_string(),
//!     category: Category::Rings,
//!     price_cents: 45000,
//!     cost_cents: 20000,
//!     stock: 10,
//!     description: String::new(),
//!     supplier: String::new(),
//!     intake_date: "2024-03-01".parse().unwrap(),
//!     image: None,
//! };
//! assert!(validate_product_draft(&draft).is_ok());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::types::{ProductDraft, SaleDraft, WithdrawalDraft};

// =============================================================================
// Product Rules
// =============================================================================

/// Validates a product draft before `add_product`.
///
/// ## Rules
/// - name must not be blank
/// - price must be positive, cost must not be negative
/// - stock must not be negative
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::Required { field: "name" });
    }

    if draft.price_cents <= 0 {
        return Err(ValidationError::MustBePositive { field: "price" });
    }

    if draft.cost_cents < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "cost" });
    }

    if draft.stock < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "stock" });
    }

    Ok(())
}

// =============================================================================
// Sale Rules
// =============================================================================

/// Validates a sale draft before `add_sale`.
///
/// ## Rules
/// - client and seller must not be blank
/// - at least one line item
/// - every line quantity must be positive
pub fn validate_sale_draft(draft: &SaleDraft) -> ValidationResult<()> {
    if draft.client.trim().is_empty() {
        return Err(ValidationError::Required { field: "client" });
    }

    if draft.seller.trim().is_empty() {
        return Err(ValidationError::Required { field: "seller" });
    }

    if draft.items.is_empty() {
        return Err(ValidationError::EmptySale);
    }

    for item in &draft.items {
        if item.product_name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "productName",
            });
        }
        if item.quantity <= 0 {
            return Err(ValidationError::MustBePositive { field: "quantity" });
        }
    }

    Ok(())
}

// =============================================================================
// Withdrawal Rules
// =============================================================================

/// Validates a withdrawal draft before `add_withdrawal`.
///
/// ## Rules
/// - amount must be positive
/// - memo must not be blank
pub fn validate_withdrawal_draft(draft: &WithdrawalDraft) -> ValidationResult<()> {
    if draft.amount_cents <= 0 {
        return Err(ValidationError::MustBePositive { field: "amount" });
    }

    if draft.memo.trim().is_empty() {
        return Err(ValidationError::Required { field: "memo" });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
