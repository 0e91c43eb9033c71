//! # Validation Module
//!
//! Input validation utilities for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Config loading (storefront-cli)                              │
//! │  ├── Catalog entries: names, prices, duplicates                        │
//! │  └── Cart limits                                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Cart staging (storefront-core)                               │
//! │  └── Quantity on every add; names are whatever the catalog holds       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory commit                                             │
//! │  └── Stock re-checked under the ledger lock                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::CatalogEntry;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 200;

/// Highest accepted unit price ($10,000,000.00).
///
/// At this price even a cart of `u32::MAX` units stays below `i64::MAX`
/// cents, so a validated catalog can always be totalled.
pub const MAX_PRICE_CENTS: i64 = 1_000_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most 200 characters
/// - No control characters
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Headphones").is_ok());
/// assert!(validate_product_name("  ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Required {
            field: "product".to_string(),
        });
    }

    if trimmed.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "product".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a requested quantity.
///
/// ## Rules
/// - Must be positive (> 0). Upper bounds are a cart policy, see
///   [`CartLimits`](crate::CartLimits).
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price in cents.
///
/// ## Rules
/// - Must be non-negative. Zero is allowed (free items).
/// - At most [`MAX_PRICE_CENTS`]
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a whole catalog before an inventory is built from it.
///
/// Every entry must have a valid name and price, and names must be unique
/// (a duplicate would silently shadow the earlier stock count).
pub fn validate_catalog(entries: &[CatalogEntry]) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(entries.len());

    for entry in entries {
        validate_product_name(&entry.name)?;
        validate_price_cents(entry.price_cents)?;

        if !seen.insert(entry.name.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "product".to_string(),
                value: entry.name.clone(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
