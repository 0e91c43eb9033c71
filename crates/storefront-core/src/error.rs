//! # Error Types
//!
//! Domain-specific error types for storefront-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  storefront-core errors (this file)                                    │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  storefront-cli errors (app)                                           │
//! │  ├── ConfigError      - Config file / env problems                     │
//! │  └── CliError         - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! "Not enough stock" while browsing is routine. `check_stock`,
//! `reduce_stock` and `Cart::add_item` answer with a `bool`. Only the
//! commit points (checkout, payment) raise errors.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A staged line can no longer be satisfied at checkout.
    ///
    /// ## User Workflow
    /// ```text
    /// add_item("Laptop", 2)     stock: 5  ✔ staged
    ///      │
    ///      ▼
    /// (stock counted down to 1 by another actor)
    ///      │
    ///      ▼
    /// checkout()
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Laptop", available: 1, requested: 2 }
    ///      │
    ///      ▼
    /// Nothing deducted, cart keeps its items for a retry
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: u32,
        requested: u32,
    },

    /// Payment amount is zero or negative.
    #[error("Invalid payment amount: {amount}")]
    InvalidAmount { amount: Money },

    /// The payment gateway refused a well-formed amount.
    #[error("Payment of {amount} declined: {reason}")]
    PaymentDeclined { amount: Money, reason: String },

    /// Cart has reached its maximum number of distinct products.
    #[error("Cart cannot have more than {max} products")]
    CartTooLarge { max: usize },

    /// Staged quantity of one product would exceed the allowed maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// A quantity or money total of the order does not fit its type.
    ///
    /// Raised while the order is being priced, before any stock moves.
    #[error("Order {field} is too large")]
    Overflow { field: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates an InsufficientStock error.
    pub fn insufficient_stock(product: impl Into<String>, available: u32, requested: u32) -> Self {
        CoreError::InsufficientStock {
            product: product.into(),
            available,
            requested,
        }
    }

    /// Creates an Overflow error for `field`.
    pub fn overflow(field: impl Into<String>) -> Self {
        CoreError::Overflow {
            field: field.into(),
        }
    }

    /// Returns the product a stock error refers to, if any.
    pub fn product(&self) -> Option<&str> {
        match self {
            CoreError::InsufficientStock { product, .. } => Some(product),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., control characters in a product name).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., the same product listed twice in a catalog).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
