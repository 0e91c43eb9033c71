//! # storefront-core: Pure Business Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It owns the stock ledger,
//! the shopping cart and the payment gate, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Storefront Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-cli (apps/)                          │   │
//! │  │     config file ──► catalog ──► checkout ──► receipt           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ storefront-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ inventory │◄─│   cart    │  │  payment  │  │   money   │  │   │
//! │  │   │  stock    │  │  pending  │  │  gateway  │  │   cents   │  │   │
//! │  │   │  ledger   │  │  checkout │  │  authorize│  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK                             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`inventory`] - Authoritative stock counts, the single reduction path
//! - [`cart`] - Pending orders staged against an inventory
//! - [`payment`] - Amount validation and the gateway seam
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`types`] - Catalog entries and checked-out orders
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation rules
//!
//! ## Example Usage
//!
//! ```rust
//! use std::collections::HashMap;
//! use storefront_core::{Cart, Inventory, Money, Payment};
//!
//! let inventory = Inventory::new(HashMap::from([
//!     ("Laptop".to_string(), 5),
//!     ("Phone".to_string(), 10),
//! ]));
//!
//! let mut cart = Cart::new(&inventory);
//! assert!(cart.add_item("Laptop", 2));
//! assert!(cart.add_item("Phone", 3));
//! assert!(!cart.add_item("Laptop", 10));
//!
//! assert_eq!(cart.checkout().unwrap(), 5);
//! assert_eq!(inventory.stock_of("Laptop"), 3);
//!
//! let payment = Payment::new();
//! assert!(payment.process_payment(Money::from_cents(100)).unwrap());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod inventory;
pub mod money;
pub mod payment;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLimits};
pub use error::{CoreError, CoreResult, ValidationError};
pub use inventory::Inventory;
pub use money::Money;
pub use payment::{LocalAuthorizer, Payment, PaymentGateway};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct products allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and keeps the checkout critical section short.
/// Default for [`CartLimits`]; overridable per deployment. Carts made with
/// [`Cart::new`] carry no limits.
pub const MAX_CART_LINES: usize = 100;

/// Maximum staged quantity of a single product.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: u32 = 999;
