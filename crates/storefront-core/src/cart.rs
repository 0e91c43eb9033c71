//! # Cart
//!
//! A pending order staged against one shared [`Inventory`].
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Lifecycle                                  │
//! │                                                                         │
//! │  ┌──────────┐  add_item   ┌──────────┐  checkout ok   ┌──────────┐     │
//! │  │  Empty   │────────────►│ Staging  │───────────────►│  Empty   │     │
//! │  └──────────┘             └────┬─────┘                └──────────┘     │
//! │                                │  ▲                                     │
//! │                   checkout err │  │ add_item / remove_item / retry      │
//! │                                ▼  │                                     │
//! │                         ┌─────────┴────────┐                            │
//! │                         │ Staging (items   │                            │
//! │                         │ kept, stock      │                            │
//! │                         │ untouched)       │                            │
//! │                         └──────────────────┘                            │
//! │                                                                         │
//! │  There is no closed state: a cart is reusable indefinitely.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Advisory vs Authoritative
//! `add_item` only *reads* stock, so two carts can both stage the last
//! unit. `checkout` re-validates every line under the inventory lock and
//! either commits all of them or none.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::inventory::Inventory;
use crate::money::Money;
use crate::types::Order;
use crate::validation::validate_quantity;
use crate::{MAX_CART_LINES, MAX_LINE_QUANTITY};

// =============================================================================
// Cart Limits
// =============================================================================

/// Per-cart staging limits.
///
/// `Default` is the storefront policy (100 lines, 999 units per line) used
/// by configured carts. [`Cart::new`] uses [`CartLimits::unbounded`], where
/// staging is decided by stock alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLimits {
    /// Maximum distinct products in one cart.
    #[serde(default = "default_max_lines")]
    pub max_lines: usize,

    /// Maximum staged quantity of a single product.
    #[serde(default = "default_max_quantity_per_line")]
    pub max_quantity_per_line: u32,
}

fn default_max_lines() -> usize {
    MAX_CART_LINES
}

fn default_max_quantity_per_line() -> u32 {
    MAX_LINE_QUANTITY
}

impl CartLimits {
    /// No limit on lines or per-line quantity.
    pub const fn unbounded() -> Self {
        CartLimits {
            max_lines: usize::MAX,
            max_quantity_per_line: u32::MAX,
        }
    }
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits {
            max_lines: default_max_lines(),
            max_quantity_per_line: default_max_quantity_per_line(),
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// A shopping cart bound to one inventory.
///
/// ## Invariants
/// - Every key in `pending` passed an availability check when it was added
/// - Staged quantities are > 0 and within `limits`
/// - The sum of staged quantities fits in a `u32`
/// - The inventory is borrowed; the cart never creates or drops it
#[derive(Debug)]
pub struct Cart<'a> {
    inventory: &'a Inventory,
    pending: HashMap<String, u32>,
    limits: CartLimits,
}

impl<'a> Cart<'a> {
    /// Creates an empty cart with no staging limits.
    pub fn new(inventory: &'a Inventory) -> Self {
        Self::with_limits(inventory, CartLimits::unbounded())
    }

    /// Creates an empty cart with explicit limits.
    pub fn with_limits(inventory: &'a Inventory, limits: CartLimits) -> Self {
        Cart {
            inventory,
            pending: HashMap::new(),
            limits,
        }
    }

    /// Stages `quantity` units of `product`.
    ///
    /// Returns false, leaving the cart untouched, when the product is not
    /// available in that quantity or the request breaks a cart rule. Use
    /// [`try_add_item`](Self::try_add_item) to learn why.
    pub fn add_item(&mut self, product: &str, quantity: u32) -> bool {
        match self.try_add_item(product, quantity) {
            Ok(()) => true,
            Err(e) => {
                debug!(product = %product, quantity, error = %e, "Item not staged");
                false
            }
        }
    }

    /// Stages `quantity` units of `product`, reporting the reason on failure.
    ///
    /// ## Checks (in order)
    /// ```text
    /// quantity > 0?                  ──no──► Validation
    /// staged + quantity <= max?      ──no──► QuantityTooLarge
    /// cart total fits in u32?        ──no──► QuantityTooLarge
    /// new line and cart full?        ──yes─► CartTooLarge
    /// inventory.check_stock(qty)?    ──no──► InsufficientStock
    ///                                 │
    ///                                 ▼
    ///                  pending[product] += quantity
    /// ```
    ///
    /// The stock check covers only the newly requested quantity; the full
    /// line is re-checked at checkout.
    pub fn try_add_item(&mut self, product: &str, quantity: u32) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let staged = self.quantity_of(product);
        let max = self.limits.max_quantity_per_line;
        let new_quantity = match staged.checked_add(quantity) {
            Some(q) if q <= max => q,
            _ => {
                return Err(CoreError::QuantityTooLarge {
                    requested: staged.saturating_add(quantity),
                    max,
                })
            }
        };

        let total = self.total_quantity();
        if total.checked_add(quantity).is_none() {
            return Err(CoreError::QuantityTooLarge {
                requested: total.saturating_add(quantity),
                max: u32::MAX,
            });
        }

        if staged == 0 && self.pending.len() >= self.limits.max_lines {
            return Err(CoreError::CartTooLarge {
                max: self.limits.max_lines,
            });
        }

        if !self.inventory.check_stock(product, quantity) {
            return Err(CoreError::insufficient_stock(
                product,
                self.inventory.stock_of(product),
                quantity,
            ));
        }

        self.pending.insert(product.to_string(), new_quantity);
        debug!(product = %product, quantity, staged = new_quantity, "Item staged");
        Ok(())
    }

    /// Drops a product from the cart. Returns false if it was not staged.
    pub fn remove_item(&mut self, product: &str) -> bool {
        self.pending.remove(product).is_some()
    }

    /// Empties the cart without touching the inventory.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Commits the pending order and returns the number of units checked out.
    ///
    /// On failure nothing is deducted and the cart keeps its items, so the
    /// caller can adjust quantities and retry.
    pub fn checkout(&mut self) -> CoreResult<u32> {
        self.checkout_order().map(|order| order.total_quantity)
    }

    /// Commits the pending order and returns it with prices and totals.
    pub fn checkout_order(&mut self) -> CoreResult<Order> {
        if self.pending.is_empty() {
            debug!("Checkout of empty cart");
            return Order::from_lines(Vec::new());
        }

        let order = self.inventory.commit_order(&self.pending).map_err(|e| {
            warn!(error = %e, lines = self.pending.len(), "Checkout failed, cart kept");
            e
        })?;

        self.pending.clear();

        info!(
            order_id = %order.id,
            total_quantity = order.total_quantity,
            subtotal = %order.subtotal,
            "Checkout complete"
        );
        Ok(order)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Staged quantity of one product (zero if not staged).
    pub fn quantity_of(&self, product: &str) -> u32 {
        self.pending.get(product).copied().unwrap_or(0)
    }

    /// Iterates over staged `(product, quantity)` pairs in no particular order.
    pub fn pending(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.pending.iter().map(|(p, q)| (p.as_str(), *q))
    }

    /// Number of distinct products staged.
    pub fn line_count(&self) -> usize {
        self.pending.len()
    }

    /// Sum of all staged quantities.
    pub fn total_quantity(&self) -> u32 {
        self.pending.values().fold(0u32, |acc, q| acc.saturating_add(*q))
    }

    /// Staged value at current inventory prices.
    ///
    /// Fails with `Overflow` when the value does not fit in `Money`.
    pub fn subtotal(&self) -> CoreResult<Money> {
        self.pending.iter().try_fold(Money::zero(), |acc, (product, qty)| {
            self.inventory
                .price_of(product)
                .unwrap_or_default()
                .checked_multiply_quantity(*qty)
                .and_then(|line| acc.checked_add(line))
                .ok_or_else(|| CoreError::overflow("subtotal"))
        })
    }

    /// True when nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Limits this cart was created with.
    pub fn limits(&self) -> CartLimits {
        self.limits
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::CatalogEntry;

    fn sample() -> Inventory {
        Inventory::from_catalog(vec![
            CatalogEntry::new("Laptop", 5, 99_900),
            CatalogEntry::new("Phone", 10, 49_900),
            CatalogEntry::new("Headphones", 15, 7_900),
        ])
    }

    #[test]
    fn test_add_item_sums_quantities() {
        let inventory = sample();
        let mut cart = Cart::new(&inventory);

        assert!(cart.add_item("Phone", 3));
        assert!(cart.add_item("Phone", 4));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("Phone"), 7);
        // Staging never touches stock.
        assert_eq!(inventory.stock_of("Phone"), 10);
    }

    #[test]
    fn test_add_item_checks_only_the_new_quantity() {
        let inventory = sample();
        let mut cart = Cart::new(&inventory);

        assert!(cart.add_item("Laptop", 4));
        assert!(cart.add_item("Laptop", 4));
        assert_eq!(cart.quantity_of("Laptop"), 8);

        // The combined line is caught at checkout.
        assert!(matches!(
            cart.checkout(),
            Err(CoreError::InsufficientStock { available: 5, requested: 8, .. })
        ));
    }

    #[test]
    fn test_failed_add_leaves_cart_untouched() {
        let inventory = sample();
        let mut cart = Cart::new(&inventory);
        assert!(cart.add_item("Phone", 2));

        assert!(!cart.add_item("Laptop", 6));
        assert!(!cart.add_item("Tablet", 1));
        assert!(!cart.add_item("Phone", 0));
        assert!(!cart.add_item("", 1));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("Phone"), 2);
        assert_eq!(cart.quantity_of("Laptop"), 0);
    }

    #[test]
    fn test_try_add_item_reasons() {
        let inventory = sample();
        let mut cart = Cart::new(&inventory);

        assert_eq!(
            cart.try_add_item("Laptop", 6),
            Err(CoreError::insufficient_stock("Laptop", 5, 6))
        );
        assert_eq!(
            cart.try_add_item("Laptop", 0),
            Err(CoreError::Validation(ValidationError::MustBePositive {
                field: "quantity".to_string()
            }))
        );
        // Names are not policed here; an unknown one is simply out of stock.
        assert_eq!(
            cart.try_add_item(" ", 1),
            Err(CoreError::insufficient_stock(" ", 0, 1))
        );
    }

    #[test]
    fn test_new_cart_is_limited_by_stock_only() {
        let inventory = Inventory::new(HashMap::from([
            ("Bolt".to_string(), 5_000),
            (" spaced name ".to_string(), 1),
        ]));
        let mut cart = Cart::new(&inventory);

        assert!(inventory.check_stock("Bolt", 1_000));
        assert!(cart.add_item("Bolt", 1_000));
        assert!(cart.add_item("Bolt", 4_000));
        assert!(cart.add_item(" spaced name ", 1));
        assert_eq!(cart.limits(), CartLimits::unbounded());

        assert_eq!(cart.checkout(), Ok(5_001));
        assert_eq!(inventory.stock_of("Bolt"), 0);
    }

    #[test]
    fn test_default_limits_are_storefront_policy() {
        let inventory = Inventory::new(HashMap::from([("Bolt".to_string(), 5_000)]));
        let mut cart = Cart::with_limits(&inventory, CartLimits::default());

        assert_eq!(
            cart.try_add_item("Bolt", 1_000),
            Err(CoreError::QuantityTooLarge {
                requested: 1_000,
                max: MAX_LINE_QUANTITY
            })
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_total_cannot_exceed_u32() {
        let inventory = Inventory::new(HashMap::from([
            ("A".to_string(), u32::MAX),
            ("B".to_string(), u32::MAX),
        ]));
        let mut cart = Cart::new(&inventory);

        assert!(cart.add_item("A", u32::MAX));
        assert_eq!(
            cart.try_add_item("B", 1),
            Err(CoreError::QuantityTooLarge {
                requested: u32::MAX,
                max: u32::MAX
            })
        );
        assert_eq!(cart.line_count(), 1);

        assert_eq!(cart.checkout(), Ok(u32::MAX));
        assert_eq!(inventory.stock_of("A"), 0);
        assert_eq!(inventory.stock_of("B"), u32::MAX);
    }

    #[test]
    fn test_overpriced_checkout_moves_no_stock() {
        let inventory = Inventory::from_catalog(vec![CatalogEntry::new(
            "Yacht",
            10,
            i64::MAX / 2 + 1,
        )]);
        let mut cart = Cart::new(&inventory);

        assert!(cart.add_item("Yacht", 2));
        assert_eq!(cart.subtotal(), Err(CoreError::overflow("subtotal")));
        assert_eq!(
            cart.checkout_order().unwrap_err(),
            CoreError::overflow("line total")
        );

        assert_eq!(inventory.stock_of("Yacht"), 10);
        assert_eq!(cart.quantity_of("Yacht"), 2);
    }

    #[test]
    fn test_limits() {
        let inventory = sample();
        let limits = CartLimits {
            max_lines: 2,
            max_quantity_per_line: 5,
        };
        let mut cart = Cart::with_limits(&inventory, limits);

        assert!(cart.try_add_item("Phone", 5).is_ok());
        assert_eq!(
            cart.try_add_item("Phone", 1),
            Err(CoreError::QuantityTooLarge {
                requested: 6,
                max: 5
            })
        );

        assert!(cart.try_add_item("Laptop", 1).is_ok());
        assert_eq!(
            cart.try_add_item("Headphones", 1),
            Err(CoreError::CartTooLarge { max: 2 })
        );

        // Topping up an existing line is not a new line.
        assert!(cart.try_add_item("Laptop", 1).is_ok());
        assert_eq!(cart.limits(), limits);
    }

    #[test]
    fn test_checkout_commits_and_clears() {
        let inventory = sample();
        let mut cart = Cart::new(&inventory);
        cart.add_item("Laptop", 2);
        cart.add_item("Phone", 3);

        assert_eq!(cart.subtotal(), Ok(Money::from_cents(2 * 99_900 + 3 * 49_900)));
        assert_eq!(cart.total_quantity(), 5);

        let order = cart.checkout_order().unwrap();
        assert_eq!(order.total_quantity, 5);
        assert_eq!(order.subtotal, Money::from_cents(349_500));
        assert_eq!(order.lines.len(), 2);

        assert!(cart.is_empty());
        assert_eq!(inventory.stock_of("Laptop"), 3);
        assert_eq!(inventory.stock_of("Phone"), 7);
        assert_eq!(inventory.stock_of("Headphones"), 15);
    }

    #[test]
    fn test_failed_checkout_keeps_items_and_stock() {
        let inventory = sample();
        let mut cart = Cart::new(&inventory);
        cart.add_item("Headphones", 5);
        cart.add_item("Laptop", 2);
        cart.add_item("Phone", 1);

        inventory.set_stock("Laptop", 1);
        let before = inventory.snapshot();

        assert_eq!(
            cart.checkout(),
            Err(CoreError::insufficient_stock("Laptop", 1, 2))
        );
        assert_eq!(inventory.snapshot(), before);
        assert_eq!(cart.line_count(), 3);

        // Retry after a restock succeeds with the same cart.
        inventory.restock("Laptop", 1);
        assert_eq!(cart.checkout(), Ok(8));
        assert_eq!(inventory.stock_of("Laptop"), 0);
        assert_eq!(inventory.stock_of("Headphones"), 10);
    }

    #[test]
    fn test_empty_checkout() {
        let inventory = sample();
        let before = inventory.snapshot();
        let mut cart = Cart::new(&inventory);

        assert_eq!(cart.checkout(), Ok(0));
        assert!(cart.checkout_order().unwrap().is_empty());
        assert_eq!(inventory.snapshot(), before);
    }

    #[test]
    fn test_two_carts_race_for_last_units() {
        let inventory = sample();
        let mut first = Cart::new(&inventory);
        let mut second = Cart::new(&inventory);

        // Both pass the advisory check against the same 5 laptops.
        assert!(first.add_item("Laptop", 4));
        assert!(second.add_item("Laptop", 3));

        assert_eq!(first.checkout(), Ok(4));
        assert!(matches!(
            second.checkout(),
            Err(CoreError::InsufficientStock { available: 1, .. })
        ));
        assert_eq!(inventory.stock_of("Laptop"), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let inventory = sample();
        let mut cart = Cart::new(&inventory);
        cart.add_item("Laptop", 1);
        cart.add_item("Phone", 1);

        assert!(cart.remove_item("Laptop"));
        assert!(!cart.remove_item("Laptop"));
        assert_eq!(cart.pending().collect::<Vec<_>>(), vec![("Phone", 1)]);

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(inventory.stock_of("Phone"), 10);
    }
}
