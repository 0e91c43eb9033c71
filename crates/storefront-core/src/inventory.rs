//! # Inventory
//!
//! The authoritative stock ledger.
//!
//! ## Thread Safety
//! The ledger lives behind one `parking_lot::Mutex`, so an `&Inventory` is
//! `Sync` and many carts (on many threads) may share it. Every operation
//! that inspects and then mutates stock does both under a single lock
//! acquisition.
//!
//! ## Stock Movements
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stock Movements                                  │
//! │                                                                         │
//! │  Decreases                           Increases                          │
//! │  ─────────                           ─────────                          │
//! │  reduce_stock()      ──┐             restock()        ──┐               │
//! │  commit_order()      ──┼─► reduce_   set_stock() (up) ──┴─► += qty      │
//! │  set_stock() (down)  ──┘   locked                                       │
//! │                                                                         │
//! │  reduce_locked refuses any decrement larger than what is on hand,      │
//! │  so a quantity can never drop below zero.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, HashMap};

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CatalogEntry, Order, OrderLine};

/// One ledger row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct StockEntry {
    quantity: u32,
    unit_price: Money,
}

/// Product name → stock row.
type Ledger = HashMap<String, StockEntry>;

/// Stock counts per product.
///
/// ## Invariants
/// - Quantities are `u32` and every decrement goes through
///   `reduce_locked`, which never underflows
/// - Entries are never removed, only decremented or incremented
/// - Unknown products behave as zero stock
#[derive(Debug, Default)]
pub struct Inventory {
    ledger: Mutex<Ledger>,
}

impl Inventory {
    /// Creates an inventory from a bare product → quantity mapping.
    /// Prices default to zero.
    pub fn new(initial: HashMap<String, u32>) -> Self {
        let ledger = initial
            .into_iter()
            .map(|(product, quantity)| {
                (
                    product,
                    StockEntry {
                        quantity,
                        unit_price: Money::zero(),
                    },
                )
            })
            .collect();

        Inventory {
            ledger: Mutex::new(ledger),
        }
    }

    /// Creates an inventory from catalog entries, keeping unit prices.
    ///
    /// A later entry with the same name replaces an earlier one; use
    /// [`validate_catalog`](crate::validation::validate_catalog) first to
    /// reject such catalogs.
    pub fn from_catalog(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let ledger = entries
            .into_iter()
            .map(|entry| {
                let unit_price = entry.price();
                (
                    entry.name,
                    StockEntry {
                        quantity: entry.stock,
                        unit_price,
                    },
                )
            })
            .collect();

        Inventory {
            ledger: Mutex::new(ledger),
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Returns true iff at least `quantity` units of `product` are on hand.
    ///
    /// No side effect. This is an advisory check: nothing is reserved.
    pub fn check_stock(&self, product: &str, quantity: u32) -> bool {
        let ledger = self.ledger.lock();
        available(&ledger, product) >= quantity
    }

    /// Current units on hand (zero for unknown products).
    pub fn stock_of(&self, product: &str) -> u32 {
        available(&self.ledger.lock(), product)
    }

    /// Unit price of a known product.
    pub fn price_of(&self, product: &str) -> Option<Money> {
        self.ledger.lock().get(product).map(|e| e.unit_price)
    }

    /// Sorted copy of all stock counts.
    pub fn snapshot(&self) -> BTreeMap<String, u32> {
        self.ledger
            .lock()
            .iter()
            .map(|(product, entry)| (product.clone(), entry.quantity))
            .collect()
    }

    /// Sorted copy of the catalog, prices included.
    pub fn catalog(&self) -> Vec<CatalogEntry> {
        let mut entries: Vec<CatalogEntry> = self
            .ledger
            .lock()
            .iter()
            .map(|(product, entry)| {
                CatalogEntry::new(product.clone(), entry.quantity, entry.unit_price.cents())
            })
            .collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        entries
    }

    // =========================================================================
    // Writes
    // =========================================================================

    /// Decrements stock if enough is on hand.
    ///
    /// Returns false and leaves the ledger untouched otherwise. The check
    /// and the decrement happen under one lock.
    pub fn reduce_stock(&self, product: &str, quantity: u32) -> bool {
        let mut ledger = self.ledger.lock();
        reduce_locked(&mut ledger, product, quantity)
    }

    /// Adds units to a product, creating a zero-priced entry if needed.
    pub fn restock(&self, product: &str, quantity: u32) {
        let mut ledger = self.ledger.lock();
        let entry = ledger.entry(product.to_string()).or_default();
        entry.quantity = entry.quantity.saturating_add(quantity);
        debug!(product = %product, quantity, on_hand = entry.quantity, "Restocked");
    }

    /// Sets the on-hand count after a physical count.
    ///
    /// Downward corrections are applied through the same reduction path as
    /// sales.
    pub fn set_stock(&self, product: &str, quantity: u32) {
        let mut ledger = self.ledger.lock();
        let current = available(&ledger, product);

        if quantity < current {
            reduce_locked(&mut ledger, product, current - quantity);
        } else {
            let entry = ledger.entry(product.to_string()).or_default();
            entry.quantity = quantity;
        }

        debug!(product = %product, from = current, to = quantity, "Stock count corrected");
    }

    /// Commits a whole order against the ledger, all-or-nothing.
    ///
    /// ## Two Phases, One Lock
    /// ```text
    /// lock ──► verify + price every line ──► shortfall/overflow? ──yes──► Err, ledger untouched
    ///                                              │
    ///                                              no
    ///                                              ▼
    ///                                   reduce every line ──► Ok(order)
    /// ```
    ///
    /// Phase 1 does everything that can fail: the stock check, the line
    /// totals and the order totals. Phase 2 only decrements.
    ///
    /// Lines are processed in product-name order, so with several shortfalls
    /// the error names the first product alphabetically.
    pub fn commit_order(&self, order: &HashMap<String, u32>) -> CoreResult<Order> {
        let mut products: Vec<(&String, u32)> = order.iter().map(|(p, q)| (p, *q)).collect();
        products.sort_by(|a, b| a.0.cmp(b.0));

        let mut ledger = self.ledger.lock();

        let mut lines = Vec::with_capacity(products.len());
        for &(product, requested) in &products {
            let on_hand = available(&ledger, product);
            if on_hand < requested {
                warn!(product = %product, available = on_hand, requested, "Order rejected, stock too low");
                return Err(CoreError::insufficient_stock(
                    product.as_str(),
                    on_hand,
                    requested,
                ));
            }

            let unit_price = ledger
                .get(product.as_str())
                .map(|e| e.unit_price)
                .unwrap_or_default();
            lines.push(OrderLine::new(product.as_str(), requested, unit_price)?);
        }
        let priced = Order::from_lines(lines).map_err(|e| {
            warn!(error = %e, "Order rejected, totals out of range");
            e
        })?;

        for (product, quantity) in products {
            let reduced = reduce_locked(&mut ledger, product, quantity);
            debug_assert!(reduced, "verified line failed to reduce");
        }

        info!(lines = priced.lines.len(), "Order committed against inventory");
        Ok(priced)
    }
}

impl From<HashMap<String, u32>> for Inventory {
    fn from(initial: HashMap<String, u32>) -> Self {
        Inventory::new(initial)
    }
}

// =============================================================================
// Ledger helpers (caller holds the lock)
// =============================================================================

fn available(ledger: &Ledger, product: &str) -> u32 {
    ledger.get(product).map(|e| e.quantity).unwrap_or(0)
}

/// The only place stock is ever decremented.
fn reduce_locked(ledger: &mut Ledger, product: &str, quantity: u32) -> bool {
    match ledger.get_mut(product) {
        Some(entry) if entry.quantity >= quantity => {
            entry.quantity -= quantity;
            debug!(product = %product, quantity, on_hand = entry.quantity, "Stock reduced");
            true
        }
        // Unknown product: only a zero-unit reduction passes the check.
        None => quantity == 0,
        Some(_) => false,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Inventory {
        Inventory::new(HashMap::from([
            ("Laptop".to_string(), 5),
            ("Phone".to_string(), 10),
            ("Headphones".to_string(), 15),
        ]))
    }

    #[test]
    fn test_check_stock() {
        let inventory = sample();
        assert!(inventory.check_stock("Laptop", 5));
        assert!(!inventory.check_stock("Laptop", 6));
        assert!(inventory.check_stock("Laptop", 0));
        assert_eq!(inventory.stock_of("Laptop"), 5);
    }

    #[test]
    fn test_unknown_product_is_zero_stock() {
        let inventory = sample();
        assert!(!inventory.check_stock("Tablet", 1));
        assert!(inventory.check_stock("Tablet", 0));
        assert!(!inventory.reduce_stock("Tablet", 1));
        assert_eq!(inventory.stock_of("Tablet"), 0);
        assert!(!inventory.snapshot().contains_key("Tablet"));
        assert_eq!(inventory.price_of("Tablet"), None);
    }

    #[test]
    fn test_reduce_stock() {
        let inventory = sample();
        assert!(inventory.reduce_stock("Phone", 4));
        assert_eq!(inventory.stock_of("Phone"), 6);

        assert!(!inventory.reduce_stock("Phone", 7));
        assert_eq!(inventory.stock_of("Phone"), 6);

        assert!(inventory.reduce_stock("Phone", 6));
        assert_eq!(inventory.stock_of("Phone"), 0);
    }

    #[test]
    fn test_restock_and_set_stock() {
        let inventory = sample();
        inventory.restock("Laptop", 3);
        assert_eq!(inventory.stock_of("Laptop"), 8);

        inventory.restock("Tablet", 2);
        assert_eq!(inventory.stock_of("Tablet"), 2);
        assert_eq!(inventory.price_of("Tablet"), Some(Money::zero()));

        inventory.set_stock("Laptop", 1);
        assert_eq!(inventory.stock_of("Laptop"), 1);

        inventory.set_stock("Laptop", 20);
        assert_eq!(inventory.stock_of("Laptop"), 20);

        inventory.restock("Laptop", u32::MAX);
        assert_eq!(inventory.stock_of("Laptop"), u32::MAX);
    }

    #[test]
    fn test_from_catalog_keeps_prices() {
        let inventory = Inventory::from_catalog(vec![
            CatalogEntry::new("Laptop", 5, 99_900),
            CatalogEntry::new("Phone", 10, 49_900),
        ]);
        assert_eq!(inventory.price_of("Laptop"), Some(Money::from_cents(99_900)));
        assert_eq!(
            inventory.catalog(),
            vec![
                CatalogEntry::new("Laptop", 5, 99_900),
                CatalogEntry::new("Phone", 10, 49_900),
            ]
        );
    }

    #[test]
    fn test_commit_order_is_all_or_nothing() {
        let inventory = sample();
        let before = inventory.snapshot();

        let order = HashMap::from([
            ("Headphones".to_string(), 2),
            ("Laptop".to_string(), 6),
            ("Phone".to_string(), 1),
        ]);

        let err = inventory.commit_order(&order).unwrap_err();
        assert_eq!(err, CoreError::insufficient_stock("Laptop", 5, 6));
        assert_eq!(inventory.snapshot(), before);
    }

    #[test]
    fn test_commit_order_reduces_every_line() {
        let inventory = sample();
        let order = HashMap::from([("Laptop".to_string(), 2), ("Phone".to_string(), 3)]);

        let committed = inventory.commit_order(&order).unwrap();
        assert_eq!(committed.lines.len(), 2);
        assert_eq!(committed.lines[0].product, "Laptop");
        assert_eq!(committed.total_quantity, 5);
        assert_eq!(
            inventory.snapshot(),
            BTreeMap::from([
                ("Headphones".to_string(), 15),
                ("Laptop".to_string(), 3),
                ("Phone".to_string(), 7),
            ])
        );
    }

    #[test]
    fn test_commit_order_prices_before_reducing() {
        let inventory = Inventory::from_catalog(vec![
            CatalogEntry::new("Anchor", 10, 100),
            CatalogEntry::new("Yacht", 10, i64::MAX / 2 + 1),
        ]);
        let before = inventory.snapshot();

        let order = HashMap::from([("Anchor".to_string(), 1), ("Yacht".to_string(), 2)]);
        assert_eq!(
            inventory.commit_order(&order),
            Err(CoreError::overflow("line total"))
        );
        assert_eq!(inventory.snapshot(), before);
    }

    #[test]
    fn test_commit_order_rejects_quantity_total_overflow() {
        let inventory = Inventory::new(HashMap::from([
            ("Bolt".to_string(), u32::MAX),
            ("Nut".to_string(), u32::MAX),
        ]));
        let before = inventory.snapshot();

        let order = HashMap::from([("Bolt".to_string(), u32::MAX), ("Nut".to_string(), 1)]);
        assert_eq!(
            inventory.commit_order(&order),
            Err(CoreError::overflow("quantity"))
        );
        assert_eq!(inventory.snapshot(), before);
    }

    #[test]
    fn test_concurrent_reductions_never_oversell() {
        let inventory = Inventory::new(HashMap::from([("Laptop".to_string(), 50)]));

        let shared = &inventory;

        let successes: u32 = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(move || {
                        (0..20).filter(|_| shared.reduce_stock("Laptop", 1)).count() as u32
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).sum()
        });

        assert_eq!(successes, 50);
        assert_eq!(inventory.stock_of("Laptop"), 0);
    }

    proptest! {
        #[test]
        fn prop_check_stock_has_no_side_effect(stock in 0u32..1000, qty in 0u32..1000) {
            let inventory = Inventory::new(HashMap::from([("P".to_string(), stock)]));
            let ok = inventory.check_stock("P", qty);
            prop_assert_eq!(ok, qty <= stock);
            prop_assert_eq!(inventory.stock_of("P"), stock);
        }

        #[test]
        fn prop_reduce_stock_matches_check(stock in 0u32..1000, qty in 0u32..1000) {
            let inventory = Inventory::new(HashMap::from([("P".to_string(), stock)]));
            let expected = inventory.check_stock("P", qty);
            let reduced = inventory.reduce_stock("P", qty);

            prop_assert_eq!(reduced, expected);
            if reduced {
                prop_assert_eq!(inventory.stock_of("P"), stock - qty);
            } else {
                prop_assert_eq!(inventory.stock_of("P"), stock);
            }
        }
    }
}
