//! # Domain Types
//!
//! Plain data shared between the inventory, the cart and the outer layers.
//!
//! ```text
//! ┌─────────────────┐        ┌─────────────────┐        ┌─────────────────┐
//! │  CatalogEntry   │        │     Order       │   1..n │   OrderLine     │
//! │  ─────────────  │        │  ─────────────  │◆──────►│  ─────────────  │
//! │  name           │        │  id (UUID)      │        │  product        │
//! │  stock          │        │  total_quantity │        │  quantity       │
//! │  price_cents    │        │  subtotal       │        │  unit_price     │
//! └─────────────────┘        │  completed_at   │        │  line_total     │
//!   seeds Inventory          └─────────────────┘        └─────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Catalog Entry
// =============================================================================

/// One product in the initial catalog an [`Inventory`](crate::Inventory)
/// is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Product identifier, also the display name.
    pub name: String,

    /// Units on hand.
    pub stock: u32,

    /// Unit price in cents. Missing prices default to zero.
    #[serde(default)]
    pub price_cents: i64,
}

impl CatalogEntry {
    /// Creates a catalog entry.
    pub fn new(name: impl Into<String>, stock: u32, price_cents: i64) -> Self {
        CatalogEntry {
            name: name.into(),
            stock,
            price_cents,
        }
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order
// =============================================================================

/// A single product line of a checked-out order.
///
/// Uses the snapshot pattern: the unit price is frozen at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub product: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub line_total: Money,
}

impl OrderLine {
    /// Prices `quantity` units. Fails with `Overflow` if the line total does
    /// not fit in `Money`.
    pub fn new(product: impl Into<String>, quantity: u32, unit_price: Money) -> CoreResult<Self> {
        let line_total = unit_price
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| CoreError::overflow("line total"))?;

        Ok(OrderLine {
            product: product.into(),
            quantity,
            unit_price,
            line_total,
        })
    }
}

/// The result of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Lines sorted by product name.
    pub lines: Vec<OrderLine>,

    /// Sum of all line quantities.
    pub total_quantity: u32,

    /// Sum of all line totals; the amount handed to payment.
    pub subtotal: Money,

    /// When the stock was committed.
    pub completed_at: DateTime<Utc>,
}

impl Order {
    /// Builds an order from its lines, deriving the totals.
    ///
    /// Both totals are checked; an order whose quantity exceeds `u32::MAX`
    /// or whose subtotal exceeds `i64::MAX` cents fails with `Overflow`.
    pub fn from_lines(mut lines: Vec<OrderLine>) -> CoreResult<Self> {
        lines.sort_by(|a, b| a.product.cmp(&b.product));

        let mut total_quantity: u32 = 0;
        let mut subtotal = Money::zero();
        for line in &lines {
            total_quantity = total_quantity
                .checked_add(line.quantity)
                .ok_or_else(|| CoreError::overflow("quantity"))?;
            subtotal = subtotal
                .checked_add(line.line_total)
                .ok_or_else(|| CoreError::overflow("subtotal"))?;
        }

        Ok(Order {
            id: Uuid::new_v4().to_string(),
            lines,
            total_quantity,
            subtotal,
            completed_at: Utc::now(),
        })
    }

    /// Checks if the order has no lines (empty-cart checkout).
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_from_lines_derives_totals() {
        let order = Order::from_lines(vec![
            OrderLine::new("Phone", 3, Money::from_cents(49_900)).unwrap(),
            OrderLine::new("Laptop", 2, Money::from_cents(99_900)).unwrap(),
        ])
        .unwrap();

        assert_eq!(order.total_quantity, 5);
        assert_eq!(order.subtotal.cents(), 349_500);
        assert_eq!(order.lines[0].product, "Laptop");
        assert_eq!(order.lines[1].line_total.cents(), 149_700);
        assert!(Uuid::parse_str(&order.id).is_ok());
    }

    #[test]
    fn test_empty_order() {
        let order = Order::from_lines(Vec::new()).unwrap();
        assert!(order.is_empty());
        assert_eq!(order.total_quantity, 0);
        assert!(order.subtotal.is_zero());
    }

    #[test]
    fn test_line_total_overflow() {
        let err = OrderLine::new("Yacht", 2, Money::from_cents(i64::MAX / 2 + 1)).unwrap_err();
        assert_eq!(err, CoreError::overflow("line total"));
    }

    #[test]
    fn test_order_totals_overflow() {
        let bolts = OrderLine::new("Bolt", u32::MAX, Money::zero()).unwrap();
        let nuts = OrderLine::new("Nut", 1, Money::zero()).unwrap();
        assert_eq!(
            Order::from_lines(vec![bolts, nuts]),
            Err(CoreError::overflow("quantity"))
        );

        let half = Money::from_cents(i64::MAX / 2 + 1);
        let a = OrderLine::new("A", 1, half).unwrap();
        let b = OrderLine::new("B", 1, half).unwrap();
        assert_eq!(
            Order::from_lines(vec![a, b]),
            Err(CoreError::overflow("subtotal"))
        );
    }

    #[test]
    fn test_catalog_entry_price_defaults_to_zero() {
        let entry: CatalogEntry =
            serde_json::from_str(r#"{"name":"Laptop","stock":5}"#).unwrap();
        assert_eq!(entry, CatalogEntry::new("Laptop", 5, 0));
        assert!(entry.price().is_zero());
    }
}
