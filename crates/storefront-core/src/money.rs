//! # Money
//!
//! Prices, line totals, order subtotals and payment amounts.
//!
//! ## Representation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Money(i64) counts cents                                               │
//! │                                                                         │
//! │    catalog price_cents ──► unit_price ──► × quantity ──► line_total    │
//! │                                                 │                       │
//! │                                   Σ line_total ─┴──► Order.subtotal    │
//! │                                                                         │
//! │  Every step that can grow a value is checked and returns None on       │
//! │  overflow; checkout turns that into a typed error before any stock     │
//! │  is touched.                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Signed so that a negative payment request can be represented and then
//! refused.
//!
//! ```rust
//! use storefront_core::money::Money;
//!
//! let headphones = Money::from_cents(7_900);
//! let line = headphones.checked_multiply_quantity(3).unwrap();
//! assert_eq!(line.to_string(), "$237.00");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// An amount of cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Wraps a raw cent count.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Whole dollars, truncated toward zero.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Remaining cents, 0-99 regardless of sign.
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// The payment rule: only amounts above zero can be authorized.
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Prices `qty` units at this unit price, or `None` on overflow.
    ///
    /// ```rust
    /// use storefront_core::money::Money;
    ///
    /// assert_eq!(
    ///     Money::from_cents(49_900).checked_multiply_quantity(2),
    ///     Some(Money::from_cents(99_800))
    /// );
    /// assert_eq!(Money::from_cents(i64::MAX).checked_multiply_quantity(2), None);
    /// ```
    #[inline]
    pub const fn checked_multiply_quantity(&self, qty: u32) -> Option<Self> {
        match self.0.checked_mul(qty as i64) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }

    /// Adds two amounts, or `None` on overflow.
    #[inline]
    pub const fn checked_add(&self, other: Money) -> Option<Self> {
        match self.0.checked_add(other.0) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

/// `$10.99` / `-$5.50`, used in log fields and error messages.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}
