//! # Commands
//!
//! Each command takes the loaded configuration and returns a serializable
//! response; `run` prints it.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  config.catalog ──► Inventory                                          │
//! │                         │                                               │
//! │  --item NAME=QTY ──► Cart::try_add_item (first rejection aborts)       │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                  Cart::checkout_order ──► Order                         │
//! │                         │                                               │
//! │  --pay ─────────► Payment::process_payment(order.subtotal)             │
//! │                         │                                               │
//! │                         ▼                                               │
//! │                  CheckoutResponse (JSON)                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use serde::Serialize;
use storefront_core::{Cart, CatalogEntry, Order, Payment};
use tracing::{debug, info};

use crate::config::StorefrontConfig;
use crate::error::CliResult;

/// Catalog listing.
#[derive(Debug, Clone, Serialize)]
pub struct StockResponse {
    pub products: Vec<CatalogEntry>,
}

/// Outcome of a checkout.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutResponse {
    pub order: Order,

    /// `None` when payment was not requested.
    pub payment_authorized: Option<bool>,

    /// Stock left after the commit.
    pub remaining_stock: BTreeMap<String, u32>,
}

/// Lists the configured catalog.
pub fn stock(config: &StorefrontConfig) -> StockResponse {
    debug!("stock command");
    StockResponse {
        products: config.build_inventory().catalog(),
    }
}

/// Stages `items`, checks out and optionally pays the subtotal.
pub fn checkout(
    config: &StorefrontConfig,
    items: &[(String, u32)],
    pay: bool,
) -> CliResult<CheckoutResponse> {
    debug!(items = items.len(), pay, "checkout command");

    let inventory = config.build_inventory();
    let mut cart = Cart::with_limits(&inventory, config.cart);

    for (product, quantity) in items {
        cart.try_add_item(product, *quantity)?;
    }

    let order = cart.checkout_order()?;

    let payment_authorized = if pay {
        Some(Payment::new().process_payment(order.subtotal)?)
    } else {
        None
    };

    info!(order_id = %order.id, subtotal = %order.subtotal, "Order placed");

    Ok(CheckoutResponse {
        order,
        payment_authorized,
        remaining_stock: inventory.snapshot(),
    })
}
