//! # Payment
//!
//! Authorizes the amount derived from a checkout.
//!
//! ```text
//! Cart::checkout_order() ──► Order.subtotal ──► Payment::process_payment()
//!                                                    │
//!                                  amount <= 0 ──────┼──► InvalidAmount
//!                                                    ▼
//!                                          PaymentGateway::authorize()
//!                                                    │
//!                                      declined ─────┼──► PaymentDeclined
//!                                                    ▼
//!                                                Ok(true)
//! ```
//!
//! No currency, limit or card checks are done here. A real gateway plugs in
//! through [`PaymentGateway`]; the default [`LocalAuthorizer`] approves
//! every well-formed amount.

use tracing::{debug, info, warn};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

// =============================================================================
// Gateway Seam
// =============================================================================

/// Something that can authorize a positive amount.
pub trait PaymentGateway: Send + Sync {
    /// Returns `Ok(true)` when approved, `Ok(false)` when declined.
    fn authorize(&self, amount: Money) -> CoreResult<bool>;
}

/// Approves everything. Stands in for a real gateway.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAuthorizer;

impl PaymentGateway for LocalAuthorizer {
    fn authorize(&self, amount: Money) -> CoreResult<bool> {
        debug!(amount = %amount, "Local authorization");
        Ok(true)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// Stateless payment validator.
#[derive(Debug, Clone, Default)]
pub struct Payment<G = LocalAuthorizer> {
    gateway: G,
}

impl Payment<LocalAuthorizer> {
    /// Creates a payment step backed by [`LocalAuthorizer`].
    pub fn new() -> Self {
        Payment {
            gateway: LocalAuthorizer,
        }
    }
}

impl<G: PaymentGateway> Payment<G> {
    /// Creates a payment step that delegates to `gateway`.
    pub fn with_gateway(gateway: G) -> Self {
        Payment { gateway }
    }

    /// Authorizes `amount`.
    ///
    /// ## Errors
    /// - [`CoreError::InvalidAmount`] for zero or negative amounts; the
    ///   gateway is never consulted
    /// - [`CoreError::PaymentDeclined`] when the gateway refuses
    pub fn process_payment(&self, amount: Money) -> CoreResult<bool> {
        if !amount.is_positive() {
            warn!(amount = %amount, "Rejected non-positive payment amount");
            return Err(CoreError::InvalidAmount { amount });
        }

        if !self.gateway.authorize(amount)? {
            warn!(amount = %amount, "Payment declined by gateway");
            return Err(CoreError::PaymentDeclined {
                amount,
                reason: "declined by gateway".to_string(),
            });
        }

        info!(amount = %amount, "Payment authorized");
        Ok(true)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Declines anything above a ceiling and counts calls.
    struct CeilingGateway {
        ceiling: i64,
        calls: Arc<AtomicUsize>,
    }

    impl PaymentGateway for CeilingGateway {
        fn authorize(&self, amount: Money) -> CoreResult<bool> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(amount.cents() <= self.ceiling)
        }
    }

    #[test]
    fn test_positive_amount_is_authorized() {
        let payment = Payment::new();
        assert_eq!(payment.process_payment(Money::from_cents(100)), Ok(true));
        assert_eq!(payment.process_payment(Money::from_cents(1)), Ok(true));
    }

    #[test]
    fn test_non_positive_amounts_are_invalid() {
        let payment = Payment::new();
        assert_eq!(
            payment.process_payment(Money::zero()),
            Err(CoreError::InvalidAmount {
                amount: Money::zero()
            })
        );
        assert_eq!(
            payment.process_payment(Money::from_cents(-5)),
            Err(CoreError::InvalidAmount {
                amount: Money::from_cents(-5)
            })
        );
    }

    #[test]
    fn test_gateway_decline_and_short_circuit() {
        let calls = Arc::new(AtomicUsize::new(0));
        let payment = Payment::with_gateway(CeilingGateway {
            ceiling: 1_000,
            calls: Arc::clone(&calls),
        });

        assert_eq!(payment.process_payment(Money::from_cents(999)), Ok(true));
        assert!(matches!(
            payment.process_payment(Money::from_cents(1_001)),
            Err(CoreError::PaymentDeclined { .. })
        ));
        assert!(payment.process_payment(Money::zero()).is_err());

        // The invalid amount never reached the gateway.
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
