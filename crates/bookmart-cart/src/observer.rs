//! # Cart Observers
//!
//! The notification contract for cart changes.
//!
//! ## Observer Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Observer Lifecycle                                  │
//! │                                                                         │
//! │  register_observer(obs)                                                 │
//! │       │  (idempotent by identity - same Arc twice is one entry)        │
//! │       ▼                                                                 │
//! │  ┌──────────────┐   every cart mutation    ┌──────────────────────┐    │
//! │  │  Registered  │─────────────────────────►│ cart_updated(user,   │    │
//! │  │  (in order)  │                          │   &snapshot) called  │    │
//! │  └──────────────┘                          └──────────────────────┘    │
//! │       │                                                                 │
//! │  remove_observer(&obs)                                                  │
//! │       │  (idempotent if absent)                                        │
//! │       ▼                                                                 │
//! │  never called again                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Isolation
//! A panicking observer is caught and logged by the store; it cannot abort
//! the mutation that triggered it or starve observers registered after it.

use bookmart_core::{Cart, UserId};
use tracing::info;

// =============================================================================
// Observer Contract
// =============================================================================

/// A component that wants to know when a user's cart changes.
///
/// Implementations receive the user id and the post-mutation cart snapshot
/// after every mutating operation on the store. The snapshot is the cart as
/// of the moment of the call; observers that need durable state should
/// clone what they keep.
///
/// `Send + Sync` because notification runs on whichever request thread
/// performed the mutation.
pub trait CartObserver: Send + Sync {
    /// Called after every mutation of `user_id`'s cart.
    fn cart_updated(&self, user_id: UserId, cart: &Cart);
}

// =============================================================================
// Closure Adapter
// =============================================================================

/// Adapts a plain closure into a [`CartObserver`].
///
/// ## Example
/// ```rust
/// use std::sync::Arc;
/// use bookmart_cart::{CartStore, FnObserver};
///
/// let store = CartStore::new();
/// store.register_observer(Arc::new(FnObserver::new(|user_id, cart| {
///     println!("user {user_id} now has {} books", cart.total_quantity());
/// })));
/// ```
pub struct FnObserver<F>
where
    F: Fn(UserId, &Cart) + Send + Sync,
{
    callback: F,
}

impl<F> FnObserver<F>
where
    F: Fn(UserId, &Cart) + Send + Sync,
{
    /// Wraps a closure as an observer.
    pub fn new(callback: F) -> Self {
        FnObserver { callback }
    }
}

impl<F> CartObserver for FnObserver<F>
where
    F: Fn(UserId, &Cart) + Send + Sync,
{
    fn cart_updated(&self, user_id: UserId, cart: &Cart) {
        (self.callback)(user_id, cart);
    }
}

// =============================================================================
// Logging Observer
// =============================================================================

/// An observer that logs every cart change at `info` level.
///
/// Useful as an audit trail during development and as the simplest possible
/// consumer of the contract.
#[derive(Debug, Default)]
pub struct LoggingObserver;

impl LoggingObserver {
    /// Creates a new logging observer.
    pub fn new() -> Self {
        LoggingObserver
    }
}

impl CartObserver for LoggingObserver {
    fn cart_updated(&self, user_id: UserId, cart: &Cart) {
        info!(
            user_id = %user_id,
            item_count = %cart.item_count(),
            total_quantity = %cart.total_quantity(),
            "cart updated"
        );
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
