//! # bookmart-cart: Cart Registry for the Bookmart Backend
//!
//! This crate provides [`CartStore`], the single process-wide registry of
//! per-user shopping carts, and the observer mechanism that lets other
//! components react to cart changes without direct coupling.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Bookmart Data Flow                               │
//! │                                                                         │
//! │  HTTP handler ("add 2 of book 42 to user 7's cart")                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  bookmart-cart (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐              ┌───────────────────────┐     │   │
//! │  │   │   CartStore   │   notifies   │      Observers        │     │   │
//! │  │   │  (store.rs)   │─────────────►│    (observer.rs)      │     │   │
//! │  │   │               │              │                       │     │   │
//! │  │   │ Mutex<        │              │ CartObserver trait    │     │   │
//! │  │   │  UserId->Cart │              │ FnObserver closure    │     │   │
//! │  │   │ >             │              │ LoggingObserver       │     │   │
//! │  │   └───────────────┘              └───────────────────────┘     │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  bookmart-core (pure Cart semantics)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Construction
//!
//! There is no hidden global. Build one store at process start and hand an
//! `Arc` to every consumer:
//!
//! ```rust
//! use std::sync::Arc;
//! use bookmart_cart::CartStore;
//!
//! let store = Arc::new(CartStore::new());
//!
//! store.add_item(7, 42, 2)?;
//! assert_eq!(store.get_cart(7).quantity(42), 2);
//! # Ok::<(), bookmart_core::CartError>(())
//! ```
//!
//! ## Modules
//!
//! - [`store`] - The `CartStore` registry and its mutation/query operations
//! - [`observer`] - The `CartObserver` contract and bundled implementations

// =============================================================================
// Module Declarations
// =============================================================================

pub mod observer;
pub mod store;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use observer::{CartObserver, FnObserver, LoggingObserver};
pub use store::CartStore;
