//! # bookmart-core: Pure Domain Logic for the Bookmart Backend
//!
//! This crate holds the cart domain model as pure functions and types with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Bookmart Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              HTTP Handlers (external consumers)                 │   │
//! │  │    add item ──► change quantity ──► view cart ──► clear        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 bookmart-cart (CartStore)                       │   │
//! │  │        per-user registry, locking, observer fan-out            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ bookmart-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐     ┌───────────┐     ┌────────────┐           │   │
//! │  │   │   types   │     │   error   │     │ validation │           │   │
//! │  │   │   Cart    │     │ CartError │     │  quantity  │           │   │
//! │  │   └───────────┘     └───────────┘     └────────────┘           │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO LOCKS • NO SHARED STATE • PURE FUNCTIONS         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (`Cart`, identifier aliases)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic over its inputs
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **No Negative Quantities**: A `Cart` never stores a quantity <= 0;
//!    mutation methods remove entries instead
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use bookmart_core::Cart;
//!
//! let mut cart = Cart::new();
//! cart.add(42, 2);
//! cart.add(42, 1);
//! assert_eq!(cart.quantity(42), 3);
//!
//! // Setting a quantity to zero removes the entry entirely
//! cart.set_quantity(42, 0);
//! assert!(cart.is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bookmart_core::Cart` instead of
// `use bookmart_core::types::Cart`

pub use error::{CartError, CartResult};
pub use types::{BookId, Cart, Quantity, UserId};
