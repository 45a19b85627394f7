//! # Domain Types
//!
//! Core domain types for the Bookmart cart service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐          ┌──────────────────────────────────┐     │
//! │  │   Identifiers   │          │              Cart                │     │
//! │  │  ─────────────  │          │  ────────────────────────────    │     │
//! │  │  UserId  (i64)  │          │  items: BookId -> Quantity       │     │
//! │  │  BookId  (i64)  │          │  created_at: DateTime<Utc>       │     │
//! │  │  Quantity (i64) │          │                                  │     │
//! │  └─────────────────┘          │  INVARIANT: no entry <= 0        │     │
//! │                               └──────────────────────────────────┘     │
//! │                                                                         │
//! │  The registry (UserId -> Cart) lives in bookmart-cart; this crate      │
//! │  only knows about one user's cart at a time.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Why Integer Identifiers?
//! Users and books are rows in a relational catalog owned by an external
//! collaborator; their primary keys are 64-bit integers. This crate never
//! resolves them - an unknown `BookId` is the catalog's problem, checked
//! before the cart is touched.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// =============================================================================
// Identifier Aliases
// =============================================================================

/// Identifier of a user account (relational primary key).
pub type UserId = i64;

/// Identifier of a book in the catalog (relational primary key).
pub type BookId = i64;

/// Quantity of a single book in a cart.
///
/// Signed on purpose: `set_quantity` accepts zero and negative values and
/// treats them as "remove this entry", mirroring the update endpoint's
/// contract. A stored quantity is always > 0.
pub type Quantity = i64;

// =============================================================================
// Cart
// =============================================================================

/// One user's pending selections: a mapping from book id to quantity.
///
/// ## Invariants
/// - No entry ever has a quantity <= 0; mutations that would produce one
///   remove the entry instead
/// - Entries are unique by `BookId` (adding the same book increments)
///
/// ## Lifetime
/// A cart is not persisted. It exists in process memory until the owning
/// user clears it (or the process exits).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Quantity per book. Unordered - the cart is a multiset, not a
    /// sequence of lines.
    items: HashMap<BookId, Quantity>,

    /// When the cart was created.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart stamped with the current time.
    pub fn new() -> Self {
        Cart {
            items: HashMap::new(),
            created_at: Utc::now(),
        }
    }

    /// Increments the quantity of a book, creating the entry if absent.
    ///
    /// ## Behavior
    /// - Book already in cart: quantity increases by `quantity`
    /// - Book not in cart: entry created with `quantity`
    ///
    /// Callers validate that `quantity` is positive before reaching this
    /// method (see [`crate::validation::validate_quantity`]). If a
    /// non-positive running total is produced anyway, the entry is dropped
    /// so the no-zero-entries invariant holds unconditionally.
    pub fn add(&mut self, book_id: BookId, quantity: Quantity) {
        let total = self.items.entry(book_id).or_insert(0);
        *total += quantity;
        if *total <= 0 {
            self.items.remove(&book_id);
        }
    }

    /// Sets the quantity of a book to exactly `quantity`.
    ///
    /// ## Behavior
    /// - `quantity` <= 0: removes the entry entirely
    /// - `quantity` > 0: overwrites the entry (NOT an increment)
    pub fn set_quantity(&mut self, book_id: BookId, quantity: Quantity) {
        if quantity <= 0 {
            self.items.remove(&book_id);
        } else {
            self.items.insert(book_id, quantity);
        }
    }

    /// Removes a book from the cart. Removing an absent book is a no-op.
    pub fn remove(&mut self, book_id: BookId) {
        self.items.remove(&book_id);
    }

    /// Returns the quantity of a book, or 0 if it is not in the cart.
    pub fn quantity(&self, book_id: BookId) -> Quantity {
        self.items.get(&book_id).copied().unwrap_or(0)
    }

    /// Checks whether the book is present in the cart.
    pub fn contains(&self, book_id: BookId) -> bool {
        self.items.contains_key(&book_id)
    }

    /// Returns the quantity map.
    pub fn items(&self) -> &HashMap<BookId, Quantity> {
        &self.items
    }

    /// Returns the number of distinct books in the cart.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all books.
    pub fn total_quantity(&self) -> Quantity {
        self.items.values().sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// When the cart was created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Default for Cart {
    fn default() -> Self {
        Cart::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
