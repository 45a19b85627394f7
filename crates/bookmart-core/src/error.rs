//! # Error Types
//!
//! Domain-specific error types for bookmart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookmart-core errors (this file)                                      │
//! │  └── CartError        - Cart input validation failures                 │
//! │                                                                         │
//! │  Everything else in the cart domain is a total function over maps:     │
//! │  lookups default to absent/empty, removals of absent entries are       │
//! │  no-ops, and clearing a missing cart succeeds. The only fallible       │
//! │  path is quantity validation on add.                                   │
//! │                                                                         │
//! │  Flow: CartError → HTTP 4xx mapping in the consuming handler           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (the offending value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Cart domain errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// Quantity passed to an add operation was zero or negative.
    ///
    /// ## When This Occurs
    /// - A handler forwards a raw request body without its own check
    /// - A client sends 0 meaning "remove" to the wrong endpoint
    ///   (removal belongs to the update endpoint, where <= 0 removes)
    #[error("Quantity must be positive, got {requested}")]
    InvalidQuantity { requested: i64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CartError::InvalidQuantity { requested: -3 };
        assert_eq!(err.to_string(), "Quantity must be positive, got -3");

        let err = CartError::InvalidQuantity { requested: 0 };
        assert_eq!(err.to_string(), "Quantity must be positive, got 0");
    }
}
