//! # Validation Module
//!
//! Input validation for cart operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (external)                                      │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── Catalog existence check for the book id                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Quantity policy for add operations                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart type invariant                                          │
//! │  └── Non-positive totals are never stored                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Quantity Policy
//! An add with quantity <= 0 is REJECTED, not treated as a removal. The
//! update path already owns "<= 0 means remove"; letting the add path mean
//! the same thing silently would make the two endpoints indistinguishable
//! and hide client bugs. A rejected add mutates nothing and notifies no one.

use crate::error::{CartError, CartResult};
use crate::types::Quantity;

/// Validates a quantity for an add operation.
///
/// ## Rules
/// - Must be positive (> 0)
///
/// ## Example
/// ```rust
/// use bookmart_core::validation::validate_quantity;
///
/// assert!(validate_quantity(5).is_ok());
/// assert!(validate_quantity(0).is_err());
/// assert!(validate_quantity(-1).is_err());
/// ```
pub fn validate_quantity(quantity: Quantity) -> CartResult<()> {
    if quantity <= 0 {
        return Err(CartError::InvalidQuantity {
            requested: quantity,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());
        assert!(validate_quantity(i64::MAX).is_ok());

        assert_eq!(
            validate_quantity(0),
            Err(CartError::InvalidQuantity { requested: 0 })
        );
        assert_eq!(
            validate_quantity(-5),
            Err(CartError::InvalidQuantity { requested: -5 })
        );
    }
}
