//! # Error Types
//!
//! Domain-specific error types for atrium-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  atrium-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  atrium-rates errors (separate crate)                                  │
//! │  └── RatesError       - Rate-shopping failures                         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → API layer → Storefront UI         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (attribute id, variant id, etc.)
//! 3. Errors are enum variants, never String
//! 4. "No shipping service" is NOT here — that outcome is data, not an
//!    error, and lives in `atrium-rates::RateOutcome`. Only `Cart::total`
//!    surfaces it as `NoShippingService`, because pricing a shippable
//!    order without a quote is a caller mistake.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations or data-integrity
/// problems that must be fixed upstream. None of them are retried inside
/// this crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog variant matches a complete, valid selection.
    ///
    /// ## When This Occurs
    /// - The catalog has a gap (an attribute combination was never priced)
    /// - Stale UI state references a combination removed from the catalog
    #[error("no variant matches the selected configuration")]
    VariantNotFound,

    /// Adding or changing a line would push the cart past the global
    /// quantity cap.
    ///
    /// ## User Workflow
    /// ```text
    /// Cart holds qty 3 (cap 4)
    ///      │
    ///      ▼
    /// add_line(qty: 2)
    ///      │
    ///      ▼
    /// QuantityExceeded { requested: 2, remaining: 1, max: 4 }
    ///      │
    ///      ▼
    /// UI shows: "You can order at most 4 items per order"
    /// ```
    #[error("quantity {requested} exceeds remaining cart capacity {remaining} (max {max} per order)")]
    QuantityExceeded {
        requested: i64,
        remaining: i64,
        max: i64,
    },

    /// The referenced cart line does not exist.
    #[error("cart line not found: {0}")]
    LineNotFound(String),

    /// A shippable cart was priced without a carrier quote.
    ///
    /// ## When This Occurs
    /// Rate shopping produced `NoServiceAvailable` (or was skipped) and
    /// the caller still asked for a shipped-order total. Surfacing this
    /// instead of pricing shipping as free keeps "no shipping option" a
    /// visible order state.
    #[error("order requires shipment but no carrier service is available")]
    NoShippingService,

    /// Attempted downgrade of an active entitlement.
    ///
    /// ## When This Occurs
    /// - `now < expires_at` and the target tier has a lower weight than
    ///   the current one. Extensions (same tier) and upgrades are allowed.
    #[error("cannot downgrade active tier: {current} ({current_weight}) -> {target} ({target_weight})")]
    TierConflict {
        current: String,
        current_weight: f64,
        target: String,
        target_weight: f64,
    },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// A selection names an attribute the catalog does not know.
    #[error("unknown attribute: {attribute_id}")]
    UnknownAttribute { attribute_id: String },

    /// A selection names a value that does not belong to its attribute.
    #[error("unknown value {value_id} for attribute {attribute_id}")]
    UnknownValue {
        attribute_id: String,
        value_id: String,
    },

    /// A selection carries two values for one attribute.
    #[error("duplicate selection for attribute {attribute_id}")]
    DuplicateAttribute { attribute_id: String },

    /// An attribute declares the same value id twice.
    #[error("attribute {attribute_id} declares value {value_id} twice")]
    DuplicateValue {
        attribute_id: String,
        value_id: String,
    },

    /// A selection is missing one or more catalog attributes.
    #[error("selection is missing attribute {attribute_id}")]
    MissingAttribute { attribute_id: String },

    /// The catalog's variant table has two entries for one selection.
    #[error("catalog is ambiguous: variants {first} and {second} share one selection")]
    AmbiguousVariant { first: String, second: String },

    /// The catalog's variant table does not cover every combination.
    #[error("catalog is incomplete: expected {expected} variants, found {found}")]
    IncompleteCatalog { expected: usize, found: usize },

    /// A parcel dimension is negative.
    #[error("{field} must be non-negative, got {value}")]
    NegativeDimension { field: String, value: f64 },

    /// A shipment request carries no parcels.
    #[error("shipment request must contain at least one parcel")]
    EmptyParcels,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::QuantityExceeded {
            requested: 3,
            remaining: 1,
            max: 4,
        };
        assert_eq!(
            err.to_string(),
            "quantity 3 exceeds remaining cart capacity 1 (max 4 per order)"
        );
    }

    #[test]
    fn test_tier_conflict_message() {
        let err = CoreError::TierConflict {
            current: "Gold".to_string(),
            current_weight: 2.5,
            target: "Bronze".to_string(),
            target_weight: 1.0,
        };
        assert_eq!(
            err.to_string(),
            "cannot downgrade active tier: Gold (2.5) -> Bronze (1)"
        );
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MissingAttribute {
            attribute_id: "color".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
