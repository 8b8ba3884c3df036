//! # Validation Module
//!
//! Input validation utilities for the Atrium pricing engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI (TypeScript)                                   │
//! │  ├── Basic format checks (empty, ranges)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (input shape)                                    │
//! │  ├── Quantities, dimensions, tier weights, durations                   │
//! │  └── Runs before any business logic                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Business rules (catalog / cart / entitlement modules)        │
//! │  ├── Catalog completeness & ambiguity                                  │
//! │  ├── Global cart quantity cap                                          │
//! │  └── Downgrade guard                                                   │
//! │                                                                         │
//! │  Defense in depth: multiple layers catch different errors              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use atrium_core::validation::{validate_quantity, validate_purchased_months};
//!
//! validate_quantity(2).unwrap();
//! validate_purchased_months(12).unwrap();
//! ```

use crate::error::ValidationError;
use crate::types::{Dimensions, ShipmentRequest};
use crate::MAX_ORDER_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ORDER_QUANTITY (4) on its own — the cart also
///   enforces the cap across all lines combined
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ORDER_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ORDER_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items, free shipping)
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates the number of purchased subscription months.
///
/// ## Rules
/// - Must be positive (> 0); the storefront sells 1, 3, 6 or 12 month
///   packages but the engine only requires positivity
pub fn validate_purchased_months(months: u32) -> ValidationResult<()> {
    if months == 0 {
        return Err(ValidationError::MustBePositive {
            field: "purchased months".to_string(),
        });
    }

    Ok(())
}

/// Validates a subscription tier weight.
///
/// ## Rules
/// - Must be a finite, strictly positive real (weights divide each other
///   in the proration formula)
pub fn validate_tier_weight(weight: f64) -> ValidationResult<()> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "tier weight".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Shipping Validators
// =============================================================================

/// Validates one parcel's dimensions.
///
/// ## Rules
/// - Height, width, length, weight must all be non-negative
/// - Zero weight is valid: "not volumetrically significant"
pub fn validate_dimensions(dims: &Dimensions) -> ValidationResult<()> {
    let fields = [
        ("height", dims.height),
        ("width", dims.width),
        ("length", dims.length),
        ("weight", dims.weight),
    ];

    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::NegativeDimension {
                field: field.to_string(),
                value,
            });
        }
    }

    Ok(())
}

/// Validates a shipment request before it is fanned out to carriers.
///
/// ## Rules
/// - Origin and destination must be non-empty
/// - At least one parcel
/// - Every parcel passes [`validate_dimensions`]
pub fn validate_shipment_request(request: &ShipmentRequest) -> ValidationResult<()> {
    if request.origin.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "origin".to_string(),
        });
    }

    if request.destination.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "destination".to_string(),
        });
    }

    if request.parcels.is_empty() {
        return Err(ValidationError::EmptyParcels);
    }

    for parcel in &request.parcels {
        validate_dimensions(parcel)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn parcel(weight: f64) -> Dimensions {
        Dimensions {
            height: 40.0,
            width: 60.0,
            length: 120.0,
            weight,
        }
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(4).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(5).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(129_900).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_purchased_months() {
        assert!(validate_purchased_months(1).is_ok());
        assert!(validate_purchased_months(12).is_ok());
        assert!(validate_purchased_months(0).is_err());
    }

    #[test]
    fn test_validate_tier_weight() {
        assert!(validate_tier_weight(1.0).is_ok());
        assert!(validate_tier_weight(2.5).is_ok());

        assert!(validate_tier_weight(0.0).is_err());
        assert!(validate_tier_weight(-1.0).is_err());
        assert!(validate_tier_weight(f64::NAN).is_err());
        assert!(validate_tier_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_dimensions_zero_weight_ok() {
        assert!(validate_dimensions(&parcel(0.0)).is_ok());
        assert!(validate_dimensions(&parcel(12.5)).is_ok());
        assert!(validate_dimensions(&parcel(-1.0)).is_err());
    }

    #[test]
    fn test_validate_shipment_request() {
        let ok = ShipmentRequest {
            origin: "shop-hcm".to_string(),
            destination: "district-7".to_string(),
            parcels: vec![parcel(2.0)],
        };
        assert!(validate_shipment_request(&ok).is_ok());

        let empty = ShipmentRequest {
            parcels: vec![],
            ..ok.clone()
        };
        assert!(matches!(
            validate_shipment_request(&empty),
            Err(ValidationError::EmptyParcels)
        ));

        let no_origin = ShipmentRequest {
            origin: "  ".to_string(),
            ..ok.clone()
        };
        assert!(validate_shipment_request(&no_origin).is_err());

        let bad_parcel = ShipmentRequest {
            parcels: vec![parcel(2.0), parcel(-0.5)],
            ..ok
        };
        assert!(validate_shipment_request(&bad_parcel).is_err());
    }
}
