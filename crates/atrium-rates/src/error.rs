//! # Rate Shopping Error Types
//!
//! Error types for rate shopping operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Rate Shopping Error Categories                       │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌──────────────────────────────────────────────┐ │
//! │  │    Request      │  │           Provider (per carrier)             │ │
//! │  │                 │  │                                              │ │
//! │  │  InvalidRequest │  │  Timeout / Rejected / Transient              │ │
//! │  │  (caller bug,   │  │  (swallowed inside the fan-out, logged,      │ │
//! │  │   propagates)   │  │   NEVER propagated individually)             │ │
//! │  └─────────────────┘  └──────────────────────────────────────────────┘ │
//! │                                                                         │
//! │  "All providers failed" is NOT an error: it is the                     │
//! │  `RateOutcome::NoServiceAvailable` data value.                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for rate shopping operations.
pub type RatesResult<T> = Result<T, RatesError>;

/// Errors the rate shopper surfaces to its caller.
///
/// Only caller mistakes propagate; carrier-side failures are aggregated
/// into the `RateOutcome` instead.
#[derive(Debug, Error)]
pub enum RatesError {
    /// The shipment request failed validation (empty parcels, negative
    /// dimensions, blank origin/destination).
    #[error("invalid shipment request: {0}")]
    InvalidRequest(#[from] atrium_core::ValidationError),
}

/// A single carrier's quote failure.
///
/// Produced by `QuoteProvider` implementations; the shopper logs these
/// and moves on.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The carrier did not answer in time.
    #[error("carrier timed out: {0}")]
    Timeout(String),

    /// The carrier rejected the request (unsupported route, oversize
    /// parcel, ...). Not retryable with the same request.
    #[error("carrier rejected request: {0}")]
    Rejected(String),

    /// A transient transport failure.
    #[error("transient carrier failure: {0}")]
    Transient(String),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_request_wraps_core_validation() {
        let core_err = atrium_core::ValidationError::EmptyParcels;
        let err: RatesError = core_err.into();
        assert_eq!(
            err.to_string(),
            "invalid shipment request: shipment request must contain at least one parcel"
        );
    }

    #[test]
    fn test_provider_error_messages() {
        let err = ProviderError::Rejected("route not served".to_string());
        assert_eq!(err.to_string(), "carrier rejected request: route not served");
    }
}
