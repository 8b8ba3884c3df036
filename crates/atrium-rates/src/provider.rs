//! # Quote Provider Trait
//!
//! The seam between the rate shopper and the external shipping
//! integrations: one implementation per integrated carrier.
//!
//! Implementations own their HTTP clients, credentials, and per-call
//! deadlines; this crate only requires that a call eventually settles
//! with a quote or a [`ProviderError`]. Retry policy belongs to the
//! integration, never to the shopper.

use async_trait::async_trait;

use atrium_core::types::{CarrierQuote, ShipmentRequest};

use crate::error::ProviderError;

/// An async quote source for one carrier service.
///
/// Object-safe so the shopper can hold a heterogeneous provider list
/// (`Vec<Arc<dyn QuoteProvider>>`) in declaration order — that order is
/// the documented tie-break for equal fees.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Stable name used in logs ("ghn", "viettel-post", ...).
    fn name(&self) -> &str;

    /// Quotes one shipment. May take arbitrarily long; the shopper bounds
    /// the overall wait, not the individual call.
    async fn quote(&self, request: &ShipmentRequest) -> Result<CarrierQuote, ProviderError>;
}
