//! # Rate Shopper
//!
//! Fan-out/fan-in cheapest-quote selection across all integrated
//! carriers.
//!
//! ## Scheduling Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        One Shopping Round                               │
//! │                                                                         │
//! │  cheapest(request, [ghn, viettel, ahamove])                            │
//! │        │                                                                │
//! │        ├── spawn ghn.quote(request)      ──┐                            │
//! │        ├── spawn viettel.quote(request)  ──┤ independent tasks          │
//! │        └── spawn ahamove.quote(request)  ──┘                            │
//! │                        │                                                │
//! │        join until ALL settle ─ or ─ the global timeout elapses          │
//! │                        │                                                │
//! │        ┌───────────────┴───────────────┐                                │
//! │        ▼                               ▼                                │
//! │  some succeeded                  none succeeded                         │
//! │  minimum fee wins                NoServiceAvailable (data,              │
//! │  (ties: first listed)            not an error)                          │
//! │                                                                         │
//! │  Providers still in flight at the deadline are detached and their      │
//! │  answers discarded: a bounded best-effort quote, not the best          │
//! │  possible one.                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Individual carrier failures are logged here and never propagate;
//! checkout only ever sees a quote or `NoServiceAvailable`.

use std::sync::Arc;

use tokio::task::JoinSet;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

use atrium_core::types::{CarrierQuote, ShipmentRequest};
use atrium_core::validation::validate_shipment_request;

use crate::config::RateShopConfig;
use crate::error::{ProviderError, RatesResult};
use crate::provider::QuoteProvider;

// =============================================================================
// Rate Outcome
// =============================================================================

/// The aggregate result of one shopping round.
///
/// "No shipping service" is a legitimate order state the UI must present,
/// not a failure to retry blindly — which is why it is a value here and
/// not an error variant.
#[derive(Debug, Clone, PartialEq)]
pub enum RateOutcome {
    /// The cheapest successful quote.
    Quote(CarrierQuote),

    /// Every provider failed, returned nothing, or missed the deadline.
    NoServiceAvailable,
}

impl RateOutcome {
    /// The winning quote, if any.
    pub fn quote(&self) -> Option<&CarrierQuote> {
        match self {
            RateOutcome::Quote(quote) => Some(quote),
            RateOutcome::NoServiceAvailable => None,
        }
    }
}

// =============================================================================
// Rate Shopper
// =============================================================================

/// Queries all providers concurrently and selects the cheapest viable
/// quote. Stateless apart from its configuration; safe to share.
#[derive(Debug, Clone, Default)]
pub struct RateShopper {
    config: RateShopConfig,
}

impl RateShopper {
    /// Creates a shopper with the given configuration.
    pub fn new(config: RateShopConfig) -> Self {
        RateShopper { config }
    }

    /// Runs one shopping round.
    ///
    /// ## Contract
    /// - `request` must pass [`validate_shipment_request`] (non-empty
    ///   parcels, non-negative dimensions; zero weight is fine)
    /// - one task per provider, all issued immediately; suspension only
    ///   at the join
    /// - result is the minimum fee among providers that settled
    ///   successfully before the deadline; equal fees go to the
    ///   first-listed provider, so selection is deterministic
    /// - a provider failing never aborts the others
    ///
    /// ## Errors
    /// Only `InvalidRequest`. Carrier-side failures end up in the
    /// [`RateOutcome`].
    pub async fn cheapest(
        &self,
        request: &ShipmentRequest,
        providers: &[Arc<dyn QuoteProvider>],
    ) -> RatesResult<RateOutcome> {
        validate_shipment_request(request)?;

        if providers.is_empty() {
            warn!("rate shopping with no providers configured");
            return Ok(RateOutcome::NoServiceAvailable);
        }

        let mut calls: JoinSet<(usize, String, Result<CarrierQuote, ProviderError>)> =
            JoinSet::new();
        for (index, provider) in providers.iter().enumerate() {
            let provider = Arc::clone(provider);
            let request = request.clone();
            calls.spawn(async move {
                let name = provider.name().to_string();
                let result = provider.quote(&request).await;
                (index, name, result)
            });
        }

        let deadline = Instant::now() + self.config.shop_timeout();
        // (declaration index, quote) of the current winner.
        let mut best: Option<(usize, CarrierQuote)> = None;

        loop {
            match timeout_at(deadline, calls.join_next()).await {
                // All providers settled.
                Ok(None) => break,

                Ok(Some(Ok((index, name, Ok(quote))))) => {
                    if quote.fee_cents < 0 {
                        warn!(provider = %name, fee = quote.fee_cents, "discarding negative-fee quote");
                        continue;
                    }
                    debug!(provider = %name, fee = quote.fee_cents, "carrier quote received");
                    let better = match &best {
                        None => true,
                        Some((best_index, best_quote)) => {
                            quote.fee_cents < best_quote.fee_cents
                                || (quote.fee_cents == best_quote.fee_cents && index < *best_index)
                        }
                    };
                    if better {
                        best = Some((index, quote));
                    }
                }

                // One carrier failed: log and keep joining the rest.
                Ok(Some(Ok((_, name, Err(error))))) => {
                    warn!(provider = %name, error = %error, "carrier quote failed");
                }

                // A provider task panicked; treat like any other failure.
                Ok(Some(Err(join_error))) => {
                    warn!(error = %join_error, "carrier quote task aborted");
                }

                // Deadline hit: discard stragglers, keep what we have.
                Err(_) => {
                    warn!(
                        timeout_secs = self.config.shop_timeout_secs,
                        "rate shopping deadline elapsed; discarding unsettled providers"
                    );
                    calls.detach_all();
                    break;
                }
            }
        }

        Ok(match best {
            Some((_, quote)) => RateOutcome::Quote(quote),
            None => RateOutcome::NoServiceAvailable,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use atrium_core::types::Dimensions;

    /// Scripted carrier: answers `fee` after `delay`, or fails.
    struct FakeCarrier {
        name: String,
        delay: Duration,
        outcome: Result<i64, ProviderError>,
    }

    impl FakeCarrier {
        fn quoting(name: &str, fee_cents: i64) -> Arc<dyn QuoteProvider> {
            Arc::new(FakeCarrier {
                name: name.to_string(),
                delay: Duration::from_millis(10),
                outcome: Ok(fee_cents),
            })
        }

        fn failing(name: &str) -> Arc<dyn QuoteProvider> {
            Arc::new(FakeCarrier {
                name: name.to_string(),
                delay: Duration::from_millis(10),
                outcome: Err(ProviderError::Transient("connection reset".to_string())),
            })
        }

        fn slow(name: &str, fee_cents: i64, delay: Duration) -> Arc<dyn QuoteProvider> {
            Arc::new(FakeCarrier {
                name: name.to_string(),
                delay,
                outcome: Ok(fee_cents),
            })
        }
    }

    #[async_trait]
    impl QuoteProvider for FakeCarrier {
        fn name(&self) -> &str {
            &self.name
        }

        async fn quote(&self, _request: &ShipmentRequest) -> Result<CarrierQuote, ProviderError> {
            tokio::time::sleep(self.delay).await;
            match &self.outcome {
                Ok(fee_cents) => Ok(CarrierQuote {
                    service_id: self.name.clone(),
                    service_type_id: "standard".to_string(),
                    fee_cents: *fee_cents,
                }),
                Err(ProviderError::Timeout(msg)) => Err(ProviderError::Timeout(msg.clone())),
                Err(ProviderError::Rejected(msg)) => Err(ProviderError::Rejected(msg.clone())),
                Err(ProviderError::Transient(msg)) => Err(ProviderError::Transient(msg.clone())),
            }
        }
    }

    fn request() -> ShipmentRequest {
        ShipmentRequest {
            origin: "shop-hcm".to_string(),
            destination: "district-7".to_string(),
            parcels: vec![Dimensions {
                height: 40.0,
                width: 60.0,
                length: 120.0,
                weight: 8.0,
            }],
        }
    }

    fn shopper() -> RateShopper {
        RateShopper::new(RateShopConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn test_minimum_fee_wins() {
        let providers = vec![
            FakeCarrier::quoting("ghn", 3_000),
            FakeCarrier::quoting("viettel", 2_500),
            FakeCarrier::quoting("ahamove", 4_000),
        ];
        let outcome = shopper().cheapest(&request(), &providers).await.unwrap();
        assert_eq!(outcome.quote().unwrap().service_id, "viettel");
        assert_eq!(outcome.quote().unwrap().fee_cents, 2_500);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_failure_does_not_abort_others() {
        let providers = vec![
            FakeCarrier::failing("ghn"),
            FakeCarrier::quoting("viettel", 2_500),
            FakeCarrier::failing("ahamove"),
        ];
        let outcome = shopper().cheapest(&request(), &providers).await.unwrap();
        assert_eq!(outcome.quote().unwrap().service_id, "viettel");
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_failures_is_no_service_not_error() {
        let providers = vec![FakeCarrier::failing("ghn"), FakeCarrier::failing("viettel")];
        let outcome = shopper().cheapest(&request(), &providers).await.unwrap();
        assert_eq!(outcome, RateOutcome::NoServiceAvailable);
        assert!(outcome.quote().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_equal_fees_break_ties_by_declaration_order() {
        // "viettel" finishes first but "ghn" is listed first: ghn wins.
        let providers = vec![
            FakeCarrier::slow("ghn", 2_500, Duration::from_millis(50)),
            FakeCarrier::quoting("viettel", 2_500),
        ];
        let outcome = shopper().cheapest(&request(), &providers).await.unwrap();
        assert_eq!(outcome.quote().unwrap().service_id, "ghn");
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_fee_is_eligible_to_win() {
        let providers = vec![
            FakeCarrier::quoting("ghn", 1_000),
            FakeCarrier::quoting("promo", 0),
        ];
        let outcome = shopper().cheapest(&request(), &providers).await.unwrap();
        assert_eq!(outcome.quote().unwrap().fee_cents, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stragglers_past_deadline_are_discarded() {
        // The slow carrier would be cheaper but answers after the global
        // deadline; only the settled quote participates.
        let providers = vec![
            FakeCarrier::slow("snail", 100, Duration::from_secs(60)),
            FakeCarrier::quoting("ghn", 3_000),
        ];
        let outcome = shopper().cheapest(&request(), &providers).await.unwrap();
        assert_eq!(outcome.quote().unwrap().service_id, "ghn");
    }

    #[tokio::test(start_paused = true)]
    async fn test_everyone_past_deadline_is_no_service() {
        let providers = vec![
            FakeCarrier::slow("snail-a", 100, Duration::from_secs(60)),
            FakeCarrier::slow("snail-b", 200, Duration::from_secs(90)),
        ];
        let outcome = shopper().cheapest(&request(), &providers).await.unwrap();
        assert_eq!(outcome, RateOutcome::NoServiceAvailable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_providers_is_no_service() {
        let outcome = shopper().cheapest(&request(), &[]).await.unwrap();
        assert_eq!(outcome, RateOutcome::NoServiceAvailable);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_request_is_rejected_before_fanout() {
        let mut bad = request();
        bad.parcels.clear();
        let err = shopper()
            .cheapest(&bad, &[FakeCarrier::quoting("ghn", 1_000)])
            .await
            .unwrap_err();
        assert!(matches!(err, crate::error::RatesError::InvalidRequest(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_negative_fee_quote_is_discarded() {
        let providers = vec![
            FakeCarrier::quoting("broken", -500),
            FakeCarrier::quoting("ghn", 3_000),
        ];
        let outcome = shopper().cheapest(&request(), &providers).await.unwrap();
        assert_eq!(outcome.quote().unwrap().service_id, "ghn");
    }
}
