//! # atrium-rates: Carrier Rate Shopping for Atrium
//!
//! This crate provides the shipping rate-shopping layer for the Atrium
//! storefront: it asks every integrated carrier for a quote at once and
//! hands checkout the cheapest viable one.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Rate Shopping Architecture                          │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      RateShopper (shopper.rs)                    │  │
//! │  │                                                                  │  │
//! │  │  Validates the request, spawns one Tokio task per provider,      │  │
//! │  │  joins until all settle or the global deadline, picks the        │  │
//! │  │  minimum fee (first listed wins ties)                            │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ QuoteProvider  │  │ QuoteProvider  │  │  QuoteProvider         │    │
//! │  │ (carrier A)    │  │ (carrier B)    │  │  (carrier C)           │    │
//! │  │                │  │                │  │                        │    │
//! │  │ HTTP client &  │  │ each may fail  │  │ failures are logged    │    │
//! │  │ credentials    │  │ independently  │  │ and swallowed here     │    │
//! │  │ live outside   │  │                │  │                        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  OUTCOME: RateOutcome::Quote(cheapest) or ::NoServiceAvailable —       │
//! │  "no shipping option" is a normal order state, not an error banner.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`shopper`] - `RateShopper` fan-out/fan-in and quote selection
//! - [`provider`] - `QuoteProvider` trait, one impl per carrier
//! - [`config`] - `RateShopConfig` (global deadline)
//! - [`error`] - Rate shopping error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atrium_rates::{RateOutcome, RateShopConfig, RateShopper};
//!
//! let shopper = RateShopper::new(RateShopConfig::default());
//! match shopper.cheapest(&request, &providers).await? {
//!     RateOutcome::Quote(quote) => checkout_with(quote),
//!     RateOutcome::NoServiceAvailable => show_no_shipping_state(),
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod provider;
pub mod shopper;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{RateShopConfig, DEFAULT_SHOP_TIMEOUT_SECS};
pub use error::{ProviderError, RatesError, RatesResult};
pub use provider::QuoteProvider;
pub use shopper::{RateOutcome, RateShopper};
