//! # Domain Types
//!
//! Core domain types used throughout the Atrium pricing engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Attribute     │   │ VariantPrice-   │   │    LineItem     │       │
//! │  │  ─────────────  │   │ Entry           │   │  ─────────────  │       │
//! │  │  id             │   │  ─────────────  │   │  variant_id     │       │
//! │  │  name           │   │  variant_id     │   │  quantity       │       │
//! │  │  values[]       │   │  selection[]    │   │  unit_dimensions│       │
//! │  └─────────────────┘   │  price_cents    │   │  install_req.   │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │ ShipmentRequest │   │  CarrierQuote   │   │ SubscriptionTier│       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  origin         │   │  service_id     │   │  name           │       │
//! │  │  destination    │   │  service_type_id│   │  weight         │       │
//! │  │  parcels[]      │   │  fee_cents      │   │  monthly_price  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Conventions
//! Attribute, value, variant, and carrier-service ids are opaque strings
//! minted by the external catalog and carrier services. This crate never
//! generates ids; it only matches on them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Attribute Catalog Types
// =============================================================================

/// One allowed value of a configurable attribute (e.g. color "Walnut").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AttributeValue {
    /// Opaque value id from the catalog service.
    pub id: String,

    /// Display name shown in the configuration UI.
    pub name: String,
}

/// A configurable attribute of a product family (e.g. "Finish", "Width").
///
/// Values are unique per attribute; their declaration order is only used
/// for the default-selection policy (first value wins), never for matching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Attribute {
    /// Opaque attribute id from the catalog service.
    pub id: String,

    /// Display name shown in the configuration UI.
    pub name: String,

    /// Allowed values, in catalog declaration order.
    pub values: Vec<AttributeValue>,
}

/// One priced, orderable variant: a full attribute selection plus a price.
///
/// The catalog service supplies these as a flat list; `VariantIndex::build`
/// verifies the list is complete and non-ambiguous before any lookup runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct VariantPriceEntry {
    /// Opaque variant id from the catalog service.
    pub variant_id: String,

    /// Exactly one `(attribute id, value id)` pair per known attribute.
    /// Pair order is irrelevant; selections compare as sets.
    pub selection: Vec<(String, String)>,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,
}

impl VariantPriceEntry {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Shipping Types
// =============================================================================

/// Physical dimensions of one parcel.
///
/// Weight may be zero: "not volumetrically significant", not an error.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
    pub length: f64,
    /// Weight, or zero when the carrier should ignore it.
    pub weight: f64,
}

/// A request for carrier quotes: where from, where to, what boxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ShipmentRequest {
    /// Origin location (warehouse/shop id or address string).
    pub origin: String,

    /// Destination location.
    pub destination: String,

    /// Parcels to quote. Must be non-empty.
    pub parcels: Vec<Dimensions>,
}

/// One carrier service quote.
///
/// Ephemeral: produced per rate-shopping call, attached to at most one
/// order draft, never persisted by this engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CarrierQuote {
    /// Carrier service id (e.g. a carrier account binding).
    pub service_id: String,

    /// Service type within the carrier (standard, express, ...).
    pub service_type_id: String,

    /// Quoted fee in cents. Zero is valid (free shipping) and can win.
    pub fee_cents: i64,
}

impl CarrierQuote {
    /// Returns the fee as Money.
    #[inline]
    pub fn fee(&self) -> Money {
        Money::from_cents(self.fee_cents)
    }
}

// =============================================================================
// Cart Types
// =============================================================================

/// One line of a cart: a resolved variant at a quantity.
///
/// Created by `Cart::add_line`, mutated only by quantity change, destroyed
/// on removal or successful order submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// The resolved variant this line prices.
    pub variant_id: String,

    /// Unit price in cents, snapshotted from the variant at add time.
    pub unit_price_cents: i64,

    /// Quantity ordered (always positive).
    pub quantity: i64,

    /// Per-unit parcel dimensions, used to build shipment requests.
    pub unit_dimensions: Dimensions,

    /// Whether this line requires on-site installation. An order with any
    /// install-required line bundles delivery into the service fee and
    /// carries no separate shipping leg.
    pub install_required: bool,

    /// Where this item ships from.
    pub origin_location: String,
}

impl LineItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns unit price × quantity as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// The computed order payload handed verbatim to the external
/// order-submission API client after `Cart::total` succeeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderDraft {
    pub lines: Vec<LineItem>,

    /// The winning carrier quote, or None for install-bundled orders.
    pub shipping_quote: Option<CarrierQuote>,

    /// Order total in cents, lines plus shipping.
    pub total_cents: i64,
}

// =============================================================================
// Subscription Types
// =============================================================================

/// A time-bound service tier granting feature access.
///
/// Tiers are totally ordered by `weight`; weight encodes relative value
/// (e.g. Bronze=1.0, Silver=1.75, Gold=2.5) and drives proration when
/// unused time is converted across tiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscriptionTier {
    pub name: String,

    /// Relative value weight. Always positive.
    pub weight: f64,

    /// Monthly price in cents.
    pub monthly_price_cents: i64,
}

impl SubscriptionTier {
    /// Returns the monthly price as Money.
    #[inline]
    pub fn monthly_price(&self) -> Money {
        Money::from_cents(self.monthly_price_cents)
    }
}

/// A customer's current entitlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubscriptionState {
    pub tier: SubscriptionTier,

    /// When the entitlement lapses. `None` means no entitlement was ever
    /// granted; a past date means it lapsed naturally (read-time check,
    /// not an active mutation).
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl SubscriptionState {
    /// Whether the entitlement is active at `now`.
    ///
    /// Callers must capture `now` once per logical operation so a check
    /// and a subsequent upgrade see the same instant.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        match self.expires_at {
            Some(expires_at) => now < expires_at,
            None => false,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn tier(name: &str, weight: f64) -> SubscriptionTier {
        SubscriptionTier {
            name: name.to_string(),
            weight,
            monthly_price_cents: 9900,
        }
    }

    #[test]
    fn test_line_total() {
        let line = LineItem {
            variant_id: "v-1".to_string(),
            unit_price_cents: 10_000,
            quantity: 2,
            unit_dimensions: Dimensions {
                height: 10.0,
                width: 20.0,
                length: 30.0,
                weight: 1.5,
            },
            install_required: false,
            origin_location: "shop-hcm".to_string(),
        };
        assert_eq!(line.line_total().cents(), 20_000);
    }

    #[test]
    fn test_subscription_active_window() {
        let now = Utc.with_ymd_and_hms(2025, 1, 15, 0, 0, 0).unwrap();
        let future = Utc.with_ymd_and_hms(2025, 2, 1, 0, 0, 0).unwrap();

        let active = SubscriptionState {
            tier: tier("Bronze", 1.0),
            expires_at: Some(future),
        };
        assert!(active.is_active(now));

        let lapsed = SubscriptionState {
            tier: tier("Bronze", 1.0),
            expires_at: Some(now),
        };
        // Expiry instant itself counts as lapsed (now >= expires_at).
        assert!(!lapsed.is_active(now));

        let never = SubscriptionState {
            tier: tier("Bronze", 1.0),
            expires_at: None,
        };
        assert!(!never.is_active(now));
    }

    #[test]
    fn test_variant_entry_price_accessor() {
        let entry = VariantPriceEntry {
            variant_id: "v-42".to_string(),
            selection: vec![("finish".to_string(), "oak".to_string())],
            price_cents: 129_900,
        };
        assert_eq!(entry.price().cents(), 129_900);
    }
}
