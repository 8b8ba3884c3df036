//! # Cart Module
//!
//! Cart pricing: line aggregation, the global quantity cap, and order
//! totals.
//!
//! ## Ownership Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Caller-Owned Cart                                  │
//! │                                                                         │
//! │  The cart is an explicit value the caller owns — there is NO ambient   │
//! │  cart singleton in this engine. Every mutation takes `&mut Cart` and   │
//! │  either fully applies or leaves the cart untouched. Callers must       │
//! │  serialize concurrent edits to one cart themselves.                    │
//! │                                                                         │
//! │  UI selection ──► VariantIndex::resolve ──► Cart::add_line             │
//! │                                                  │                      │
//! │                              (checkout) RateShopper::cheapest          │
//! │                                                  │                      │
//! │                              Cart::total ──► Cart::into_order          │
//! │                                                  │                      │
//! │                              external order-submission client          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quantity Cap
//! The sum of all line quantities in one order may not exceed
//! [`MAX_ORDER_QUANTITY`](crate::MAX_ORDER_QUANTITY) (4). The call that
//! would exceed it fails without partial mutation.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::VariantIndex;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{CarrierQuote, Dimensions, LineItem, OrderDraft};
use crate::validation::{validate_price_cents, validate_quantity};
use crate::MAX_ORDER_QUANTITY;

// =============================================================================
// Line Details
// =============================================================================

/// Non-price facts about a line, supplied by the caller at add time.
///
/// Price and identity come from variant resolution; parcel dimensions,
/// install flag, and origin come from the product record the UI already
/// holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineDetails {
    pub unit_dimensions: Dimensions,
    pub install_required: bool,
    pub origin_location: String,
}

// =============================================================================
// Cart
// =============================================================================

/// An in-progress order: resolved variants at quantities.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cart {
    lines: Vec<LineItem>,
}

impl Cart {
    /// Creates an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// The current lines, in insertion order.
    pub fn lines(&self) -> &[LineItem] {
        &self.lines
    }

    /// Whether the cart holds no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of all line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Resolves `selection` against the index and adds the variant at
    /// `quantity`. Adding a variant already in the cart merges quantities.
    ///
    /// ## Errors
    /// - resolution errors pass through (`Validation`, `VariantNotFound`)
    /// - `QuantityExceeded` when the global cap would be breached
    ///
    /// Any error leaves the cart exactly as it was.
    pub fn add_line(
        &mut self,
        index: &VariantIndex,
        selection: &[(String, String)],
        quantity: i64,
        details: LineDetails,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;
        let entry = index.resolve(selection)?;
        validate_price_cents(entry.price_cents)?;

        self.check_capacity(quantity)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.variant_id == entry.variant_id)
        {
            line.quantity += quantity;
            return Ok(());
        }

        self.lines.push(LineItem {
            variant_id: entry.variant_id.clone(),
            unit_price_cents: entry.price_cents,
            quantity,
            unit_dimensions: details.unit_dimensions,
            install_required: details.install_required,
            origin_location: details.origin_location,
        });
        Ok(())
    }

    /// Sets the quantity of an existing line.
    ///
    /// The cap is checked against the other lines plus the new quantity,
    /// so lowering a line always succeeds and raising one fails atomically.
    pub fn set_quantity(&mut self, variant_id: &str, quantity: i64) -> CoreResult<()> {
        validate_quantity(quantity)?;

        let position = self
            .lines
            .iter()
            .position(|line| line.variant_id == variant_id)
            .ok_or_else(|| CoreError::LineNotFound(variant_id.to_string()))?;

        let others: i64 = self
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != position)
            .map(|(_, line)| line.quantity)
            .sum();
        if others + quantity > MAX_ORDER_QUANTITY {
            return Err(CoreError::QuantityExceeded {
                requested: quantity,
                remaining: MAX_ORDER_QUANTITY - others,
                max: MAX_ORDER_QUANTITY,
            });
        }

        self.lines[position].quantity = quantity;
        Ok(())
    }

    /// Removes a line, returning it.
    pub fn remove_line(&mut self, variant_id: &str) -> CoreResult<LineItem> {
        let position = self
            .lines
            .iter()
            .position(|line| line.variant_id == variant_id)
            .ok_or_else(|| CoreError::LineNotFound(variant_id.to_string()))?;
        Ok(self.lines.remove(position))
    }

    /// Whether this order carries a separately priced shipping leg.
    ///
    /// Orders with any install-required line bundle delivery into the
    /// installation service; an empty cart ships nothing.
    pub fn requires_shipping(&self) -> bool {
        !self.lines.is_empty() && !self.lines.iter().any(|line| line.install_required)
    }

    /// One parcel per ordered unit, for building a `ShipmentRequest`.
    pub fn parcels(&self) -> Vec<Dimensions> {
        self.lines
            .iter()
            .flat_map(|line| {
                std::iter::repeat(line.unit_dimensions).take(line.quantity as usize)
            })
            .collect()
    }

    /// Sum of `unit_price × quantity` over all lines.
    pub fn subtotal(&self) -> Money {
        self.lines
            .iter()
            .fold(Money::zero(), |acc, line| acc + line.line_total())
    }

    /// The order total: subtotal plus the carrier fee when the order ships.
    ///
    /// ## Shipping Leg Rules
    /// - shippable cart + quote: subtotal + fee
    /// - shippable cart + no quote: `NoShippingService` — "no shipping
    ///   option" must reach the caller as an order state, never as a
    ///   silently free total
    /// - install-bundled cart: subtotal only, any quote ignored
    ///
    /// Deterministic for a given line set and quote; never negative.
    pub fn total(&self, shipping: Option<&CarrierQuote>) -> CoreResult<Money> {
        let subtotal = self.subtotal();

        if !self.requires_shipping() {
            return Ok(subtotal);
        }

        match shipping {
            Some(quote) => {
                validate_price_cents(quote.fee_cents)?;
                Ok(subtotal + quote.fee())
            }
            None => Err(CoreError::NoShippingService),
        }
    }

    /// Consumes the cart into the order payload handed verbatim to the
    /// external order-submission client.
    pub fn into_order(self, shipping: Option<CarrierQuote>) -> CoreResult<OrderDraft> {
        let total = self.total(shipping.as_ref())?;
        let shipping_quote = if self.requires_shipping() {
            shipping
        } else {
            None
        };
        Ok(OrderDraft {
            lines: self.lines,
            shipping_quote,
            total_cents: total.cents(),
        })
    }

    /// Fails with `QuantityExceeded` if adding `quantity` would breach the
    /// global cap. Checked before any mutation.
    fn check_capacity(&self, quantity: i64) -> CoreResult<()> {
        let current = self.total_quantity();
        if current + quantity > MAX_ORDER_QUANTITY {
            return Err(CoreError::QuantityExceeded {
                requested: quantity,
                remaining: MAX_ORDER_QUANTITY - current,
                max: MAX_ORDER_QUANTITY,
            });
        }
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
