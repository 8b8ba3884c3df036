//! # atrium-core: Pure Pricing Logic for Atrium
//!
//! This crate is the **heart** of the Atrium storefront. It contains the
//! three computations where getting the logic wrong silently corrupts
//! money, shipping commitments, or entitlement dates — everything around
//! them is rendering and API glue, and lives outside this workspace.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Atrium Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile Storefront (TypeScript)                  │   │
//! │  │   Config UI ──► Cart UI ──► Checkout UI ──► Account UI          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ts-rs typed boundary                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atrium-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌────────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │entitlement│  │ validation │  │   │
//! │  │   │ Variant-  │  │   Cart    │  │ proration │  │   rules    │  │   │
//! │  │   │  Index    │  │ LineItem  │  │  upgrade  │  │   checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            atrium-rates (concurrent rate shopping)              │   │
//! │  │      carrier provider fan-out, cheapest-quote selection         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (attributes, variants, carts, tiers, quotes)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//! - [`catalog`] - Attribute catalog + variant resolution
//! - [`cart`] - Cart pricing and the global quantity cap
//! - [`entitlement`] - Subscription tier proration
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, clock and file system access are FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Caller-Owned State**: The cart is an explicit value; no ambient singletons
//!
//! ## Example Usage
//!
//! ```rust
//! use atrium_core::catalog::{AttributeCatalog, VariantIndex};
//! use atrium_core::types::{Attribute, AttributeValue, VariantPriceEntry};
//!
//! let catalog = AttributeCatalog::new(vec![Attribute {
//!     id: "finish".into(),
//!     name: "Finish".into(),
//!     values: vec![
//!         AttributeValue { id: "oak".into(), name: "Oak".into() },
//!         AttributeValue { id: "walnut".into(), name: "Walnut".into() },
//!     ],
//! }]).unwrap();
//!
//! let index = VariantIndex::build(catalog, vec![
//!     VariantPriceEntry {
//!         variant_id: "v-1".into(),
//!         selection: vec![("finish".into(), "oak".into())],
//!         price_cents: 99_900,
//!     },
//!     VariantPriceEntry {
//!         variant_id: "v-2".into(),
//!         selection: vec![("finish".into(), "walnut".into())],
//!         price_cents: 119_900,
//!     },
//! ]).unwrap();
//!
//! let entry = index
//!     .resolve(&[("finish".into(), "walnut".into())])
//!     .unwrap();
//! assert_eq!(entry.price().cents(), 119_900);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod entitlement;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atrium_core::Money` instead of
// `use atrium_core::money::Money`

pub use cart::{Cart, LineDetails};
pub use catalog::{AttributeCatalog, VariantIndex};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum total quantity across all lines of one order.
///
/// ## Business Reason
/// Large configurable items ship on dedicated runs; the storefront caps
/// every order at four units total, however they are split across lines.
/// The cap is global (sum over lines), not per line.
pub const MAX_ORDER_QUANTITY: i64 = 4;
