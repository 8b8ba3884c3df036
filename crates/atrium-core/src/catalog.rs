//! # Catalog Module
//!
//! Variant resolution: mapping a user's per-attribute configuration
//! choices to exactly one priced, orderable variant.
//!
//! ## Load Once, Look Up Forever
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Variant Resolution                                 │
//! │                                                                         │
//! │  Catalog service payload (already decoded)                             │
//! │    attributes: [ Finish {oak, walnut}, Width {140, 160} ]              │
//! │    variants:   [ (v1, {oak,140}, $999), (v2, {oak,160}, $1099), ... ]  │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  VariantIndex::build ← validates ONCE at load time                     │
//! │    ├── every entry: one known value per known attribute                │
//! │    ├── non-ambiguous: no two entries share a selection                 │
//! │    └── complete: every combination priced                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  resolve({Finish: oak, Width: 160}) ──► v2, $1099   (pure lookup)      │
//! │                                                                         │
//! │  The engine DETECTS catalog violations, it never repairs them.         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation happens once at load time, never per lookup: a lookup on a
//! built index is an exact-match table probe with no payload re-checking.

use std::collections::{HashMap, HashSet};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::{Attribute, VariantPriceEntry};

// =============================================================================
// Attribute Catalog
// =============================================================================

/// The configurable attributes of one product family.
///
/// Immutable once constructed; `new` rejects structurally broken payloads
/// (duplicate attribute ids, duplicate value ids within an attribute,
/// attributes with no values).
#[derive(Debug, Clone)]
pub struct AttributeCatalog {
    attributes: Vec<Attribute>,
}

impl AttributeCatalog {
    /// Builds a catalog from the decoded service payload.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self, ValidationError> {
        let mut seen_attrs = HashSet::new();
        for attribute in &attributes {
            if !seen_attrs.insert(attribute.id.as_str()) {
                return Err(ValidationError::DuplicateAttribute {
                    attribute_id: attribute.id.clone(),
                });
            }

            if attribute.values.is_empty() {
                return Err(ValidationError::Required {
                    field: format!("values of attribute {}", attribute.id),
                });
            }

            let mut seen_values = HashSet::new();
            for value in &attribute.values {
                if !seen_values.insert(value.id.as_str()) {
                    return Err(ValidationError::DuplicateValue {
                        attribute_id: attribute.id.clone(),
                        value_id: value.id.clone(),
                    });
                }
            }
        }

        Ok(AttributeCatalog { attributes })
    }

    /// The attributes in catalog declaration order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Number of representable attribute combinations.
    fn combination_count(&self) -> usize {
        self.attributes
            .iter()
            .map(|attribute| attribute.values.len())
            .product()
    }
}

// =============================================================================
// Variant Index
// =============================================================================

/// Exact-match lookup table from a complete attribute selection to its
/// priced variant.
///
/// Built once from the catalog plus the flat variant/price list; all
/// catalog invariants are checked in `build`, so `resolve` is a pure
/// table probe.
#[derive(Debug, Clone)]
pub struct VariantIndex {
    catalog: AttributeCatalog,
    entries: Vec<VariantPriceEntry>,
    /// Canonical (sorted by attribute id) selection -> index into `entries`.
    by_selection: HashMap<Vec<(String, String)>, usize>,
}

impl VariantIndex {
    /// Builds the index, validating the variant table against the catalog.
    ///
    /// ## Rejected Payloads
    /// - an entry naming an unknown attribute or value
    /// - an entry missing an attribute, or naming one twice
    /// - two entries sharing one selection (`AmbiguousVariant`)
    /// - fewer entries than representable combinations (`IncompleteCatalog`)
    pub fn build(
        catalog: AttributeCatalog,
        entries: Vec<VariantPriceEntry>,
    ) -> Result<Self, ValidationError> {
        let expected = catalog.combination_count();
        if entries.len() != expected {
            return Err(ValidationError::IncompleteCatalog {
                expected,
                found: entries.len(),
            });
        }

        let mut by_selection = HashMap::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let key = canonical_selection(&catalog, &entry.selection)?;
            if let Some(&previous) = by_selection.get(&key) {
                let first: &VariantPriceEntry = &entries[previous];
                return Err(ValidationError::AmbiguousVariant {
                    first: first.variant_id.clone(),
                    second: entry.variant_id.clone(),
                });
            }
            by_selection.insert(key, index);
        }

        Ok(VariantIndex {
            catalog,
            entries,
            by_selection,
        })
    }

    /// The catalog this index was built over.
    pub fn catalog(&self) -> &AttributeCatalog {
        &self.catalog
    }

    /// Resolves a complete selection to its unique priced variant.
    ///
    /// ## Contract
    /// - `selection` holds exactly one `(attribute id, value id)` pair per
    ///   catalog attribute, in any order
    /// - errors: `Validation` for incomplete/unknown/duplicate selections,
    ///   `VariantNotFound` for a complete selection with no entry
    ///
    /// On an index that passed `build`, `VariantNotFound` cannot occur;
    /// it is still surfaced so callers holding an index built with checks
    /// relaxed upstream see catalog gaps instead of a panic.
    pub fn resolve(&self, selection: &[(String, String)]) -> CoreResult<&VariantPriceEntry> {
        let key = canonical_selection(&self.catalog, selection)?;
        let index = self
            .by_selection
            .get(&key)
            .copied()
            .ok_or(CoreError::VariantNotFound)?;
        Ok(&self.entries[index])
    }

    /// An arbitrary complete default selection: the first value of every
    /// attribute, in declaration order.
    ///
    /// Used when the configuration UI first opens. On a valid catalog this
    /// always resolves; see [`Self::resolve_default`].
    pub fn default_selection(&self) -> Vec<(String, String)> {
        self.catalog
            .attributes
            .iter()
            .map(|attribute| (attribute.id.clone(), attribute.values[0].id.clone()))
            .collect()
    }

    /// Resolves the default selection. Failure here means the catalog is
    /// invalid and must be rejected upstream.
    pub fn resolve_default(&self) -> CoreResult<&VariantPriceEntry> {
        let selection = self.default_selection();
        self.resolve(&selection)
    }
}

/// Normalizes a selection into its canonical key: validated pairs sorted
/// by attribute id.
///
/// Shared by `build` and `resolve` so both sides of the table agree on
/// what "the same selection" means.
fn canonical_selection(
    catalog: &AttributeCatalog,
    selection: &[(String, String)],
) -> Result<Vec<(String, String)>, ValidationError> {
    let mut chosen: HashMap<&str, &str> = HashMap::with_capacity(selection.len());

    for (attribute_id, value_id) in selection {
        let attribute = catalog
            .attributes
            .iter()
            .find(|attribute| attribute.id == *attribute_id)
            .ok_or_else(|| ValidationError::UnknownAttribute {
                attribute_id: attribute_id.clone(),
            })?;

        if !attribute.values.iter().any(|value| value.id == *value_id) {
            return Err(ValidationError::UnknownValue {
                attribute_id: attribute_id.clone(),
                value_id: value_id.clone(),
            });
        }

        if chosen.insert(attribute_id.as_str(), value_id.as_str()).is_some() {
            return Err(ValidationError::DuplicateAttribute {
                attribute_id: attribute_id.clone(),
            });
        }
    }

    // Completeness: every catalog attribute must be chosen.
    for attribute in &catalog.attributes {
        if !chosen.contains_key(attribute.id.as_str()) {
            return Err(ValidationError::MissingAttribute {
                attribute_id: attribute.id.clone(),
            });
        }
    }

    let mut key: Vec<(String, String)> = chosen
        .into_iter()
        .map(|(attribute_id, value_id)| (attribute_id.to_string(), value_id.to_string()))
        .collect();
    key.sort();
    Ok(key)
}

// =============================================================================
// Unit Tests
// =============================================================================
