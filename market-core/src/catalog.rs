//! Resource catalog: the immutable table of known resources and base prices.
//!
//! Built once at startup and handed to the simulation by ownership. Lookups
//! never fail; unknown ids fall back to a base price of 1 because callers may
//! query ids that exist only as display strings.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Fallback base price for ids the catalog has never heard of.
pub const UNKNOWN_BASE_PRICE: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDefinition {
    pub id: String,
    /// Coin value of one unit before any scarcity or quality adjustment.
    /// Always positive.
    pub base_price: u32,
}

impl ResourceDefinition {
    pub fn new(id: impl Into<String>, base_price: u32) -> Self {
        debug_assert!(base_price > 0, "base prices are positive by contract");
        Self {
            id: id.into(),
            base_price,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCatalog {
    definitions: Vec<ResourceDefinition>,
    by_id: HashMap<String, u32>,
}

impl ResourceCatalog {
    pub fn new(definitions: Vec<ResourceDefinition>) -> Self {
        let by_id = definitions
            .iter()
            .map(|def| (def.id.clone(), def.base_price))
            .collect();
        Self { definitions, by_id }
    }

    /// The game's stock resource table. Tests and default worlds use this;
    /// a modded world can pass its own definitions to [`ResourceCatalog::new`].
    pub fn standard() -> Self {
        Self::new(vec![
            ResourceDefinition::new("grain_wheat", 2),
            ResourceDefinition::new("grain_barley", 2),
            ResourceDefinition::new("timber_oak", 4),
            ResourceDefinition::new("timber_pine", 3),
            ResourceDefinition::new("stone_granite", 5),
            ResourceDefinition::new("stone_limestone", 4),
            ResourceDefinition::new("fish_cod", 3),
            ResourceDefinition::new("fish_herring", 2),
            ResourceDefinition::new("ore_iron", 8),
            ResourceDefinition::new("ore_copper", 6),
            ResourceDefinition::new("meat_beef", 6),
            ResourceDefinition::new("meat_mutton", 5),
        ])
    }

    /// Base price, or [`UNKNOWN_BASE_PRICE`] for ids not in the catalog.
    pub fn base_price(&self, resource_id: &str) -> u32 {
        self.by_id
            .get(resource_id)
            .copied()
            .unwrap_or(UNKNOWN_BASE_PRICE)
    }

    pub fn contains(&self, resource_id: &str) -> bool {
        self.by_id.contains_key(resource_id)
    }

    /// All catalog ids, in definition order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.definitions.iter().map(|def| def.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_price_lookup() {
        let catalog = ResourceCatalog::new(vec![
            ResourceDefinition::new("grain_wheat", 2),
            ResourceDefinition::new("ore_iron", 8),
        ]);

        assert_eq!(catalog.base_price("grain_wheat"), 2);
        assert_eq!(catalog.base_price("ore_iron"), 8);
    }

    #[test]
    fn test_unknown_id_falls_back_to_one() {
        let catalog = ResourceCatalog::standard();
        assert_eq!(catalog.base_price("mystery_box"), UNKNOWN_BASE_PRICE);
        assert!(!catalog.contains("mystery_box"));
    }

    #[test]
    fn test_standard_catalog_covers_every_family() {
        use crate::types::ResourceFamily;

        let catalog = ResourceCatalog::standard();
        assert!(!catalog.is_empty());

        for family in [
            ResourceFamily::Grain,
            ResourceFamily::Timber,
            ResourceFamily::Stone,
            ResourceFamily::Fish,
            ResourceFamily::Ore,
            ResourceFamily::Meat,
        ] {
            assert!(
                catalog.ids().any(|id| ResourceFamily::of(id) == Some(family)),
                "no standard resource for {family:?}"
            );
        }
    }
}
