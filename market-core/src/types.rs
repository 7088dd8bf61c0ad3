use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

// ============================================================================
// IDs - Using slotmap for generational indices
// ============================================================================

new_key_type! {
    pub struct SettlementId;
}

// ============================================================================
// Resource families - What a resource id classifies as
// ============================================================================

/// Broad resource categories, derived from the id prefix.
///
/// Resource ids follow a `family_subtype` convention (`grain_wheat`,
/// `ore_iron`, ...). Ids without a recognized prefix belong to no family and
/// never trigger producer/consumer seeding rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceFamily {
    Grain,
    Timber,
    Stone,
    Fish,
    Ore,
    Meat,
}

impl ResourceFamily {
    /// Classify a resource id by its prefix. `timber_` and `wood_` are
    /// aliases for the same family.
    pub fn of(resource_id: &str) -> Option<ResourceFamily> {
        const PREFIXES: &[(&str, ResourceFamily)] = &[
            ("grain_", ResourceFamily::Grain),
            ("timber_", ResourceFamily::Timber),
            ("wood_", ResourceFamily::Timber),
            ("stone_", ResourceFamily::Stone),
            ("fish_", ResourceFamily::Fish),
            ("ore_", ResourceFamily::Ore),
            ("meat_", ResourceFamily::Meat),
        ];
        PREFIXES
            .iter()
            .find(|(prefix, _)| resource_id.starts_with(prefix))
            .map(|(_, family)| *family)
    }
}

// ============================================================================
// Settlement archetypes - Production specialties
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SettlementArchetype {
    Agricultural,
    Lumber,
    Mining,
    Fishing,
    Pastoral,
    Trading,
    Generic,
}

impl SettlementArchetype {
    /// Whether settlements of this archetype over-produce the given family.
    /// Mining covers both ore and quarried stone.
    pub fn produces(&self, family: ResourceFamily) -> bool {
        use ResourceFamily::*;
        use SettlementArchetype::*;
        matches!(
            (self, family),
            (Agricultural, Grain)
                | (Lumber, Timber)
                | (Mining, Ore)
                | (Mining, Stone)
                | (Fishing, Fish)
                | (Pastoral, Meat)
        )
    }
}

// ============================================================================
// Settlement view - What the world layer tells us at registration
// ============================================================================

/// Read-once snapshot of a settlement's market-relevant attributes, supplied
/// by the settlement entity when it registers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettlementView {
    pub archetype: SettlementArchetype,
    pub is_major: bool,
    /// The specific resource this settlement is best known for, e.g. a
    /// wheat-country town carrying `grain_wheat`.
    pub signature_resource: Option<String>,
}

impl SettlementView {
    pub fn new(archetype: SettlementArchetype, is_major: bool) -> Self {
        Self {
            archetype,
            is_major,
            signature_resource: None,
        }
    }

    pub fn with_signature(mut self, resource_id: impl Into<String>) -> Self {
        self.signature_resource = Some(resource_id.into());
        self
    }
}
