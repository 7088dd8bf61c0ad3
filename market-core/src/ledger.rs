//! Per-settlement supply and demand state.
//!
//! A [`MarketLedger`] holds one `(supply, demand)` pair for every resource in
//! the catalog. It is seeded once at registration from the settlement's
//! archetype and drifts afterwards through the periodic regeneration pass and
//! through trades.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::catalog::ResourceCatalog;
use crate::types::{ResourceFamily, SettlementArchetype, SettlementView};

// === CONSTANTS ===

/// Upper bound regeneration enforces on supply. A sale may push supply past
/// this transiently; the next regeneration pass pulls it back.
pub const SUPPLY_CAP: u32 = 200;

/// Bounds demand drifts within after seeding.
pub const DEMAND_MIN: f32 = 0.3;
pub const DEMAND_MAX: f32 = 2.0;

/// Seeded demand for a settlement's signature resource. Deliberately below
/// [`DEMAND_MIN`]: the strongest-producer case starts outside the drift band
/// and the first regeneration pass clamps it back in.
pub const SIGNATURE_DEMAND: f32 = 0.2;

/// Supply multiplier applied when a producer's resource is also its signature.
const SIGNATURE_SUPPLY_BONUS: f32 = 1.5;

/// Major settlements (cities) carry more stock and more demand.
const MAJOR_SUPPLY_MULT: f32 = 1.5;
const MAJOR_DEMAND_MULT: f32 = 1.3;

/// Randomized starting supply bands, per archetype role for the resource.
fn producer_supply_band(family: ResourceFamily) -> (u32, u32) {
    match family {
        ResourceFamily::Grain => (120, 250),
        ResourceFamily::Fish => (100, 220),
        ResourceFamily::Timber => (100, 200),
        ResourceFamily::Stone => (80, 180),
        ResourceFamily::Ore => (80, 160),
        ResourceFamily::Meat => (90, 180),
    }
}

// === LEDGER ===

/// Supply quantities and demand levels for one settlement.
///
/// Uses ordered maps so iteration (and therefore the rng draw sequence during
/// regeneration) is reproducible from a single seed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketLedger {
    supply: BTreeMap<String, u32>,
    demand: BTreeMap<String, f32>,
}

impl MarketLedger {
    /// Seed a fresh ledger for a settlement.
    ///
    /// Per resource, rules apply in a fixed order where later rules override
    /// earlier ones: baseline, producer band, signature bonus, consumer band,
    /// major-city multiplier, and finally the Trading-archetype flat override.
    pub fn seed<R: Rng>(catalog: &ResourceCatalog, view: &SettlementView, rng: &mut R) -> Self {
        let mut supply = BTreeMap::new();
        let mut demand = BTreeMap::new();

        for id in catalog.ids() {
            let (s, d) = seed_entry(id, view, rng);
            supply.insert(id.to_string(), s);
            demand.insert(id.to_string(), d);
        }

        Self { supply, demand }
    }

    /// Units currently available, 0 for ids the ledger never saw.
    pub fn supply(&self, resource_id: &str) -> u32 {
        self.supply.get(resource_id).copied().unwrap_or(0)
    }

    /// Demand level, neutral 1.0 for ids the ledger never saw.
    pub fn demand(&self, resource_id: &str) -> f32 {
        self.demand.get(resource_id).copied().unwrap_or(1.0)
    }

    /// Whether this ledger carries an entry for the id. False for
    /// display-only strings that were never in the catalog.
    pub fn tracks(&self, resource_id: &str) -> bool {
        self.supply.contains_key(resource_id)
    }

    /// Resource ids with any stock on hand.
    pub fn in_stock(&self) -> impl Iterator<Item = &str> {
        self.supply
            .iter()
            .filter(|(_, qty)| **qty > 0)
            .map(|(id, _)| id.as_str())
    }

    /// Record goods sold *to* this settlement. Supply grows past
    /// [`SUPPLY_CAP`] here; only regeneration enforces the cap.
    pub fn add_supply(&mut self, resource_id: &str, quantity: u32) {
        *self.supply.entry(resource_id.to_string()).or_insert(0) += quantity;
    }

    /// Remove goods bought *from* this settlement. Returns false (no change)
    /// when stock is insufficient.
    pub fn take_supply(&mut self, resource_id: &str, quantity: u32) -> bool {
        match self.supply.get_mut(resource_id) {
            Some(stock) if *stock >= quantity => {
                *stock -= quantity;
                true
            }
            _ => false,
        }
    }

    /// One regeneration pass: supply trickles back (faster for the
    /// settlement's own produce) and demand drifts within its band.
    pub fn regenerate<R: Rng>(&mut self, archetype: SettlementArchetype, rng: &mut R) {
        for (id, stock) in self.supply.iter_mut() {
            let mut regen = 1 + rng.random_range(0..=3u32);
            if ResourceFamily::of(id).is_some_and(|family| archetype.produces(family)) {
                regen *= 4;
            }
            *stock = (*stock + regen).min(SUPPLY_CAP);
        }
        for level in self.demand.values_mut() {
            *level = (*level + rng.random_range(-0.05..0.05f32)).clamp(DEMAND_MIN, DEMAND_MAX);
        }
    }
}

/// Seed one `(supply, demand)` pair. See [`MarketLedger::seed`] for the
/// override ordering contract.
fn seed_entry<R: Rng>(resource_id: &str, view: &SettlementView, rng: &mut R) -> (u32, f32) {
    let mut supply = 30 + rng.random_range(0..30u32);
    let mut demand = 1.0f32;

    if let Some(family) = ResourceFamily::of(resource_id) {
        if view.archetype.produces(family) {
            let (lo, hi) = producer_supply_band(family);
            supply = rng.random_range(lo..hi);
            demand = 0.3 + rng.random_range(0.0..0.1f32);

            if view.signature_resource.as_deref() == Some(resource_id) {
                supply = (supply as f32 * SIGNATURE_SUPPLY_BONUS).round() as u32;
                demand = SIGNATURE_DEMAND;
            }
        } else {
            // Staples, construction goods, and ore the settlement cannot make
            // itself: scarce and wanted.
            supply = 5 + rng.random_range(0..30u32);
            demand = 1.3 + rng.random_range(0.0..0.7f32);
        }
    }

    if view.is_major {
        supply = (supply as f32 * MAJOR_SUPPLY_MULT).round() as u32;
        demand = (demand * MAJOR_DEMAND_MULT).min(DEMAND_MAX);
    }

    // Trading towns hold balanced stock of everything; this overrides every
    // rule above, including the major-city multiplier.
    if view.archetype == SettlementArchetype::Trading {
        supply = 60 + rng.random_range(0..40u32);
        demand = 1.0;
    }

    (supply.min(SUPPLY_CAP), demand)
}
