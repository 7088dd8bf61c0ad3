//! The owning simulation core: settlement table, shared rng, regeneration
//! clock, and the transaction surface the trading layer calls into.

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use slotmap::SlotMap;

use crate::catalog::ResourceCatalog;
use crate::clock::RegenClock;
use crate::ledger::MarketLedger;
use crate::pricing;
use crate::types::{SettlementArchetype, SettlementId, SettlementView};

/// What a successful purchase hands back to the caller. Turning this into a
/// concrete inventory item is the trading layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub resource_id: String,
    pub quantity: u32,
    pub unit_price: u32,
}

impl Purchase {
    pub fn total_cost(&self) -> u32 {
        self.unit_price * self.quantity
    }
}

/// A registered settlement's market: its ledger plus the two attributes of
/// the settlement view that pricing and regeneration keep reading.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct SettlementMarket {
    archetype: SettlementArchetype,
    is_major: bool,
    ledger: MarketLedger,
}

/// The market simulation core. One instance per world; drives every
/// settlement's ledger from a single seeded rng and a single regeneration
/// cadence.
#[derive(Debug, Clone)]
pub struct MarketSim {
    catalog: ResourceCatalog,
    settlements: SlotMap<SettlementId, SettlementMarket>,
    clock: RegenClock,
    rng: StdRng,
}

impl MarketSim {
    /// A settlement id is only ever handed out by [`register`], so holding an
    /// id proves the ledger exists; double registration is unrepresentable.
    ///
    /// [`register`]: MarketSim::register
    pub fn new(catalog: ResourceCatalog, seed: u64) -> Self {
        Self {
            catalog,
            settlements: SlotMap::with_key(),
            clock: RegenClock::default(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    // === Registration and lifecycle ===

    /// Register a settlement, seeding its ledger from the view. Returns the
    /// id the world layer stores on the settlement entity.
    pub fn register(&mut self, view: &SettlementView) -> SettlementId {
        let ledger = MarketLedger::seed(&self.catalog, view, &mut self.rng);
        let id = self.settlements.insert(SettlementMarket {
            archetype: view.archetype,
            is_major: view.is_major,
            ledger,
        });
        tracing::debug!(
            settlement = ?id,
            archetype = ?view.archetype,
            is_major = view.is_major,
            "registered settlement market"
        );
        id
    }

    pub fn is_registered(&self, id: SettlementId) -> bool {
        self.settlements.contains_key(id)
    }

    pub fn ledger(&self, id: SettlementId) -> Option<&MarketLedger> {
        self.settlements.get(id).map(|market| &market.ledger)
    }

    /// World reset: drop every ledger. Registrations start over.
    pub fn reset(&mut self) {
        self.settlements.clear();
    }

    // === Regeneration ===

    /// Per-frame driver. Regenerates every ledger when the interval has
    /// elapsed; returns whether the pass ran.
    pub fn tick(&mut self, now: Duration) -> bool {
        if !self.clock.due(now) {
            return false;
        }
        for (_, market) in self.settlements.iter_mut() {
            market.ledger.regenerate(market.archetype, &mut self.rng);
        }
        tracing::debug!(
            settlements = self.settlements.len(),
            now_secs = now.as_secs(),
            "market regeneration pass"
        );
        true
    }

    // === Price queries ===

    /// Scarcity for a resource at a settlement; neutral 1.0 for stale ids.
    pub fn scarcity_multiplier(&self, id: SettlementId, resource_id: &str) -> f32 {
        pricing::scarcity_multiplier(self.ledger(id), resource_id)
    }

    /// Per-unit coin earned selling to this settlement, given the item's
    /// quality multiplier.
    pub fn sell_price(&self, id: SettlementId, resource_id: &str, quality_multiplier: f32) -> u32 {
        let is_major = self
            .settlements
            .get(id)
            .is_some_and(|market| market.is_major);
        pricing::sell_price(
            self.ledger(id),
            &self.catalog,
            resource_id,
            quality_multiplier,
            is_major,
        )
    }

    /// Per-unit coin cost buying from this settlement.
    pub fn buy_price(&self, id: SettlementId, resource_id: &str) -> u32 {
        pricing::buy_price(self.ledger(id), &self.catalog, resource_id)
    }

    /// Units on hand; 0 for stale ids.
    pub fn supply_level(&self, id: SettlementId, resource_id: &str) -> u32 {
        self.ledger(id).map_or(0, |ledger| ledger.supply(resource_id))
    }

    /// One-line market report for the trade UI.
    pub fn price_summary(&self, id: SettlementId, resource_id: &str) -> String {
        pricing::price_summary(self.ledger(id), &self.catalog, resource_id)
    }

    /// Resource ids with stock on hand. Falls back to the whole catalog when
    /// nothing is stocked, so a never-visited settlement still shows goods.
    pub fn available_resources(&self, id: SettlementId) -> Vec<String> {
        let stocked: Vec<String> = self
            .ledger(id)
            .map(|ledger| ledger.in_stock().map(str::to_string).collect())
            .unwrap_or_default();
        if stocked.is_empty() {
            self.catalog.ids().map(str::to_string).collect()
        } else {
            stocked
        }
    }

    // === Transactions ===

    /// Sell goods to a settlement. Transfers `min(offered, stack_available)`
    /// units into the ledger and returns coin earned; 0 and no mutation when
    /// the settlement is unregistered or the quantity is nil. The caller
    /// removes the units from the source stack itself.
    pub fn sell(
        &mut self,
        id: SettlementId,
        resource_id: &str,
        offered_quantity: u32,
        stack_available: u32,
        quality_multiplier: f32,
    ) -> u32 {
        let quantity = offered_quantity.min(stack_available);
        if quantity == 0 || !self.is_registered(id) {
            return 0;
        }
        let unit_price = self.sell_price(id, resource_id, quality_multiplier);
        if let Some(market) = self.settlements.get_mut(id) {
            market.ledger.add_supply(resource_id, quantity);
        }
        tracing::trace!(
            settlement = ?id,
            resource = resource_id,
            quantity,
            unit_price,
            "sold to settlement"
        );
        unit_price.saturating_mul(quantity)
    }

    pub fn can_buy(&self, id: SettlementId, resource_id: &str, quantity: u32) -> bool {
        self.supply_level(id, resource_id) >= quantity
    }

    /// Buy goods from a settlement. All-or-nothing: `None` (and no ledger
    /// mutation) when stock or funds fall short.
    pub fn buy(
        &mut self,
        id: SettlementId,
        resource_id: &str,
        quantity: u32,
        buyer_funds: u32,
    ) -> Option<Purchase> {
        if !self.can_buy(id, resource_id, quantity) {
            return None;
        }
        let unit_price = self.buy_price(id, resource_id);
        if u64::from(unit_price) * u64::from(quantity) > u64::from(buyer_funds) {
            return None;
        }
        let market = self.settlements.get_mut(id)?;
        if !market.ledger.take_supply(resource_id, quantity) {
            return None;
        }
        tracing::trace!(
            settlement = ?id,
            resource = resource_id,
            quantity,
            unit_price,
            "bought from settlement"
        );
        Some(Purchase {
            resource_id: resource_id.to_string(),
            quantity,
            unit_price,
        })
    }
}
