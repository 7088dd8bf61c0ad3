//! Market simulation core for the settlement trading game.
//!
//! Tracks per-settlement resource supply and demand, derives buy/sell prices
//! from that state, and mutates the state as trades happen. Driven entirely
//! by the game's per-frame update loop: register settlements once, feed
//! [`MarketSim::tick`] the elapsed time every frame, and query or trade at
//! will. All randomness flows from one injected seed, so whole worlds replay
//! deterministically.
//!
//! ```
//! use std::time::Duration;
//! use market_core::{MarketSim, ResourceCatalog, SettlementArchetype, SettlementView};
//!
//! let mut sim = MarketSim::new(ResourceCatalog::standard(), 42);
//! let town = sim.register(
//!     &SettlementView::new(SettlementArchetype::Agricultural, false)
//!         .with_signature("grain_wheat"),
//! );
//!
//! // Grain country: wheat is cheap here.
//! assert!(sim.scarcity_multiplier(town, "grain_wheat") < 1.0);
//!
//! sim.tick(Duration::from_secs(60)); // supply trickles back, demand drifts
//! ```

mod catalog;
mod clock;
mod ledger;
mod pricing;
mod sim;
mod types;

pub use catalog::{ResourceCatalog, ResourceDefinition, UNKNOWN_BASE_PRICE};
pub use clock::{REGEN_INTERVAL, RegenClock};
pub use ledger::{DEMAND_MAX, DEMAND_MIN, MarketLedger, SIGNATURE_DEMAND, SUPPLY_CAP};
pub use pricing::{
    SCARCITY_MAX, SCARCITY_MIN, buy_price, price_summary, scarcity_multiplier, sell_price,
};
pub use sim::{MarketSim, Purchase};
pub use types::{ResourceFamily, SettlementArchetype, SettlementId, SettlementView};
