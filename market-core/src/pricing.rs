//! Price derivation from ledger state.
//!
//! Everything here is read-only with respect to the ledger. Prices are whole
//! coins with a hard floor of 1; the scarcity multiplier is the single factor
//! that makes markets feel different from each other.

use crate::catalog::ResourceCatalog;
use crate::ledger::MarketLedger;

// === CONSTANTS ===

/// Hard floor and ceiling on the scarcity multiplier, enforced regardless of
/// intermediate arithmetic.
pub const SCARCITY_MIN: f32 = 0.5;
pub const SCARCITY_MAX: f32 = 2.5;

/// Buying from a settlement always costs a 20% premium over the raw
/// scarcity-adjusted value.
const BUY_MARKUP: f32 = 1.2;

/// Cities pay relatively more for goods than villages.
const MAJOR_LOCATION_MULT: f32 = 0.9;
const MINOR_LOCATION_MULT: f32 = 0.8;

/// Trend-bucket thresholds for the human-readable summary.
const HIGH_DEMAND_THRESHOLD: f32 = 1.3;
const OVERSUPPLIED_THRESHOLD: f32 = 0.7;

// === SCARCITY ===

/// Core scarcity formula: low supply and high demand both push the
/// multiplier up.
///
/// `supply_factor = clamp(1.5 - supply/100, 0.5, 2.0)`, then
/// `clamp(supply_factor * demand, 0.5, 2.5)`.
fn scarcity_from(supply: u32, demand: f32) -> f32 {
    let supply_factor = (1.5 - supply as f32 / 100.0).clamp(0.5, 2.0);
    (supply_factor * demand).clamp(SCARCITY_MIN, SCARCITY_MAX)
}

/// Scarcity multiplier for a resource at a settlement. Neutral 1.0 when the
/// settlement has no ledger or the ledger has no entry for the id.
pub fn scarcity_multiplier(ledger: Option<&MarketLedger>, resource_id: &str) -> f32 {
    match ledger {
        Some(ledger) if ledger.tracks(resource_id) => {
            scarcity_from(ledger.supply(resource_id), ledger.demand(resource_id))
        }
        _ => 1.0,
    }
}

// === PRICES ===

/// Coin earned per unit when selling *to* this settlement.
pub fn sell_price(
    ledger: Option<&MarketLedger>,
    catalog: &ResourceCatalog,
    resource_id: &str,
    quality_multiplier: f32,
    is_major: bool,
) -> u32 {
    let location = if is_major {
        MAJOR_LOCATION_MULT
    } else {
        MINOR_LOCATION_MULT
    };
    let base = catalog.base_price(resource_id) as f32;
    let price = base * scarcity_multiplier(ledger, resource_id) * quality_multiplier * location;
    floor_one(price)
}

/// Coin cost per unit when buying *from* this settlement. No quality or
/// location factor; intentionally simpler than sell pricing.
pub fn buy_price(
    ledger: Option<&MarketLedger>,
    catalog: &ResourceCatalog,
    resource_id: &str,
) -> u32 {
    let base = catalog.base_price(resource_id) as f32;
    floor_one(base * scarcity_multiplier(ledger, resource_id) * BUY_MARKUP)
}

fn floor_one(price: f32) -> u32 {
    (price.round() as u32).max(1)
}

// === SUMMARY ===

/// One-line market report for tooltips and trade panels.
pub fn price_summary(
    ledger: Option<&MarketLedger>,
    catalog: &ResourceCatalog,
    resource_id: &str,
) -> String {
    let scarcity = scarcity_multiplier(ledger, resource_id);
    let trend = if scarcity > HIGH_DEMAND_THRESHOLD {
        "High demand!"
    } else if scarcity < OVERSUPPLIED_THRESHOLD {
        "Oversupplied"
    } else {
        "Normal"
    };
    let stock = ledger.map_or(0, |l| l.supply(resource_id));
    format!(
        "{resource_id}: base {}c | {trend} | buys for {}c | {stock} in stock",
        catalog.base_price(resource_id),
        buy_price(ledger, catalog, resource_id),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scarcity_bounds() {
        // Zero supply, maximal demand: capped at the ceiling.
        assert_eq!(scarcity_from(0, 2.0), SCARCITY_MAX);
        // Full stock, rock-bottom demand: pinned at the floor.
        assert_eq!(scarcity_from(200, 0.2), SCARCITY_MIN);
        // Seed-time signature demand below the drift band still floors.
        assert_eq!(scarcity_from(150, 0.2), SCARCITY_MIN);
    }

    #[test]
    fn test_scarcity_neutral_midpoint() {
        // supply 50 => factor 1.0; neutral demand stays neutral.
        assert_eq!(scarcity_from(50, 1.0), 1.0);
    }

    #[test]
    fn test_supply_factor_is_clamped_before_demand() {
        // Supply past the cap (possible transiently after a big sale) bottoms
        // the factor out at 0.5 rather than going negative.
        assert_eq!(scarcity_from(500, 1.0), 0.5);
        assert_eq!(scarcity_from(500, 2.0), 1.0);
    }

    #[test]
    fn test_untracked_id_is_neutral_even_with_a_ledger() {
        use rand::SeedableRng;
        use rand::rngs::StdRng;

        use crate::ledger::MarketLedger;
        use crate::types::{SettlementArchetype, SettlementView};

        let catalog = ResourceCatalog::standard();
        let mut rng = StdRng::seed_from_u64(3);
        let view = SettlementView::new(SettlementArchetype::Generic, false);
        let ledger = MarketLedger::seed(&catalog, &view, &mut rng);

        // Not in the catalog, so not in the ledger: neutral, never the 1.5
        // a zero-supply entry would produce.
        assert_eq!(scarcity_multiplier(Some(&ledger), "trinket_bell"), 1.0);
        // base 1 * 1.0 * 1.2 = 1.2 -> 1
        assert_eq!(buy_price(Some(&ledger), &catalog, "trinket_bell"), 1);
    }

    #[test]
    fn test_unregistered_settlement_is_neutral() {
        assert_eq!(scarcity_multiplier(None, "grain_wheat"), 1.0);

        let catalog = ResourceCatalog::standard();
        // base 2 * 1.0 * 1.2 = 2.4 -> 2
        assert_eq!(buy_price(None, &catalog, "grain_wheat"), 2);
        // base 2 * 1.0 * 1.0 * 0.8 = 1.6 -> 2
        assert_eq!(sell_price(None, &catalog, "grain_wheat", 1.0, false), 2);
    }

    #[test]
    fn test_price_floor_is_one() {
        let catalog = ResourceCatalog::standard();
        // Unknown id has base 1; scarcity-neutral sell at a village rounds
        // 1 * 0.8 = 0.8 down to the floor.
        assert_eq!(sell_price(None, &catalog, "trinket_bell", 0.1, false), 1);
        assert_eq!(buy_price(None, &catalog, "trinket_bell"), 1);
    }

    #[test]
    fn test_major_settlements_pay_more() {
        let catalog = ResourceCatalog::standard();
        let village = sell_price(None, &catalog, "ore_iron", 1.0, false);
        let city = sell_price(None, &catalog, "ore_iron", 1.0, true);
        assert!(city > village, "city {city} <= village {village}");
    }

    #[test]
    fn test_summary_trend_buckets() {
        let catalog = ResourceCatalog::standard();
        // No ledger: scarcity 1.0 => Normal bucket, zero stock shown.
        let line = price_summary(None, &catalog, "fish_cod");
        assert!(line.contains("Normal"), "{line}");
        assert!(line.contains("0 in stock"), "{line}");
        assert!(line.contains("base 3c"), "{line}");
    }

    #[test]
    fn test_trend_thresholds() {
        // Bucket edges: strictly greater / strictly less than the thresholds.
        assert!(scarcity_from(0, 2.0) > HIGH_DEMAND_THRESHOLD);
        assert!(scarcity_from(200, 0.3) < OVERSUPPLIED_THRESHOLD);
    }
}
