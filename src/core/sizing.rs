//! Starting-buffer sizing.
//!
//! The engine only consumes an [`OptimalStock`] map; this module offers a
//! Little's-law style estimate for callers that have no targets of their own.

use super::config::LineConfig;
use super::station::OptimalStock;
use super::types::{SimTime, StationId, Stock};
use std::collections::BTreeMap;

/// Target stock per station:
/// `demand_rate × lead_time + safety_factor × demand_rate × shift_duration`
/// with `demand_rate = 1 / mean processing time`. Truncated, never below 1.
/// Stations missing from `lead_times` get no target.
pub fn size_optimal_stock(
    config: &LineConfig,
    lead_times: &BTreeMap<StationId, SimTime>,
    safety_factor: f64,
) -> OptimalStock {
    config
        .stations
        .iter()
        .filter_map(|sc| {
            let lead_time = *lead_times.get(&sc.id)?;
            let demand_rate = 1.0 / sc.processing_time.mean();
            let safety_stock = safety_factor * demand_rate * config.shift_duration;
            let stock = demand_rate * lead_time + safety_stock;
            Some((sc.id, (stock as u32).max(1)))
        })
        .collect()
}

/// Seed every downstream station's starting stock from its target,
/// capped at the full threshold. The first station keeps its configured feed.
pub fn seed_initial_stock(config: LineConfig, optimal_stock: &OptimalStock) -> LineConfig {
    let full = config.full_threshold;
    optimal_stock
        .iter()
        .filter(|(id, _)| !id.is_first())
        .fold(config, |config, (id, units)| {
            config.with_initial_stock(id, Stock::Finite(units.min(full)))
        })
}
