use super::line::Line;
use super::types::{SimTime, StationId, Stock};
use serde::Serialize;

/// Per-station part of a tick snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationSnapshot {
    pub id: StationId,
    pub produced_stock: u32,
    pub resource_stock: Stock,
    pub kanban_card: bool,
}

/// Line state after one tick, in line order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickSnapshot {
    pub tick: u64,
    pub elapsed: SimTime,
    pub stations: [StationSnapshot; StationId::COUNT],
}

impl TickSnapshot {
    pub fn capture(line: &Line, tick: u64, elapsed: SimTime) -> Self {
        let stations = StationId::ALL.map(|id| {
            let state = line.state(id);
            StationSnapshot {
                id,
                produced_stock: state.produced_stock,
                resource_stock: state.resource_stock,
                kanban_card: state.kanban_card,
            }
        });
        Self { tick, elapsed, stations }
    }

    pub fn station(&self, id: StationId) -> &StationSnapshot {
        &self.stations[id.index()]
    }

    /// Stations whose card is currently raised
    pub fn active_cards(&self) -> Vec<StationId> {
        self.stations
            .iter()
            .filter(|s| s.kanban_card)
            .map(|s| s.id)
            .collect()
    }
}

/// Subscriber to the per-tick snapshot stream. Observers cannot influence
/// the simulation.
pub trait ShiftObserver {
    fn on_shift_start(&mut self, _run_id: &uuid::Uuid) {}

    fn on_tick(&mut self, snapshot: &TickSnapshot);

    fn on_shift_end(&mut self, _report: &super::shift_runner::ShiftReport) {}
}
