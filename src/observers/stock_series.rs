use crate::core::snapshot::{ShiftObserver, TickSnapshot};
use crate::core::types::{SimTime, StationId, Stock};

/// Resource-stock trajectory of every station, sampled once per tick.
/// Feeds stock-level charts; it does not render anything itself.
#[derive(Debug, Clone, Default)]
pub struct StockSeries {
    times: Vec<SimTime>,
    resource: [Vec<Stock>; StationId::COUNT],
}

impl StockSeries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn times(&self) -> &[SimTime] {
        &self.times
    }

    pub fn resource(&self, id: StationId) -> &[Stock] {
        &self.resource[id.index()]
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Lowest finite stock a station reached, `None` if it never held a finite count
    pub fn minimum(&self, id: StationId) -> Option<u32> {
        self.resource(id).iter().filter_map(|s| s.units()).min()
    }
}

impl ShiftObserver for StockSeries {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        self.times.push(snapshot.elapsed);
        for station in &snapshot.stations {
            self.resource[station.id.index()].push(station.resource_stock);
        }
    }
}
