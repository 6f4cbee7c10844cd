use crate::core::shift_runner::ShiftReport;
use crate::core::snapshot::{ShiftObserver, TickSnapshot};
use log::info;

/// Human-readable status through the `log` facade: one line per
/// `every` ticks and a final summary.
#[derive(Debug, Clone)]
pub struct ConsoleReporter {
    every: u64,
}

impl ConsoleReporter {
    pub fn new(every: u64) -> Self {
        Self { every: every.max(1) }
    }

    pub fn status_line(snapshot: &TickSnapshot) -> String {
        let stations: Vec<String> = snapshot
            .stations
            .iter()
            .map(|s| format!("{} {}:{}", s.id, s.produced_stock, s.resource_stock))
            .collect();
        format!(
            "{} | t={:.1} | kanban {:?}",
            stations.join(" | "),
            snapshot.elapsed,
            snapshot.active_cards()
        )
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl ShiftObserver for ConsoleReporter {
    fn on_tick(&mut self, snapshot: &TickSnapshot) {
        if snapshot.tick % self.every == 0 {
            info!("{}", Self::status_line(snapshot));
        }
    }

    fn on_shift_end(&mut self, report: &ShiftReport) {
        info!(
            "Simulation {} after {} ticks (t={:.1})",
            report.outcome, report.ticks, report.elapsed
        );
        for station in &report.stations {
            info!(
                "  {:<9} produced {:>4} | resource {:>4} | completed {:>5} | card {}",
                station.id.label(),
                station.produced_stock,
                station.resource_stock.to_string(),
                station.units_completed,
                if station.kanban_card { "raised" } else { "clear" }
            );
        }
        info!("Kanban cards triggered: {:?}", report.cards_ever_raised());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::StationSnapshot;
    use crate::core::types::{StationId, Stock};

    #[test]
    fn test_status_line() {
        let snapshot = TickSnapshot {
            tick: 1,
            elapsed: 4.0,
            stations: StationId::ALL.map(|id| StationSnapshot {
                id,
                produced_stock: 1,
                resource_stock: if id.is_first() { Stock::Unbounded } else { Stock::Finite(9) },
                kanban_card: id == StationId::Bonding,
            }),
        };

        assert_eq!(
            ConsoleReporter::status_line(&snapshot),
            "cutting 1:inf | folding 1:9 | bonding 1:9 | labeling 1:9 | t=4.0 | kanban [Bonding]"
        );
    }
}
