use super::clock::{Clock, VirtualClock, WallClock};
use super::config::LineConfig;
use super::errors::SimError;
use super::line::Line;
use super::snapshot::{ShiftObserver, TickSnapshot};
use super::station::OptimalStock;
use super::types::{SimTime, StationId, Stock};
use log::{debug, info, warn};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Why a shift stopped before its full duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExhaustionCause {
    /// A station ran out of resource stock; the whole line stops
    StationStarved(StationId),
    /// Every station was out of resource stock at the same time
    LineExhausted,
}

/// Terminal state of a shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShiftOutcome {
    Completed,
    StoppedByExhaustion(ExhaustionCause),
}

impl fmt::Display for ShiftOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftOutcome::Completed => f.write_str("completed"),
            ShiftOutcome::StoppedByExhaustion(ExhaustionCause::StationStarved(id)) => {
                write!(f, "stopped: {} out of resource stock", id)
            }
            ShiftOutcome::StoppedByExhaustion(ExhaustionCause::LineExhausted) => {
                f.write_str("stopped: all stocks exhausted")
            }
        }
    }
}

/// Final state of one station
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationReport {
    pub id: StationId,
    pub produced_stock: u32,
    pub resource_stock: Stock,
    pub units_completed: u64,
    pub kanban_card: bool,
    pub card_ever_raised: bool,
}

/// Summary of a finished shift
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShiftReport {
    pub run_id: Uuid,
    pub outcome: ShiftOutcome,
    pub ticks: u64,
    pub elapsed: SimTime,
    pub stations: Vec<StationReport>,
}

impl ShiftReport {
    pub fn is_completed(&self) -> bool {
        self.outcome == ShiftOutcome::Completed
    }

    pub fn station(&self, id: StationId) -> &StationReport {
        &self.stations[id.index()]
    }

    /// Stations that raised their card at least once
    pub fn cards_ever_raised(&self) -> Vec<StationId> {
        self.stations
            .iter()
            .filter(|s| s.card_ever_raised)
            .map(|s| s.id)
            .collect()
    }
}

/// Drives the tick loop of one shift.
///
/// Each tick processes every station in line order at the same instant,
/// publishes a snapshot, then advances the clock. The loop stops when the
/// shift duration is reached, a station starves, or every station is out
/// of resource stock.
pub struct ShiftRunner<C: Clock = VirtualClock> {
    run_id: Uuid,
    line: Line,
    clock: C,
    shift_duration: SimTime,
    ticks: u64,
    outcome: Option<ShiftOutcome>,
}

impl ShiftRunner<VirtualClock> {
    /// Runner on a virtual clock stepping by the configured tick interval
    pub fn virtual_time(line: Line, config: &LineConfig) -> Self {
        Self::new(line, config, VirtualClock::new(config.tick_interval))
    }
}

impl<C: Clock> ShiftRunner<C> {
    pub fn new(line: Line, config: &LineConfig, clock: C) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            line,
            clock,
            shift_duration: config.shift_duration,
            ticks: 0,
            outcome: None,
        }
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Terminal state, once reached
    pub fn outcome(&self) -> Option<ShiftOutcome> {
        self.outcome
    }

    /// Process every station once, in line order, and advance the clock.
    /// Returns `None` without touching the line once the shift has stopped.
    pub fn tick(&mut self) -> Option<TickSnapshot> {
        if self.outcome.is_some() {
            return None;
        }
        Some(self.step())
    }

    fn step(&mut self) -> TickSnapshot {
        let now = self.clock.now();
        for id in StationId::ALL {
            self.line.process(id, now);
        }
        self.ticks += 1;
        let snapshot = TickSnapshot::capture(&self.line, self.ticks, now);
        self.clock.advance();
        self.outcome = self.termination();
        snapshot
    }

    fn termination(&self) -> Option<ShiftOutcome> {
        if let Some(id) = self.line.starved() {
            let cause = ExhaustionCause::StationStarved(id);
            return Some(ShiftOutcome::StoppedByExhaustion(cause));
        }
        if self.line.all_exhausted() {
            return Some(ShiftOutcome::StoppedByExhaustion(ExhaustionCause::LineExhausted));
        }
        if self.clock.now() >= self.shift_duration {
            return Some(ShiftOutcome::Completed);
        }
        None
    }

    /// Run ticks until a terminal state, publishing every snapshot
    pub fn run(&mut self, observers: &mut [&mut dyn ShiftObserver]) -> ShiftReport {
        info!("Shift {} started (duration {:.0})", self.run_id, self.shift_duration);
        for observer in observers.iter_mut() {
            observer.on_shift_start(&self.run_id);
        }

        let outcome = loop {
            if let Some(outcome) = self.outcome {
                break outcome;
            }
            let snapshot = self.step();
            debug!(
                "tick {} at t={:.1}: cards {:?}",
                snapshot.tick,
                snapshot.elapsed,
                snapshot.active_cards()
            );
            for observer in observers.iter_mut() {
                observer.on_tick(&snapshot);
            }
        };

        match outcome {
            ShiftOutcome::Completed => {
                info!("Shift {} {} after {} ticks", self.run_id, outcome, self.ticks)
            }
            ShiftOutcome::StoppedByExhaustion(_) => {
                warn!("Shift {} {} at t={:.1}", self.run_id, outcome, self.clock.now())
            }
        }

        let report = self.report(outcome);
        for observer in observers.iter_mut() {
            observer.on_shift_end(&report);
        }
        report
    }

    fn report(&self, outcome: ShiftOutcome) -> ShiftReport {
        let stations = StationId::ALL
            .iter()
            .map(|id| {
                let state = self.line.state(*id);
                StationReport {
                    id: *id,
                    produced_stock: state.produced_stock,
                    resource_stock: state.resource_stock,
                    units_completed: state.units_completed,
                    kanban_card: state.kanban_card,
                    card_ever_raised: state.card_ever_raised,
                }
            })
            .collect();
        ShiftReport {
            run_id: self.run_id,
            outcome,
            ticks: self.ticks,
            elapsed: self.clock.now(),
            stations,
        }
    }
}

/// Build a line from `config` and run one shift.
///
/// Uses a wall clock when `config.pacing` is set, a virtual clock otherwise.
pub fn simulate_shift(
    config: &LineConfig,
    optimal_stock: &OptimalStock,
    observers: &mut [&mut dyn ShiftObserver],
) -> Result<ShiftReport, SimError> {
    let line = Line::new(config, optimal_stock)?;
    let report = match config.pacing {
        Some(pace) => ShiftRunner::new(line, config, WallClock::new(pace)).run(observers),
        None => ShiftRunner::virtual_time(line, config).run(observers),
    };
    Ok(report)
}
