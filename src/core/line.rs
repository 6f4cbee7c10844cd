use super::config::LineConfig;
use super::errors::ConfigError;
use super::kanban::{push_transfer, should_raise_card, Transfer};
use super::station::{OptimalStock, StationRegistry, StationState};
use super::types::{SimTime, StationId};
use log::{debug, warn};

/// What happened at one station during one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessOutcome {
    pub produced: bool,
    pub starved: bool,
    pub transfer: Option<Transfer>,
    pub card_raised: bool,
}

/// Simulation context for one shift: station registry, runtime state and
/// the line-wide stop flag. Owned by the shift runner.
#[derive(Debug)]
pub struct Line {
    registry: StationRegistry,
    states: Vec<StationState>,
    full_threshold: u32,
    trigger_ratio: f64,
    /// Set on the first starvation, never reset during a shift
    starved: Option<StationId>,
}

impl Line {
    pub fn new(config: &LineConfig, optimal_stock: &OptimalStock) -> Result<Self, ConfigError> {
        optimal_stock.validate()?;
        let registry = StationRegistry::from_config(config, optimal_stock)?;
        Ok(Self::with_registry(registry, config))
    }

    /// Assemble a line from a prebuilt registry; starting stocks and
    /// thresholds come from `config`
    pub fn with_registry(registry: StationRegistry, config: &LineConfig) -> Self {
        let states = StationId::ALL
            .iter()
            .map(|id| {
                let stock = config
                    .station(*id)
                    .map(|sc| sc.initial_resource_stock)
                    .unwrap_or_default();
                StationState::new(stock)
            })
            .collect();
        Self {
            registry,
            states,
            full_threshold: config.full_threshold,
            trigger_ratio: config.kanban_trigger_ratio,
            starved: None,
        }
    }

    /// Advance one station by one tick at time `now`.
    ///
    /// Order: production attempt, push transfer to the successor, card
    /// trigger. A station with no resource stock flags the whole line as
    /// starved and skips production; transfer and trigger still run.
    pub fn process(&mut self, id: StationId, now: SimTime) -> ProcessOutcome {
        let mut outcome = ProcessOutcome::default();
        let idx = id.index();

        let elapsed = now - self.states[idx].last_event_time;
        if self.states[idx].resource_stock.is_exhausted() {
            warn!("{}: resource out of stock at t={:.1}", id, now);
            self.starved.get_or_insert(id);
            outcome.starved = true;
        } else {
            let required = self.registry.get_mut(id).sample_processing_time();
            if elapsed >= required {
                let state = &mut self.states[idx];
                if state.resource_stock.take_one() {
                    state.produced_stock += 1;
                    state.units_completed += 1;
                    state.last_event_time = now;
                    outcome.produced = true;
                }
            }
        }

        if let Some(next) = id.successor() {
            let (upstream, downstream) = self.states.split_at_mut(next.index());
            outcome.transfer =
                push_transfer(&mut upstream[idx], &mut downstream[0], self.full_threshold);
            if let Some(transfer) = outcome.transfer.filter(|t| t.units > 0) {
                debug!(
                    "{} -> {}: {} units{}",
                    id,
                    next,
                    transfer.units,
                    if transfer.request_cleared { ", request cleared" } else { "" }
                );
            }
        }

        if let Some(optimal) = self.registry.get(id).optimal_stock {
            let state = &mut self.states[idx];
            if should_raise_card(state.resource_stock, optimal, self.trigger_ratio) {
                if !state.kanban_card {
                    debug!("{}: kanban card raised at t={:.1}", id, now);
                }
                state.raise_card();
                outcome.card_raised = true;
            }
        }

        outcome
    }

    pub fn state(&self, id: StationId) -> &StationState {
        &self.states[id.index()]
    }

    pub fn state_mut(&mut self, id: StationId) -> &mut StationState {
        &mut self.states[id.index()]
    }

    /// First station observed without resource stock, if any
    pub fn starved(&self) -> Option<StationId> {
        self.starved
    }

    /// Every station is out of resource stock at once
    pub fn all_exhausted(&self) -> bool {
        self.states.iter().all(|s| s.resource_stock.is_exhausted())
    }
}
