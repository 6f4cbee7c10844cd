use super::config::LineConfig;
use super::errors::ConfigError;
use super::sampler::{DurationSampler, SeededSampler};
use super::types::{SimTime, StationId, Stock};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Target buffer size per station, supplied before the shift starts
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimalStock(BTreeMap<StationId, u32>);

impl OptimalStock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a target, rejecting zero
    pub fn with(mut self, id: StationId, units: u32) -> Result<Self, ConfigError> {
        if units == 0 {
            return Err(ConfigError::NonPositiveOptimalStock(id));
        }
        self.0.insert(id, units);
        Ok(self)
    }

    pub fn get(&self, id: StationId) -> Option<u32> {
        self.0.get(&id).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StationId, u32)> + '_ {
        self.0.iter().map(|(id, units)| (*id, *units))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.0.iter().find(|(_, units)| **units == 0) {
            Some((id, _)) => Err(ConfigError::NonPositiveOptimalStock(*id)),
            None => Ok(()),
        }
    }
}

impl FromIterator<(StationId, u32)> for OptimalStock {
    fn from_iter<I: IntoIterator<Item = (StationId, u32)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Immutable configuration of a station for the duration of a shift
pub struct Station {
    pub id: StationId,
    sampler: Box<dyn DurationSampler>,
    pub lead_time: SimTime,
    /// Stations without a target never raise a card
    pub optimal_stock: Option<u32>,
}

impl Station {
    /// Create a station. The lead time is fixed now from one sample of
    /// the station's own sampler plus `lead_time_offset`.
    pub fn new(
        id: StationId,
        mut sampler: Box<dyn DurationSampler>,
        lead_time_offset: SimTime,
        optimal_stock: Option<u32>,
    ) -> Self {
        let lead_time = sampler.sample() + lead_time_offset;
        Self {
            id,
            sampler,
            lead_time,
            optimal_stock,
        }
    }

    pub fn successor(&self) -> Option<StationId> {
        self.id.successor()
    }

    /// Draw a fresh processing duration
    pub fn sample_processing_time(&mut self) -> SimTime {
        self.sampler.sample()
    }
}

impl std::fmt::Debug for Station {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Station")
            .field("id", &self.id)
            .field("lead_time", &self.lead_time)
            .field("optimal_stock", &self.optimal_stock)
            .finish_non_exhaustive()
    }
}

/// Mutable runtime state of a station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationState {
    /// Units available to consume
    pub resource_stock: Stock,
    /// Finished units awaiting transfer downstream
    pub produced_stock: u32,
    /// Replenishment requested
    pub kanban_card: bool,
    pub last_event_time: SimTime,
    /// Production events completed during the shift
    pub units_completed: u64,
    /// Whether the card was raised at any point during the shift
    pub card_ever_raised: bool,
}

impl StationState {
    pub fn new(resource_stock: Stock) -> Self {
        Self {
            resource_stock,
            produced_stock: 0,
            kanban_card: false,
            last_event_time: 0.0,
            units_completed: 0,
            card_ever_raised: false,
        }
    }

    pub fn raise_card(&mut self) {
        self.kanban_card = true;
        self.card_ever_raised = true;
    }
}

/// Seed of one station's sampler within a run seeded with `run_seed`.
///
/// Runs occupy disjoint blocks of `StationId::COUNT` seeds, so consecutive
/// run seeds never hand the same stream to two stations.
pub fn station_seed(run_seed: u64, id: StationId) -> u64 {
    run_seed
        .wrapping_mul(StationId::COUNT as u64)
        .wrapping_add(id.index() as u64)
}

/// Ordered chain of stations for one shift
#[derive(Debug)]
pub struct StationRegistry {
    stations: Vec<Station>,
}

impl StationRegistry {
    /// Build the registry from configuration, one seeded sampler per station
    pub fn from_config(
        config: &LineConfig,
        optimal_stock: &OptimalStock,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let stations = config
            .stations
            .iter()
            .map(|sc| {
                let seed = config.random_seed.map(|s| station_seed(s, sc.id));
                let sampler: Box<dyn DurationSampler> =
                    Box::new(SeededSampler::new(sc.processing_time, seed));
                Station::new(sc.id, sampler, config.lead_time_offset, optimal_stock.get(sc.id))
            })
            .collect();
        Ok(Self { stations })
    }

    /// Build the registry from explicit samplers given in line order
    pub fn with_samplers(
        samplers: [Box<dyn DurationSampler>; StationId::COUNT],
        lead_time_offset: SimTime,
        optimal_stock: &OptimalStock,
    ) -> Self {
        let stations = StationId::ALL
            .into_iter()
            .zip(samplers)
            .map(|(id, sampler)| Station::new(id, sampler, lead_time_offset, optimal_stock.get(id)))
            .collect();
        Self { stations }
    }

    pub fn get(&self, id: StationId) -> &Station {
        &self.stations[id.index()]
    }

    pub fn get_mut(&mut self, id: StationId) -> &mut Station {
        &mut self.stations[id.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    /// Lead time of every station, in line order
    pub fn lead_times(&self) -> BTreeMap<StationId, SimTime> {
        self.stations.iter().map(|s| (s.id, s.lead_time)).collect()
    }
}
