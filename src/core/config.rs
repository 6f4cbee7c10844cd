use super::errors::ConfigError;
use super::types::{SimTime, StationId, Stock};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Processing-time distribution of a station
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProcessingTime {
    /// Bounded uniform duration in `[min, max]`
    Uniform { min: SimTime, max: SimTime },
    /// Constant duration
    Fixed(SimTime),
}

impl ProcessingTime {
    pub fn mean(&self) -> SimTime {
        match *self {
            ProcessingTime::Uniform { min, max } => (min + max) / 2.0,
            ProcessingTime::Fixed(value) => value,
        }
    }

    fn validate(&self, station: StationId) -> Result<(), ConfigError> {
        let reason = match *self {
            ProcessingTime::Uniform { min, max } if !min.is_finite() || !max.is_finite() => {
                Some("bounds must be finite".to_string())
            }
            ProcessingTime::Uniform { min, .. } if min <= 0.0 => {
                Some(format!("minimum {} must be positive", min))
            }
            ProcessingTime::Uniform { min, max } if min > max => {
                Some(format!("minimum {} exceeds maximum {}", min, max))
            }
            ProcessingTime::Fixed(value) if !value.is_finite() || value <= 0.0 => {
                Some(format!("fixed duration {} must be positive and finite", value))
            }
            _ => None,
        };
        match reason {
            Some(reason) => Err(ConfigError::ProcessingTime { station, reason }),
            None => Ok(()),
        }
    }
}

/// Static configuration of one station
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationConfig {
    pub id: StationId,
    pub processing_time: ProcessingTime,
    /// Resource stock at shift start
    pub initial_resource_stock: Stock,
}

impl StationConfig {
    pub fn new(id: StationId, processing_time: ProcessingTime) -> Self {
        let initial_resource_stock = if id.is_first() {
            Stock::Unbounded
        } else {
            Stock::Finite(0)
        };
        Self {
            id,
            processing_time,
            initial_resource_stock,
        }
    }
}

/// Configuration of the whole line for one shift
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineConfig {
    /// Stations in line order
    pub stations: Vec<StationConfig>,
    /// Capacity of a station's resource buffer
    pub full_threshold: u32,
    /// Fraction of optimal stock at or below which a card is raised
    pub kanban_trigger_ratio: f64,
    pub shift_duration: SimTime,
    /// Virtual time added per tick
    pub tick_interval: SimTime,
    /// Added to one processing sample to form a station's lead time
    pub lead_time_offset: SimTime,
    pub random_seed: Option<u64>,
    /// Wall-clock wait between ticks when running against a real clock
    pub pacing: Option<Duration>,
}

impl Default for LineConfig {
    fn default() -> Self {
        let processing = [
            (StationId::Cutting, ProcessingTime::Uniform { min: 100.0, max: 115.0 }),
            (StationId::Folding, ProcessingTime::Uniform { min: 38.0, max: 45.0 }),
            (StationId::Bonding, ProcessingTime::Uniform { min: 20.0, max: 25.0 }),
            (StationId::Labeling, ProcessingTime::Uniform { min: 5.0, max: 10.0 }),
        ];
        Self {
            stations: processing
                .into_iter()
                .map(|(id, pt)| StationConfig::new(id, pt))
                .collect(),
            full_threshold: 100,
            kanban_trigger_ratio: 0.6,
            shift_duration: 8.0 * 60.0 * 60.0,
            tick_interval: 1.0,
            lead_time_offset: 1.0,
            random_seed: None,
            pacing: None,
        }
    }
}

impl LineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The reference plant: default processing times with cutting fed
    /// from a 25-unit buffer instead of an unbounded supply
    pub fn reference() -> Self {
        Self::default().with_initial_stock(StationId::Cutting, Stock::Finite(25))
    }

    pub fn station(&self, id: StationId) -> Option<&StationConfig> {
        self.stations.iter().find(|s| s.id == id)
    }

    pub fn with_processing_time(mut self, id: StationId, processing_time: ProcessingTime) -> Self {
        if let Some(station) = self.stations.iter_mut().find(|s| s.id == id) {
            station.processing_time = processing_time;
        }
        self
    }

    /// Use the same processing time at every station
    pub fn with_uniform_processing(mut self, processing_time: ProcessingTime) -> Self {
        for station in &mut self.stations {
            station.processing_time = processing_time;
        }
        self
    }

    pub fn with_initial_stock(mut self, id: StationId, stock: Stock) -> Self {
        if let Some(station) = self.stations.iter_mut().find(|s| s.id == id) {
            station.initial_resource_stock = stock;
        }
        self
    }

    pub fn with_full_threshold(mut self, full: u32) -> Self {
        self.full_threshold = full;
        self
    }

    pub fn with_trigger_ratio(mut self, ratio: f64) -> Self {
        self.kanban_trigger_ratio = ratio;
        self
    }

    pub fn with_shift_duration(mut self, duration: SimTime) -> Self {
        self.shift_duration = duration;
        self
    }

    pub fn with_tick_interval(mut self, interval: SimTime) -> Self {
        self.tick_interval = interval;
        self
    }

    pub fn with_random_seed(mut self, seed: Option<u64>) -> Self {
        self.random_seed = seed;
        self
    }

    pub fn with_pacing(mut self, pacing: Option<Duration>) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ids: Vec<StationId> = self.stations.iter().map(|s| s.id).collect();
        if ids != StationId::ALL {
            return Err(ConfigError::StationOrder(ids));
        }

        if self.full_threshold == 0 {
            return Err(ConfigError::InvalidParameter(
                "full threshold must be greater than 0".to_string(),
            ));
        }

        if !(self.kanban_trigger_ratio > 0.0 && self.kanban_trigger_ratio <= 1.0) {
            return Err(ConfigError::InvalidParameter(format!(
                "kanban trigger ratio {} must be in (0, 1]",
                self.kanban_trigger_ratio
            )));
        }

        if !self.shift_duration.is_finite() || self.shift_duration <= 0.0 {
            return Err(ConfigError::InvalidParameter(
                "shift duration must be positive".to_string(),
            ));
        }

        if !self.tick_interval.is_finite() || self.tick_interval <= 0.0 {
            return Err(ConfigError::InvalidParameter(
                "tick interval must be positive".to_string(),
            ));
        }

        if !self.lead_time_offset.is_finite() || self.lead_time_offset < 0.0 {
            return Err(ConfigError::InvalidParameter(
                "lead time offset must be non-negative".to_string(),
            ));
        }

        for station in &self.stations {
            station.processing_time.validate(station.id)?;
            match station.initial_resource_stock {
                Stock::Unbounded if !station.id.is_first() => {
                    return Err(ConfigError::UnboundedDownstream(station.id));
                }
                Stock::Finite(stock) if stock > self.full_threshold => {
                    return Err(ConfigError::StockAboveCapacity {
                        station: station.id,
                        stock,
                        full: self.full_threshold,
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }
}

/// Enumeration of supported concurrency modes for batch runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConcurrencyMode {
    /// Replications run one after another on the calling thread
    #[default]
    Sequential,
    /// Replications are spread over a Rayon thread pool
    Rayon,
}

/// Configuration for a batch of independent shift replications
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationConfig {
    pub runs: usize,
    pub concurrency_mode: ConcurrencyMode,
    /// Only relevant when `concurrency_mode` is `Rayon`
    pub thread_pool_size: Option<usize>,
    /// Replication `i` is seeded with `seed_base + i`
    pub seed_base: u64,
}

impl Default for ReplicationConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            concurrency_mode: ConcurrencyMode::default(),
            thread_pool_size: None,
            seed_base: 0,
        }
    }
}

impl ReplicationConfig {
    pub fn new(runs: usize) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    pub fn with_concurrency(mut self, mode: ConcurrencyMode) -> Self {
        self.concurrency_mode = mode;
        self
    }

    pub fn with_thread_pool_size(mut self, size: usize) -> Self {
        self.thread_pool_size = Some(size);
        self
    }

    pub fn with_seed_base(mut self, seed_base: u64) -> Self {
        self.seed_base = seed_base;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.runs == 0 {
            return Err(ConfigError::InvalidParameter(
                "replication count must be greater than 0".to_string(),
            ));
        }
        if self.thread_pool_size == Some(0) {
            return Err(ConfigError::InvalidParameter(
                "thread pool size must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LineConfig::default();
        assert_eq!(config.full_threshold, 100);
        assert_eq!(config.kanban_trigger_ratio, 0.6);
        assert_eq!(config.shift_duration, 28_800.0);
        assert_eq!(config.tick_interval, 1.0);
        assert_eq!(config.stations.len(), StationId::COUNT);
        assert_eq!(
            config.station(StationId::Cutting).map(|s| s.initial_resource_stock),
            Some(Stock::Unbounded)
        );
        assert_eq!(
            config.station(StationId::Labeling).map(|s| s.initial_resource_stock),
            Some(Stock::Finite(0))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_reference_config_pins_cutting_buffer() {
        let config = LineConfig::reference();
        assert_eq!(
            config.station(StationId::Cutting).map(|s| s.initial_resource_stock),
            Some(Stock::Finite(25))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LineConfig::new()
            .with_uniform_processing(ProcessingTime::Fixed(10.0))
            .with_initial_stock(StationId::Folding, Stock::Finite(20))
            .with_full_threshold(50)
            .with_shift_duration(600.0)
            .with_random_seed(Some(42));

        assert_eq!(config.full_threshold, 50);
        assert_eq!(config.shift_duration, 600.0);
        assert_eq!(config.random_seed, Some(42));
        assert!(config
            .stations
            .iter()
            .all(|s| s.processing_time == ProcessingTime::Fixed(10.0)));
        assert_eq!(
            config.station(StationId::Folding).map(|s| s.initial_resource_stock),
            Some(Stock::Finite(20))
        );
    }

    #[test]
    fn test_validation() {
        let config = LineConfig::default().with_shift_duration(0.0);
        assert!(config.validate().is_err());

        let config = LineConfig::default().with_trigger_ratio(1.5);
        assert!(config.validate().is_err());

        let config = LineConfig::default().with_processing_time(
            StationId::Bonding,
            ProcessingTime::Uniform { min: 25.0, max: 20.0 },
        );
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProcessingTime { station: StationId::Bonding, .. })
        ));

        let config = LineConfig::default().with_initial_stock(StationId::Folding, Stock::Unbounded);
        assert_eq!(
            config.validate(),
            Err(ConfigError::UnboundedDownstream(StationId::Folding))
        );

        let config =
            LineConfig::default().with_initial_stock(StationId::Bonding, Stock::Finite(101));
        assert_eq!(
            config.validate(),
            Err(ConfigError::StockAboveCapacity {
                station: StationId::Bonding,
                stock: 101,
                full: 100,
            })
        );

        let mut config = LineConfig::default();
        config.stations.swap(0, 1);
        assert!(matches!(config.validate(), Err(ConfigError::StationOrder(_))));
    }

    #[test]
    fn test_processing_time_mean() {
        assert_eq!(ProcessingTime::Uniform { min: 100.0, max: 110.0 }.mean(), 105.0);
        assert_eq!(ProcessingTime::Fixed(7.5).mean(), 7.5);
    }

    #[test]
    fn test_replication_config_builder() {
        let config = ReplicationConfig::new(4)
            .with_concurrency(ConcurrencyMode::Rayon)
            .with_thread_pool_size(2)
            .with_seed_base(100);

        assert_eq!(config.runs, 4);
        assert_eq!(config.concurrency_mode, ConcurrencyMode::Rayon);
        assert_eq!(config.thread_pool_size, Some(2));
        assert_eq!(config.seed_base, 100);
        assert!(config.validate().is_ok());
        assert!(ReplicationConfig::new(0).validate().is_err());
    }

    #[test]
    fn test_concurrency_mode_default() {
        assert_eq!(ConcurrencyMode::default(), ConcurrencyMode::Sequential);
    }
}
