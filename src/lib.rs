pub mod core;
pub mod observers;

// Re-export commonly used types
pub use crate::core::config::{
    ConcurrencyMode, LineConfig, ProcessingTime, ReplicationConfig, StationConfig,
};
pub use crate::core::errors::{ConfigError, SimError};
pub use crate::core::line::Line;
pub use crate::core::replication::{run_replications, ReplicationSummary};
pub use crate::core::shift_runner::{
    simulate_shift, ExhaustionCause, ShiftOutcome, ShiftReport, ShiftRunner,
};
pub use crate::core::snapshot::{ShiftObserver, TickSnapshot};
pub use crate::core::station::OptimalStock;
pub use crate::core::types::{SimTime, StationId, Stock};
