use super::types::StationId;

/// Rejected line or batch configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("line must list every station exactly once in line order, found {0:?}")]
    StationOrder(Vec<StationId>),
    #[error("invalid processing time for {station}: {reason}")]
    ProcessingTime { station: StationId, reason: String },
    #[error("only the first station may have an unbounded feed, {0} is unbounded")]
    UnboundedDownstream(StationId),
    #[error("starting stock of {station} ({stock}) exceeds the full threshold ({full})")]
    StockAboveCapacity { station: StationId, stock: u32, full: u32 },
    #[error("optimal stock of {0} must be positive")]
    NonPositiveOptimalStock(StationId),
    #[error("{0}")]
    InvalidParameter(String),
}

/// Errors raised while assembling or running simulations
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
