pub mod clock;
pub mod config;
pub mod errors;
pub mod kanban;
pub mod line;
pub mod replication;
pub mod sampler;
pub mod shift_runner;
pub mod sizing;
pub mod snapshot;
pub mod station;
pub mod types;
