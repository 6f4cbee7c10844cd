use super::config::ProcessingTime;
use super::types::SimTime;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};

/// Source of processing durations for a station.
///
/// The station processor calls `sample` on every gating check, so the
/// required duration is re-rolled each tick until enough time has passed.
pub trait DurationSampler: Send {
    fn sample(&mut self) -> SimTime;
}

/// Deterministic sampler returning the same duration every time
#[derive(Debug, Clone, Copy)]
pub struct FixedSampler(pub SimTime);

impl DurationSampler for FixedSampler {
    fn sample(&mut self) -> SimTime {
        self.0
    }
}

/// Sampler driven by a configured `ProcessingTime` and its own RNG
#[derive(Debug)]
pub struct SeededSampler {
    rng: StdRng,
    distribution: Option<Uniform<SimTime>>,
    fixed: SimTime,
}

impl SeededSampler {
    /// Build a sampler. With a seed the sequence is reproducible,
    /// otherwise the RNG is seeded from the OS.
    pub fn new(processing_time: ProcessingTime, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        match processing_time {
            ProcessingTime::Uniform { min, max } => Self {
                rng,
                distribution: Some(Uniform::new_inclusive(min, max)),
                fixed: min,
            },
            ProcessingTime::Fixed(value) => Self {
                rng,
                distribution: None,
                fixed: value,
            },
        }
    }
}

impl DurationSampler for SeededSampler {
    fn sample(&mut self) -> SimTime {
        match &self.distribution {
            Some(uniform) => uniform.sample(&mut self.rng),
            None => self.fixed,
        }
    }
}
