use super::config::{ConcurrencyMode, LineConfig, ReplicationConfig};
use super::errors::SimError;
use super::line::Line;
use super::shift_runner::{ExhaustionCause, ShiftOutcome, ShiftReport, ShiftRunner};
use super::station::OptimalStock;
use super::types::{SimTime, StationId};
use log::info;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use serde::Serialize;
use std::collections::BTreeMap;

/// Aggregate over a batch of independent shifts
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplicationSummary {
    pub runs: usize,
    pub completed: usize,
    /// Runs stopped by a starving station, keyed by that station
    pub starvations: BTreeMap<StationId, usize>,
    pub line_exhaustions: usize,
    pub mean_elapsed: SimTime,
}

impl ReplicationSummary {
    pub fn from_reports(reports: &[ShiftReport]) -> Self {
        let mut summary = Self {
            runs: reports.len(),
            ..Self::default()
        };
        for report in reports {
            match report.outcome {
                ShiftOutcome::Completed => summary.completed += 1,
                ShiftOutcome::StoppedByExhaustion(ExhaustionCause::StationStarved(id)) => {
                    *summary.starvations.entry(id).or_insert(0) += 1;
                }
                ShiftOutcome::StoppedByExhaustion(ExhaustionCause::LineExhausted) => {
                    summary.line_exhaustions += 1;
                }
            }
        }
        if !reports.is_empty() {
            let total: SimTime = reports.iter().map(|r| r.elapsed).sum();
            summary.mean_elapsed = total / reports.len() as f64;
        }
        summary
    }

    /// Share of runs that sustained the full shift
    pub fn completion_rate(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.completed as f64 / self.runs as f64
    }
}

/// Run one fresh shift per replication on a virtual clock.
///
/// Replication `i` is seeded with `seed_base + i`, so a batch is
/// reproducible regardless of the concurrency mode. Any pacing in `config`
/// is ignored.
pub fn run_replications(
    config: &LineConfig,
    optimal_stock: &OptimalStock,
    replication: &ReplicationConfig,
) -> Result<(Vec<ShiftReport>, ReplicationSummary), SimError> {
    replication.validate()?;
    config.validate()?;
    optimal_stock.validate()?;

    let run_one = |i: usize| -> Result<ShiftReport, SimError> {
        let seeded = config
            .clone()
            .with_pacing(None)
            .with_random_seed(Some(replication.seed_base.wrapping_add(i as u64)));
        let line = Line::new(&seeded, optimal_stock)?;
        Ok(ShiftRunner::virtual_time(line, &seeded).run(&mut []))
    };

    let reports: Vec<ShiftReport> = match replication.concurrency_mode {
        ConcurrencyMode::Sequential => {
            (0..replication.runs).map(run_one).collect::<Result<_, _>>()?
        }
        ConcurrencyMode::Rayon => {
            let mut builder = ThreadPoolBuilder::new();
            if let Some(size) = replication.thread_pool_size {
                builder = builder.num_threads(size);
            }
            let pool = builder.build()?;
            pool.install(|| {
                (0..replication.runs)
                    .into_par_iter()
                    .map(run_one)
                    .collect::<Result<Vec<_>, _>>()
            })?
        }
    };

    let summary = ReplicationSummary::from_reports(&reports);
    info!(
        "{} replications: {} completed ({:.0}%), {} line exhaustions, starvations {:?}",
        summary.runs,
        summary.completed,
        summary.completion_rate() * 100.0,
        summary.line_exhaustions,
        summary.starvations
    );
    Ok((reports, summary))
}
