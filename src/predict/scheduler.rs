use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use rayon::prelude::*;

use crate::catalog::SatelliteRecord;
use crate::predict::context::PredictionContext;
use crate::predict::error::PredictError;
use crate::predict::evaluator::{evaluate_satellite, SharedResults};
use crate::predict::services::{Propagator, SkyDarkness};
use crate::predict::summary::RunSummary;
use crate::predict::types::VisibilityRecord;

pub struct ScheduleOutput {
    /// Accepted records in completion order.
    pub records: Vec<VisibilityRecord>,
    pub summary: RunSummary,
}

/// Evaluate every satellite on a pool of `workers` threads and wait for all of
/// them. A satellite whose evaluation errors or panics is counted as a failure
/// and the pool moves on.
pub fn evaluate_all<P, D>(
    ctx: &PredictionContext<P, D>,
    satellites: &[&SatelliteRecord<P::Orbit>],
    workers: usize,
) -> ScheduleOutput
where
    P: Propagator + Sync,
    D: SkyDarkness + Sync,
    P::Orbit: Sync,
{
    let results = SharedResults::new();
    let summary = Mutex::new(RunSummary::default());
    let width = workers.clamp(1, satellites.len().max(1));
    let started = Instant::now();

    log::info!(
        "Evaluating {} satellites on {} workers",
        satellites.len(),
        width
    );

    let evaluate = |sat: &&SatelliteRecord<P::Orbit>| {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            evaluate_satellite(ctx, sat, &results)
        }))
        .unwrap_or_else(|payload| Err(PredictError::Panicked(panic_message(&*payload))));

        let mut summary = summary.lock().unwrap_or_else(PoisonError::into_inner);
        match outcome {
            Ok(outcomes) => summary.record_outcomes(&outcomes),
            Err(e) => {
                log::warn!("Failed to evaluate {} ({}): {}", sat.name, sat.norad_id, e);
                summary.record_failure(sat.norad_id, &sat.name, &e);
            }
        }
    };

    match rayon::ThreadPoolBuilder::new().num_threads(width).build() {
        Ok(pool) => pool.install(|| satellites.par_iter().for_each(evaluate)),
        Err(e) => {
            log::warn!("Failed to build worker pool, evaluating serially: {}", e);
            satellites.iter().for_each(evaluate);
        }
    }

    let mut summary = summary.into_inner().unwrap_or_else(PoisonError::into_inner);
    summary.normalize();

    log::info!(
        "Evaluated {} satellites in {:.1?}: {} passes accepted, {} failures",
        summary.satellites_evaluated,
        started.elapsed(),
        summary.passes_accepted,
        summary.failures.len()
    );

    ScheduleOutput {
        records: results.into_inner(),
        summary,
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
