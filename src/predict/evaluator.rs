use std::sync::{Mutex, PoisonError};

use crate::catalog::SatelliteRecord;
use crate::predict::compass::{end_azimuth, CompassPoint};
use crate::predict::context::PredictionContext;
use crate::predict::error::PredictError;
use crate::predict::pass_finder::find_passes;
use crate::predict::photometry::{apparent_magnitude, round1};
use crate::predict::services::{Propagator, SkyDarkness};
use crate::predict::types::{PassOutcome, PassTriple, RejectReason, VisibilityRecord};

/// Records accepted by concurrently running evaluations.
#[derive(Debug, Default)]
pub struct SharedResults {
    records: Mutex<Vec<VisibilityRecord>>,
}

impl SharedResults {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extend(&self, records: Vec<VisibilityRecord>) {
        self.records
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend(records);
    }

    pub fn into_inner(self) -> Vec<VisibilityRecord> {
        self.records
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Run the whole pipeline for one satellite and publish its visible passes
/// into `results`. Nothing is published when any pass fails to evaluate.
/// Returns the fate of every candidate for diagnostics.
pub fn evaluate_satellite<P, D>(
    ctx: &PredictionContext<P, D>,
    sat: &SatelliteRecord<P::Orbit>,
    results: &SharedResults,
) -> Result<Vec<PassOutcome<()>>, PredictError>
where
    P: Propagator,
    D: SkyDarkness,
{
    let mut outcomes = Vec::new();
    let mut visible = Vec::new();

    for candidate in find_passes(ctx, sat)? {
        let outcome = match candidate {
            PassOutcome::Accepted(triple) => build_record(ctx, sat, &triple)?,
            PassOutcome::Rejected(r) => PassOutcome::Rejected(r),
            PassOutcome::Dropped(d) => PassOutcome::Dropped(d),
        };

        outcomes.push(outcome.map(|record| {
            log::debug!(
                "{} visible {} mag {}",
                record.satellite,
                record.rising,
                record.mag
            );
            visible.push(record);
        }));
    }

    results.extend(visible);
    Ok(outcomes)
}

fn build_record<P, D>(
    ctx: &PredictionContext<P, D>,
    sat: &SatelliteRecord<P::Orbit>,
    triple: &PassTriple,
) -> Result<PassOutcome<VisibilityRecord>, PredictError>
where
    P: Propagator,
    D: SkyDarkness,
{
    let phase = ctx
        .propagator
        .phase_angle_deg(sat, &ctx.observer, triple.culmination)?;
    let mag = apparent_magnitude(phase, sat.norad_id);
    if mag >= ctx.settings.magnitude_limit {
        return Ok(PassOutcome::Rejected(RejectReason::TooFaint(mag)));
    }

    let start_az = ctx
        .propagator
        .look_angles(sat, &ctx.observer, triple.rise)?
        .azimuth_deg;
    let rising = ctx.observer.local(triple.rise);

    Ok(PassOutcome::Accepted(VisibilityRecord {
        satellite: sat.name.clone(),
        satellite_id: sat.norad_id,
        launch_id: sat.launch_id.clone(),
        rising,
        culmination: ctx.observer.local(triple.culmination),
        setting: ctx.observer.local(triple.set),
        start_az: CompassPoint::from_azimuth(start_az),
        end_az: CompassPoint::from_azimuth(end_azimuth(start_az)),
        mag: round1(mag),
        date: rising.date_naive(),
    }))
}
