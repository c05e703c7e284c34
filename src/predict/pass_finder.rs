use chrono::{DateTime, Utc};

use crate::catalog::SatelliteRecord;
use crate::predict::context::PredictionContext;
use crate::predict::error::PredictError;
use crate::predict::services::{Propagator, SkyDarkness};
use crate::predict::types::{
    DropReason, EventKind, PassOutcome, PassTriple, RejectReason, TimeWindow, TwilightLevel,
};

/// Classify every rise of `sat` inside the search window.
///
/// A rise becomes a pass when the satellite is sunlit and the sky is at full
/// night at that instant, a culmination and a set follow within the
/// follow-up window, and the pass lasts at least the minimum duration.
/// Incomplete passes are dropped whole.
pub fn find_passes<P, D>(
    ctx: &PredictionContext<P, D>,
    sat: &SatelliteRecord<P::Orbit>,
) -> Result<Vec<PassOutcome<PassTriple>>, PredictError>
where
    P: Propagator,
    D: SkyDarkness,
{
    let events = ctx.propagator.find_events(
        sat,
        &ctx.observer,
        &ctx.window,
        ctx.settings.altitude_threshold_deg,
    )?;

    events
        .iter()
        .filter(|e| e.kind == EventKind::Rise)
        .map(|rise| classify_rise(ctx, sat, rise.at))
        .collect()
}

fn classify_rise<P, D>(
    ctx: &PredictionContext<P, D>,
    sat: &SatelliteRecord<P::Orbit>,
    rise: DateTime<Utc>,
) -> Result<PassOutcome<PassTriple>, PredictError>
where
    P: Propagator,
    D: SkyDarkness,
{
    if !ctx.propagator.is_sunlit(sat, rise)? {
        return Ok(PassOutcome::Rejected(RejectReason::Shadowed));
    }

    let level = ctx.darkness.twilight(&ctx.observer, rise);
    if level != TwilightLevel::Night {
        return Ok(PassOutcome::Rejected(RejectReason::SkyNotDark(level)));
    }

    let follow_up = TimeWindow::starting_at(rise, ctx.settings.follow_up_window);
    let events = ctx.propagator.find_events(
        sat,
        &ctx.observer,
        &follow_up,
        ctx.settings.altitude_threshold_deg,
    )?;

    let Some(set) = events
        .iter()
        .find(|e| e.kind == EventKind::Set && e.at > rise)
        .map(|e| e.at)
    else {
        log::debug!("{}: no set within follow-up window of {}", sat.name, rise);
        return Ok(PassOutcome::Dropped(DropReason::MissingSet));
    };

    let Some(culmination) = events
        .iter()
        .find(|e| e.kind == EventKind::Culmination && e.at >= rise && e.at <= set)
        .map(|e| e.at)
    else {
        log::debug!("{}: no culmination between {} and {}", sat.name, rise, set);
        return Ok(PassOutcome::Dropped(DropReason::MissingCulmination));
    };

    let triple = PassTriple {
        rise,
        culmination,
        set,
    };
    if triple.duration() < ctx.settings.min_pass_duration {
        return Ok(PassOutcome::Rejected(RejectReason::TooShort(
            triple.duration(),
        )));
    }

    Ok(PassOutcome::Accepted(triple))
}
