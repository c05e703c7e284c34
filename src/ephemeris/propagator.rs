use chrono::{DateTime, Duration, Utc};

use crate::catalog::SatelliteRecord;
use crate::ephemeris::geometry::{angle_between_deg, in_earth_shadow, look_angles, sub};
use crate::ephemeris::orbit::Sgp4Orbit;
use crate::ephemeris::sun::sun_position_ecef_km;
use crate::predict::{
    EventKind, LookAngles, Observer, PassEvent, PredictError, Propagator, TimeWindow,
};

const COARSE_STEP_SECONDS: i64 = 30; // coarse scan
const FINE_STEP_SECONDS: i64 = 1;

/// SGP4 propagation with a spherical-Earth shadow and the low-precision Sun.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sgp4Propagator;

impl Propagator for Sgp4Propagator {
    type Orbit = Sgp4Orbit;

    fn find_events(
        &self,
        sat: &SatelliteRecord<Sgp4Orbit>,
        observer: &Observer,
        window: &TimeWindow,
        altitude_deg: f64,
    ) -> Result<Vec<PassEvent>, PredictError> {
        scan_events(&sat.orbit, sat.norad_id, observer, window, altitude_deg)
    }

    fn is_sunlit(
        &self,
        sat: &SatelliteRecord<Sgp4Orbit>,
        at: DateTime<Utc>,
    ) -> Result<bool, PredictError> {
        let position = sat.orbit.position_ecef_km(at)?;
        Ok(!in_earth_shadow(position, sun_position_ecef_km(at)))
    }

    fn look_angles(
        &self,
        sat: &SatelliteRecord<Sgp4Orbit>,
        observer: &Observer,
        at: DateTime<Utc>,
    ) -> Result<LookAngles, PredictError> {
        let (azimuth_deg, elevation_deg, range_km) = look_angles(
            observer.position_ecef_km(),
            sat.orbit.position_ecef_km(at)?,
            observer.lat_rad(),
            observer.lon_rad(),
        );
        Ok(LookAngles {
            azimuth_deg,
            elevation_deg,
            range_km,
        })
    }

    fn phase_angle_deg(
        &self,
        sat: &SatelliteRecord<Sgp4Orbit>,
        observer: &Observer,
        at: DateTime<Utc>,
    ) -> Result<f64, PredictError> {
        let position = sat.orbit.position_ecef_km(at)?;
        let to_sun = sub(sun_position_ecef_km(at), position);
        let to_observer = sub(observer.position_ecef_km(), position);
        Ok(angle_between_deg(to_sun, to_observer))
    }
}

fn elevation_at(
    orbit: &Sgp4Orbit,
    observer: &Observer,
    at: DateTime<Utc>,
) -> Result<f64, PredictError> {
    let (_, elevation, _) = look_angles(
        observer.position_ecef_km(),
        orbit.position_ecef_km(at)?,
        observer.lat_rad(),
        observer.lon_rad(),
    );
    Ok(elevation)
}

/// Coarse scan of the window, then bisection on every threshold crossing and
/// a ternary search on every elevation peak.
fn scan_events(
    orbit: &Sgp4Orbit,
    norad_id: u32,
    observer: &Observer,
    window: &TimeWindow,
    altitude_deg: f64,
) -> Result<Vec<PassEvent>, PredictError> {
    let mut events = Vec::new();
    let coarse_step = Duration::seconds(COARSE_STEP_SECONDS);
    let event = |kind, at| PassEvent { kind, at, norad_id };

    let mut cursor = window.start;
    let mut prev: Option<(DateTime<Utc>, f64)> = None;
    let mut before_prev: Option<f64> = None;

    loop {
        let elevation = elevation_at(orbit, observer, cursor)?;

        if let Some((prev_time, prev_elevation)) = prev {
            let was_up = prev_elevation >= altitude_deg;
            let is_up = elevation >= altitude_deg;

            if is_up && !was_up {
                let at = refine_crossing(orbit, observer, prev_time, cursor, altitude_deg, true)?;
                events.push(event(EventKind::Rise, at));
            } else if !is_up && was_up {
                let at = refine_crossing(orbit, observer, prev_time, cursor, altitude_deg, false)?;
                events.push(event(EventKind::Set, at));
            }

            if let Some(earlier) = before_prev {
                if prev_elevation > earlier && prev_elevation >= elevation {
                    let (at, peak) = refine_peak(orbit, observer, prev_time - coarse_step, cursor)?;
                    if peak >= altitude_deg {
                        events.push(event(EventKind::Culmination, at));
                    }
                }
            }
        }

        before_prev = prev.map(|(_, e)| e);
        prev = Some((cursor, elevation));

        if cursor >= window.end {
            break;
        }
        cursor = (cursor + coarse_step).min(window.end);
    }

    events.sort_by_key(|e| e.at);
    Ok(events)
}

/// Binary search for the threshold crossing between two samples
fn refine_crossing(
    orbit: &Sgp4Orbit,
    observer: &Observer,
    before: DateTime<Utc>,
    after: DateTime<Utc>,
    altitude_deg: f64,
    rising: bool,
) -> Result<DateTime<Utc>, PredictError> {
    let mut low = before;
    let mut high = after;

    while (high - low).num_seconds() > FINE_STEP_SECONDS {
        let mid = low + (high - low) / 2;
        let above = elevation_at(orbit, observer, mid)? >= altitude_deg;
        if above == rising {
            high = mid;
        } else {
            low = mid;
        }
    }

    Ok(if rising { high } else { low })
}

/// Ternary search for the elevation maximum in `[low, high]`.
fn refine_peak(
    orbit: &Sgp4Orbit,
    observer: &Observer,
    mut low: DateTime<Utc>,
    mut high: DateTime<Utc>,
) -> Result<(DateTime<Utc>, f64), PredictError> {
    while (high - low).num_seconds() > FINE_STEP_SECONDS {
        let third = (high - low) / 3;
        let left = low + third;
        let right = high - third;
        if elevation_at(orbit, observer, left)? < elevation_at(orbit, observer, right)? {
            low = left;
        } else {
            high = right;
        }
    }

    let at = low + (high - low) / 2;
    Ok((at, elevation_at(orbit, observer, at)?))
}
