//! Deterministic stand-ins for the propagation and darkness services.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::catalog::SatelliteRecord;
use crate::predict::error::PredictError;
use crate::predict::observer::Observer;
use crate::predict::photometry::apparent_magnitude;
use crate::predict::services::{Propagator, SkyDarkness};
use crate::predict::types::{EventKind, LookAngles, PassEvent, TimeWindow, TwilightLevel};

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
}

pub fn paris() -> Observer {
    Observer::new(48.8534, 2.3488, 35.0, chrono_tz::Europe::Paris)
}

pub fn record(norad_id: u32, launch_id: &str) -> SatelliteRecord<()> {
    SatelliteRecord::new(norad_id, format!("STARLINK-{}", norad_id), launch_id, ())
}

/// Phase angle at which a satellite of this generation shows `target`
/// magnitude, searched on the branch where brightness grows with phase.
pub fn phase_for_magnitude(target: f64, norad_id: u32) -> f64 {
    let (mut lo, mut hi) = (96.0_f64, 180.0_f64);
    for _ in 0..200 {
        let mid = 0.5 * (lo + hi);
        if apparent_magnitude(mid, norad_id) > target {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

#[derive(Debug, Clone)]
pub struct ScriptedPass {
    pub rise: DateTime<Utc>,
    pub culmination: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
    pub sunlit: bool,
    pub phase_angle_deg: f64,
    pub phase_known: bool,
    pub azimuth_deg: f64,
}

impl ScriptedPass {
    pub fn new(rise: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            rise,
            culmination: Some(rise + duration / 2),
            set: Some(rise + duration),
            sunlit: true,
            phase_angle_deg: 150.0,
            phase_known: true,
            azimuth_deg: 250.0,
        }
    }

    pub fn shadowed(mut self) -> Self {
        self.sunlit = false;
        self
    }

    pub fn without_set(mut self) -> Self {
        self.set = None;
        self
    }

    pub fn without_culmination(mut self) -> Self {
        self.culmination = None;
        self
    }

    pub fn phase(mut self, phase_angle_deg: f64) -> Self {
        self.phase_angle_deg = phase_angle_deg;
        self
    }

    /// Phase angle lookups at the culmination fail.
    pub fn without_phase(mut self) -> Self {
        self.phase_known = false;
        self
    }

    pub fn azimuth(mut self, azimuth_deg: f64) -> Self {
        self.azimuth_deg = azimuth_deg;
        self
    }
}

/// Replays scripted passes per catalog number.
#[derive(Debug, Default)]
pub struct ScriptedPropagator {
    passes: HashMap<u32, Vec<ScriptedPass>>,
    failing: HashSet<u32>,
    panicking: HashSet<u32>,
    queried: Mutex<Vec<u32>>,
}

impl ScriptedPropagator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pass(mut self, norad_id: u32, pass: ScriptedPass) -> Self {
        self.passes.entry(norad_id).or_default().push(pass);
        self
    }

    pub fn failing(mut self, norad_id: u32) -> Self {
        self.failing.insert(norad_id);
        self
    }

    pub fn panicking(mut self, norad_id: u32) -> Self {
        self.panicking.insert(norad_id);
        self
    }

    /// Distinct satellites that were asked for events, sorted.
    pub fn queried_satellites(&self) -> Vec<u32> {
        let mut ids = self.queried.lock().unwrap().clone();
        ids.sort_unstable();
        ids.dedup();
        ids
    }

    fn pass_where(
        &self,
        norad_id: u32,
        f: impl Fn(&ScriptedPass) -> bool,
    ) -> Option<&ScriptedPass> {
        self.passes.get(&norad_id)?.iter().find(|p| f(p))
    }
}

impl Propagator for ScriptedPropagator {
    type Orbit = ();

    fn find_events(
        &self,
        sat: &SatelliteRecord<()>,
        _observer: &Observer,
        window: &TimeWindow,
        _altitude_deg: f64,
    ) -> Result<Vec<PassEvent>, PredictError> {
        self.queried.lock().unwrap().push(sat.norad_id);
        if self.panicking.contains(&sat.norad_id) {
            panic!("scripted panic for {}", sat.norad_id);
        }
        if self.failing.contains(&sat.norad_id) {
            return Err(PredictError::Propagation(format!(
                "scripted failure for {}",
                sat.norad_id
            )));
        }

        let mut events = Vec::new();
        for pass in self.passes.get(&sat.norad_id).into_iter().flatten() {
            let candidates = [
                (EventKind::Rise, Some(pass.rise)),
                (EventKind::Culmination, pass.culmination),
                (EventKind::Set, pass.set),
            ];
            for (kind, at) in candidates {
                if let Some(at) = at.filter(|t| window.contains(*t)) {
                    events.push(PassEvent {
                        kind,
                        at,
                        norad_id: sat.norad_id,
                    });
                }
            }
        }
        events.sort_by_key(|e| e.at);
        Ok(events)
    }

    fn is_sunlit(
        &self,
        sat: &SatelliteRecord<()>,
        at: DateTime<Utc>,
    ) -> Result<bool, PredictError> {
        Ok(self
            .pass_where(sat.norad_id, |p| p.rise == at)
            .map_or(true, |p| p.sunlit))
    }

    fn look_angles(
        &self,
        sat: &SatelliteRecord<()>,
        _observer: &Observer,
        at: DateTime<Utc>,
    ) -> Result<LookAngles, PredictError> {
        let pass = self
            .pass_where(sat.norad_id, |p| p.rise == at)
            .ok_or_else(|| PredictError::Propagation("no scripted rise".into()))?;
        Ok(LookAngles {
            azimuth_deg: pass.azimuth_deg,
            elevation_deg: 10.0,
            range_km: 1200.0,
        })
    }

    fn phase_angle_deg(
        &self,
        sat: &SatelliteRecord<()>,
        _observer: &Observer,
        at: DateTime<Utc>,
    ) -> Result<f64, PredictError> {
        self.pass_where(sat.norad_id, |p| p.culmination == Some(at))
            .filter(|p| p.phase_known)
            .map(|p| p.phase_angle_deg)
            .ok_or_else(|| PredictError::Propagation("no scripted phase angle".into()))
    }
}

/// Reports the same darkness level at every instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedDarkness(pub TwilightLevel);

impl SkyDarkness for FixedDarkness {
    fn twilight(&self, _observer: &Observer, _at: DateTime<Utc>) -> TwilightLevel {
        self.0
    }
}
