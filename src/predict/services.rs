use chrono::{DateTime, Utc};

use crate::catalog::SatelliteRecord;
use crate::predict::error::PredictError;
use crate::predict::observer::Observer;
use crate::predict::types::{LookAngles, PassEvent, TimeWindow, TwilightLevel};

/// Orbit propagation and event search for one kind of orbital state.
pub trait Propagator {
    type Orbit;

    /// Rise, culmination and set events of `sat` relative to `observer` inside
    /// `window`, ordered by time. Rise and set are crossings of
    /// `altitude_deg`; a culmination is reported for each peak above it.
    fn find_events(
        &self,
        sat: &SatelliteRecord<Self::Orbit>,
        observer: &Observer,
        window: &TimeWindow,
        altitude_deg: f64,
    ) -> Result<Vec<PassEvent>, PredictError>;

    /// Whether the satellite is outside Earth's shadow.
    fn is_sunlit(
        &self,
        sat: &SatelliteRecord<Self::Orbit>,
        at: DateTime<Utc>,
    ) -> Result<bool, PredictError>;

    fn look_angles(
        &self,
        sat: &SatelliteRecord<Self::Orbit>,
        observer: &Observer,
        at: DateTime<Utc>,
    ) -> Result<LookAngles, PredictError>;

    /// Angle at the satellite between the directions to the Sun and to the
    /// observer, in degrees.
    fn phase_angle_deg(
        &self,
        sat: &SatelliteRecord<Self::Orbit>,
        observer: &Observer,
        at: DateTime<Utc>,
    ) -> Result<f64, PredictError>;
}

/// Sky brightness at the observer.
pub trait SkyDarkness {
    fn twilight(&self, observer: &Observer, at: DateTime<Utc>) -> TwilightLevel;
}
