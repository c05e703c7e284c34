use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use crate::ephemeris::error::OrbitError;
use crate::ephemeris::geometry::teme_to_ecef_position;
use crate::ephemeris::sun::gmst;
use crate::predict::PredictError;

/// SGP4 state of one satellite, built once per catalog load.
pub struct Sgp4Orbit {
    elements: Elements,
    constants: Constants,
}

impl Sgp4Orbit {
    pub fn from_tle(name: Option<String>, line1: &str, line2: &str) -> Result<Self, OrbitError> {
        let elements = Elements::from_tle(name, line1.as_bytes(), line2.as_bytes())?;
        let constants = Constants::from_elements(&elements)?;
        Ok(Self {
            elements,
            constants,
        })
    }

    pub fn norad_id(&self) -> u64 {
        self.elements.norad_id
    }

    pub fn epoch(&self) -> DateTime<Utc> {
        self.elements.datetime.and_utc()
    }

    /// Position in the TEME frame, km.
    pub fn position_teme_km(&self, at: DateTime<Utc>) -> Result<[f64; 3], PredictError> {
        let minutes = self
            .elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PredictError::InvalidTime(e.to_string()))?;
        let prediction = self.constants.propagate(minutes)?;
        Ok(prediction.position)
    }

    /// Position in the Earth-fixed frame, km.
    pub fn position_ecef_km(&self, at: DateTime<Utc>) -> Result<[f64; 3], PredictError> {
        Ok(teme_to_ecef_position(self.position_teme_km(at)?, gmst(at)))
    }
}

impl std::fmt::Debug for Sgp4Orbit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sgp4Orbit")
            .field("norad_id", &self.elements.norad_id)
            .field("epoch", &self.elements.datetime)
            .finish()
    }
}
