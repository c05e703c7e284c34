use chrono::{DateTime, Utc};

use crate::ephemeris::geometry::look_angles;
use crate::ephemeris::sun::sun_position_ecef_km;
use crate::predict::{Observer, SkyDarkness, TwilightLevel};

/// Sun's apparent radius plus standard refraction
const SUN_HORIZON_DEG: f64 = -50.0 / 60.0;

/// Twilight classification from the computed solar altitude.
#[derive(Debug, Clone, Copy, Default)]
pub struct SolarDarkness;

impl SkyDarkness for SolarDarkness {
    fn twilight(&self, observer: &Observer, at: DateTime<Utc>) -> TwilightLevel {
        classify(sun_altitude_deg(observer, at))
    }
}

pub fn sun_altitude_deg(observer: &Observer, at: DateTime<Utc>) -> f64 {
    let (_, elevation, _) = look_angles(
        observer.position_ecef_km(),
        sun_position_ecef_km(at),
        observer.lat_rad(),
        observer.lon_rad(),
    );
    elevation
}

pub fn classify(sun_altitude_deg: f64) -> TwilightLevel {
    if sun_altitude_deg >= SUN_HORIZON_DEG {
        TwilightLevel::Day
    } else if sun_altitude_deg >= -6.0 {
        TwilightLevel::Civil
    } else if sun_altitude_deg >= -12.0 {
        TwilightLevel::Nautical
    } else if sun_altitude_deg >= -18.0 {
        TwilightLevel::Astronomical
    } else {
        TwilightLevel::Night
    }
}
