//! Low-precision solar ephemeris (Astronomical Almanac, about 0.01 degree
//! between 1950 and 2050), plenty for shadow and twilight tests.

use chrono::{DateTime, Utc};

use crate::ephemeris::geometry::teme_to_ecef_position;

const AU_KM: f64 = 149_597_870.7;
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const J2000_JD: f64 = 2_451_545.0;

pub fn julian_date(t: DateTime<Utc>) -> f64 {
    t.timestamp_millis() as f64 / 86_400_000.0 + UNIX_EPOCH_JD
}

/// Greenwich mean sidereal time in radians.
pub fn gmst(t: DateTime<Utc>) -> f64 {
    sgp4::iau_epoch_to_sidereal_time(sgp4::julian_years_since_j2000(&t.naive_utc()))
}

/// Geocentric Sun position in the equatorial frame of date, km.
pub fn sun_position_eci_km(t: DateTime<Utc>) -> [f64; 3] {
    let n = julian_date(t) - J2000_JD;
    let mean_longitude = (280.460 + 0.985_647_4 * n).rem_euclid(360.0);
    let mean_anomaly = (357.528 + 0.985_600_3 * n).rem_euclid(360.0).to_radians();
    let ecliptic_longitude = (mean_longitude
        + 1.915 * mean_anomaly.sin()
        + 0.020 * (2.0 * mean_anomaly).sin())
    .to_radians();
    let obliquity = (23.439 - 0.000_000_4 * n).to_radians();
    let distance =
        (1.000_14 - 0.016_71 * mean_anomaly.cos() - 0.000_14 * (2.0 * mean_anomaly).cos()) * AU_KM;

    [
        distance * ecliptic_longitude.cos(),
        distance * obliquity.cos() * ecliptic_longitude.sin(),
        distance * obliquity.sin() * ecliptic_longitude.sin(),
    ]
}

pub fn sun_position_ecef_km(t: DateTime<Utc>) -> [f64; 3] {
    teme_to_ecef_position(sun_position_eci_km(t), gmst(t))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::ephemeris::geometry::norm;

    fn declination_deg(t: DateTime<Utc>) -> f64 {
        let p = sun_position_eci_km(t);
        (p[2] / norm(p)).asin().to_degrees()
    }

    #[test]
    fn julian_date_of_j2000() {
        let t = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_date(t) - J2000_JD).abs() < 1e-9);
    }

    #[test]
    fn equinox_and_solstice_declinations() {
        let equinox = Utc.with_ymd_and_hms(2024, 3, 20, 3, 6, 0).unwrap();
        let solstice = Utc.with_ymd_and_hms(2024, 6, 20, 20, 51, 0).unwrap();
        assert!(declination_deg(equinox).abs() < 0.05);
        assert!((declination_deg(solstice) - 23.44).abs() < 0.05);
    }

    #[test]
    fn distance_is_about_one_au() {
        let perihelion = Utc.with_ymd_and_hms(2024, 1, 3, 0, 0, 0).unwrap();
        let aphelion = Utc.with_ymd_and_hms(2024, 7, 5, 0, 0, 0).unwrap();
        assert!((norm(sun_position_eci_km(perihelion)) / AU_KM - 0.9833).abs() < 0.001);
        assert!((norm(sun_position_eci_km(aphelion)) / AU_KM - 1.0167).abs() < 0.001);
    }
}
