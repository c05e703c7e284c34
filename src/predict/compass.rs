use serde::Serialize;
use strum_macros::Display;
use utoipa::ToSchema;

const SECTOR_DEG: f64 = 22.5;

/// The 16 points of the compass rose, clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum CompassPoint {
    N,
    Nne,
    Ne,
    Ene,
    E,
    Ese,
    Se,
    Sse,
    S,
    Ssw,
    Sw,
    Wsw,
    W,
    Wnw,
    Nw,
    Nnw,
}

const POINTS: [CompassPoint; 16] = [
    CompassPoint::N,
    CompassPoint::Nne,
    CompassPoint::Ne,
    CompassPoint::Ene,
    CompassPoint::E,
    CompassPoint::Ese,
    CompassPoint::Se,
    CompassPoint::Sse,
    CompassPoint::S,
    CompassPoint::Ssw,
    CompassPoint::Sw,
    CompassPoint::Wsw,
    CompassPoint::W,
    CompassPoint::Wnw,
    CompassPoint::Nw,
    CompassPoint::Nnw,
];

impl CompassPoint {
    /// Nearest compass point for an azimuth in degrees. Sector boundaries
    /// round half to even, so 11.25 maps to N and 33.75 to NE.
    pub fn from_azimuth(azimuth_deg: f64) -> Self {
        let index = (azimuth_deg / SECTOR_DEG).round_ties_even() as i64;
        POINTS[index.rem_euclid(16) as usize]
    }
}

/// End-of-pass direction, taken as the antipode of the start.
pub fn end_azimuth(start_azimuth_deg: f64) -> f64 {
    start_azimuth_deg + 180.0
}
