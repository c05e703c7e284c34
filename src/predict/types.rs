use chrono::{DateTime, Duration, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};
use strum_macros::{Display, IntoStaticStr};
use utoipa::ToSchema;

use crate::predict::compass::CompassPoint;

const LOCAL_TIME_FORMAT: &str = "%d %b %Y, %H:%M";

/// Search interval in UTC, inclusive at both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn starting_at(start: DateTime<Utc>, length: Duration) -> Self {
        Self::new(start, start + length)
    }

    #[cfg(test)]
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        instant >= self.start && instant <= self.end
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum EventKind {
    Rise,
    Culmination,
    Set,
}

/// An altitude-threshold crossing (or peak) reported by the propagation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassEvent {
    pub kind: EventKind,
    pub at: DateTime<Utc>,
    pub norad_id: u32,
}

/// Topocentric look angles of a satellite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookAngles {
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
    pub range_km: f64,
}

/// Sky brightness, ordered from brightest to darkest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum TwilightLevel {
    Day,
    #[strum(to_string = "civil twilight")]
    Civil,
    #[strum(to_string = "nautical twilight")]
    Nautical,
    #[strum(to_string = "astronomical twilight")]
    Astronomical,
    #[strum(to_string = "night")]
    Night,
}

/// A complete rise/culmination/set candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassTriple {
    pub rise: DateTime<Utc>,
    pub culmination: DateTime<Utc>,
    pub set: DateTime<Utc>,
}

impl PassTriple {
    pub fn duration(&self) -> Duration {
        self.set - self.rise
    }
}

#[derive(Debug, Clone, Copy, PartialEq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum RejectReason {
    Shadowed,
    SkyNotDark(TwilightLevel),
    TooShort(Duration),
    TooFaint(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum DropReason {
    MissingCulmination,
    MissingSet,
}

/// What happened to a single candidate pass.
#[derive(Debug, Clone, PartialEq)]
pub enum PassOutcome<T> {
    Accepted(T),
    Rejected(RejectReason),
    Dropped(DropReason),
}

impl<T> PassOutcome<T> {
    #[cfg(test)]
    pub fn accepted(self) -> Option<T> {
        match self {
            PassOutcome::Accepted(v) => Some(v),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> PassOutcome<U> {
        match self {
            PassOutcome::Accepted(v) => PassOutcome::Accepted(f(v)),
            PassOutcome::Rejected(r) => PassOutcome::Rejected(r),
            PassOutcome::Dropped(d) => PassOutcome::Dropped(d),
        }
    }

    /// Short label for diagnostics counters.
    pub fn label(&self) -> &'static str {
        match self {
            PassOutcome::Accepted(_) => "accepted",
            PassOutcome::Rejected(r) => r.into(),
            PassOutcome::Dropped(d) => d.into(),
        }
    }
}

/// One visible pass, as it appears in the report.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct VisibilityRecord {
    pub satellite: String,
    #[serde(rename = "satellite_ID")]
    pub satellite_id: u32,
    #[serde(rename = "launch_ID")]
    pub launch_id: String,
    #[serde(rename = "risingTime", serialize_with = "serialize_local")]
    #[schema(value_type = String, example = "15 Jan 2024, 19:42")]
    pub rising: DateTime<Tz>,
    #[serde(rename = "culminationTime", serialize_with = "serialize_local")]
    #[schema(value_type = String, example = "15 Jan 2024, 19:45")]
    pub culmination: DateTime<Tz>,
    #[serde(rename = "settingTime", serialize_with = "serialize_local")]
    #[schema(value_type = String, example = "15 Jan 2024, 19:48")]
    pub setting: DateTime<Tz>,
    #[serde(rename = "startAz")]
    pub start_az: CompassPoint,
    #[serde(rename = "endAz")]
    pub end_az: CompassPoint,
    pub mag: f64,
    #[schema(value_type = String, example = "2024-01-15")]
    pub date: NaiveDate,
}

fn serialize_local<S>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&value.format(LOCAL_TIME_FORMAT))
}
