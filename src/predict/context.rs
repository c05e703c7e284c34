use chrono::Duration;

use crate::predict::observer::Observer;
use crate::predict::photometry::DEFAULT_MAGNITUDE_LIMIT;
use crate::predict::types::TimeWindow;

pub const DEFAULT_ALTITUDE_THRESHOLD_DEG: f64 = 10.0;
/// Bounds one low-orbit pass above the altitude threshold.
pub const DEFAULT_FOLLOW_UP_WINDOW: Duration = Duration::minutes(10);
pub const DEFAULT_MIN_PASS_DURATION: Duration = Duration::minutes(3);
pub const DEFAULT_WORKERS: usize = 8;

/// Tunables of the visibility search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchSettings {
    pub altitude_threshold_deg: f64,
    pub follow_up_window: Duration,
    pub min_pass_duration: Duration,
    pub magnitude_limit: f64,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            altitude_threshold_deg: DEFAULT_ALTITUDE_THRESHOLD_DEG,
            follow_up_window: DEFAULT_FOLLOW_UP_WINDOW,
            min_pass_duration: DEFAULT_MIN_PASS_DURATION,
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
        }
    }
}

/// Everything a run reads, built once and shared by reference with every
/// worker.
pub struct PredictionContext<P, D> {
    pub observer: Observer,
    pub window: TimeWindow,
    pub settings: SearchSettings,
    pub propagator: P,
    pub darkness: D,
}

impl<P, D> PredictionContext<P, D> {
    pub fn new(observer: Observer, window: TimeWindow, propagator: P, darkness: D) -> Self {
        Self {
            observer,
            window,
            settings: SearchSettings::default(),
            propagator,
            darkness,
        }
    }

    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }
}
