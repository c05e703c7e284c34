mod aggregate;
mod compass;
mod context;
mod error;
mod evaluator;
mod observer;
mod pass_finder;
mod photometry;
mod pipeline;
mod scheduler;
mod services;
mod summary;
#[cfg(test)]
pub(crate) mod testing;
mod types;

pub use compass::CompassPoint;
pub use context::{
    PredictionContext, SearchSettings, DEFAULT_ALTITUDE_THRESHOLD_DEG, DEFAULT_WORKERS,
};
pub use error::PredictError;
pub use observer::Observer;
pub use photometry::DEFAULT_MAGNITUDE_LIMIT;
pub use pipeline::{predict, Prediction};
pub use services::{Propagator, SkyDarkness};
pub use summary::{RunSummary, SatelliteFailure};
pub use types::{EventKind, LookAngles, PassEvent, TimeWindow, TwilightLevel, VisibilityRecord};
