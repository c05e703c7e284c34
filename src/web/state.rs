use chrono::{Duration, Utc};
use std::sync::Arc;

use crate::catalog::{Selection, Sgp4Catalog};
use crate::ephemeris::{Sgp4Propagator, SolarDarkness};
use crate::predict::{predict, Observer, Prediction, PredictionContext, SearchSettings, TimeWindow};

/// Resolved configuration plus the catalog loaded at startup.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Sgp4Catalog>,
    pub observer: Observer,
    pub settings: SearchSettings,
    pub window: Duration,
    pub default_selection: Selection,
    pub workers: usize,
}

impl AppState {
    /// Run the pipeline over `[now, now + window]`. Blocking.
    pub fn predict_from_now(&self, selection: &Selection) -> Prediction {
        let window = TimeWindow::starting_at(Utc::now(), self.window);
        let ctx = PredictionContext::new(self.observer, window, Sgp4Propagator, SolarDarkness)
            .with_settings(self.settings);
        predict(&ctx, self.catalog.as_ref(), selection, self.workers)
    }
}
