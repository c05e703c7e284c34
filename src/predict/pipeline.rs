use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::{select, Catalog, Selection};
use crate::predict::aggregate::best_per_day;
use crate::predict::context::PredictionContext;
use crate::predict::scheduler::evaluate_all;
use crate::predict::services::{Propagator, SkyDarkness};
use crate::predict::summary::RunSummary;
use crate::predict::types::VisibilityRecord;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Prediction {
    pub report: Vec<VisibilityRecord>,
    pub summary: RunSummary,
}

/// Select satellites, evaluate them concurrently and reduce to the best pass
/// per night.
pub fn predict<P, D>(
    ctx: &PredictionContext<P, D>,
    catalog: &Catalog<P::Orbit>,
    selection: &Selection,
    workers: usize,
) -> Prediction
where
    P: Propagator + Sync,
    D: SkyDarkness + Sync,
    P::Orbit: Sync,
{
    let selected = select(catalog, selection);
    log::info!(
        "Selected {} of {} satellites ({:?})",
        selected.satellites.len(),
        catalog.len(),
        selection
    );

    let output = evaluate_all(ctx, &selected.satellites, workers);
    let mut summary = output.summary;
    summary.unknown_satellites = selected.unknown;
    summary.normalize();

    let report = best_per_day(output.records);
    log::info!("Report covers {} nights", report.len());

    Prediction { report, summary }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::predict::testing::{
        paris, phase_for_magnitude, record, utc, FixedDarkness, ScriptedPass, ScriptedPropagator,
    };
    use crate::predict::types::{TimeWindow, TwilightLevel};

    fn context(
        propagator: ScriptedPropagator,
    ) -> PredictionContext<ScriptedPropagator, FixedDarkness> {
        let window = TimeWindow::starting_at(utc(2024, 1, 15, 12, 0, 0), Duration::days(4));
        PredictionContext::new(paris(), window, propagator, FixedDarkness(TwilightLevel::Night))
    }

    #[test]
    fn brightest_of_three_wins_the_night() {
        let mut propagator = ScriptedPropagator::new();
        for (i, (id, mag)) in [(50001, 6.0), (50002, 4.2), (50003, 5.0)].into_iter().enumerate() {
            let rise = utc(2024, 1, 15, 20, 10 * i as u32, 0);
            propagator = propagator.with_pass(
                id,
                ScriptedPass::new(rise, Duration::minutes(5)).phase(phase_for_magnitude(mag, id)),
            );
        }
        let catalog = Catalog::from_records(vec![
            record(50001, "22001"),
            record(50002, "22002"),
            record(50003, "22003"),
        ]);

        let prediction = predict(&context(propagator), &catalog, &Selection::OnePerTrain, 8);

        assert_eq!(prediction.report.len(), 1);
        assert_eq!(prediction.report[0].mag, 4.2);
        assert_eq!(prediction.report[0].satellite_id, 50002);
        assert_eq!(prediction.summary.passes_accepted, 2);
        assert_eq!(prediction.summary.count("too_faint"), 1);
    }

    #[test]
    fn one_satellite_per_train_is_evaluated() {
        let rise = utc(2024, 1, 15, 21, 0, 0);
        let propagator = ScriptedPropagator::new()
            .with_pass(44713, ScriptedPass::new(rise, Duration::minutes(6)))
            .with_pass(44714, ScriptedPass::new(rise, Duration::minutes(6)));
        let catalog = Catalog::from_records(vec![record(44713, "19074"), record(44714, "19074")]);
        let ctx = context(propagator);

        let prediction = predict(&ctx, &catalog, &Selection::OnePerTrain, 8);

        assert_eq!(ctx.propagator.queried_satellites(), vec![44713]);
        assert_eq!(prediction.summary.satellites_evaluated, 1);
        assert_eq!(prediction.report[0].satellite_id, 44713);
    }

    #[test]
    fn explicit_selection_overrides_trains() {
        let rise = utc(2024, 1, 15, 21, 0, 0);
        let propagator = ScriptedPropagator::new()
            .with_pass(44713, ScriptedPass::new(rise, Duration::minutes(6)))
            .with_pass(44714, ScriptedPass::new(rise, Duration::minutes(6)));
        let catalog = Catalog::from_records(vec![record(44713, "19074"), record(44714, "19074")]);
        let ctx = context(propagator);

        let selection = Selection::Explicit(vec![44714, 44713, 12345]);
        let prediction = predict(&ctx, &catalog, &selection, 8);

        assert_eq!(ctx.propagator.queried_satellites(), vec![44713, 44714]);
        assert_eq!(prediction.summary.unknown_satellites, vec![12345]);
    }

    #[test]
    fn empty_catalog_gives_empty_report() {
        let catalog: Catalog<()> = Catalog::default();
        let prediction = predict(
            &context(ScriptedPropagator::new()),
            &catalog,
            &Selection::OnePerTrain,
            8,
        );
        assert!(prediction.report.is_empty());
        assert_eq!(serde_json::to_string(&prediction.report).unwrap(), "[]");
    }
}
