use std::collections::BTreeMap;

use serde::Serialize;
use utoipa::ToSchema;

use crate::predict::error::PredictError;
use crate::predict::types::PassOutcome;

/// Diagnostics of one prediction run. The report itself stays silent about
/// what was skipped; this is where it shows up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
pub struct RunSummary {
    pub satellites_evaluated: usize,
    pub passes_accepted: usize,
    /// Candidate count per outcome label (`accepted`, `shadowed`, `too_short`, ...).
    pub outcomes: BTreeMap<String, usize>,
    pub unknown_satellites: Vec<u32>,
    pub failures: Vec<SatelliteFailure>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SatelliteFailure {
    pub norad_id: u32,
    pub name: String,
    pub error: String,
}

impl RunSummary {
    pub fn record_outcomes<T>(&mut self, outcomes: &[PassOutcome<T>]) {
        self.satellites_evaluated += 1;
        for outcome in outcomes {
            if matches!(outcome, PassOutcome::Accepted(_)) {
                self.passes_accepted += 1;
            }
            *self.outcomes.entry(outcome.label().to_string()).or_default() += 1;
        }
    }

    pub fn record_failure(&mut self, norad_id: u32, name: &str, error: &PredictError) {
        self.satellites_evaluated += 1;
        self.failures.push(SatelliteFailure {
            norad_id,
            name: name.to_string(),
            error: error.to_string(),
        });
    }

    /// Put order-dependent lists in a stable order.
    pub fn normalize(&mut self) {
        self.failures.sort_by_key(|f| f.norad_id);
        self.unknown_satellites.sort_unstable();
    }

    #[cfg(test)]
    pub fn count(&self, label: &str) -> usize {
        self.outcomes.get(label).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predict::types::{DropReason, RejectReason};

    #[test]
    fn counts_outcomes_by_label() {
        let mut summary = RunSummary::default();
        summary.record_outcomes(&[
            PassOutcome::Accepted(()),
            PassOutcome::Rejected(RejectReason::Shadowed),
            PassOutcome::Rejected(RejectReason::Shadowed),
            PassOutcome::Dropped(DropReason::MissingSet),
        ]);
        summary.record_outcomes::<()>(&[]);

        assert_eq!(summary.satellites_evaluated, 2);
        assert_eq!(summary.passes_accepted, 1);
        assert_eq!(summary.count("shadowed"), 2);
        assert_eq!(summary.count("missing_set"), 1);
        assert_eq!(summary.count("too_faint"), 0);
    }

    #[test]
    fn failures_sort_by_catalog_number() {
        let mut summary = RunSummary::default();
        let err = PredictError::Propagation("decayed".into());
        summary.record_failure(9, "B", &err);
        summary.record_failure(3, "A", &err);
        summary.normalize();
        let ids: Vec<_> = summary.failures.iter().map(|f| f.norad_id).collect();
        assert_eq!(ids, vec![3, 9]);
        assert_eq!(summary.failures[0].error, "Propagation error: decayed");
    }
}
