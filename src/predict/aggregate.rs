use crate::predict::types::VisibilityRecord;

/// Keep the brightest record of each local calendar date, ordered by date.
///
/// Records are sorted by `(date, mag)`; equal magnitudes fall back to rising
/// time and catalog number so the outcome never depends on the order in which
/// workers delivered them.
pub fn best_per_day(mut records: Vec<VisibilityRecord>) -> Vec<VisibilityRecord> {
    records.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.mag.total_cmp(&b.mag))
            .then(a.rising.cmp(&b.rising))
            .then(a.satellite_id.cmp(&b.satellite_id))
    });
    records.dedup_by_key(|r| r.date);
    records
}
