use std::collections::HashSet;

use crate::catalog::types::{Catalog, SatelliteRecord};

/// Which satellites of the catalog to evaluate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// First satellite of every launch group, in catalog order.
    OnePerTrain,
    /// Every satellite in the catalog.
    All,
    /// Exactly these catalog numbers, bypassing train deduplication.
    Explicit(Vec<u32>),
}

#[derive(Debug)]
pub struct Selected<'a, O> {
    pub satellites: Vec<&'a SatelliteRecord<O>>,
    /// Explicitly requested ids that the catalog does not contain.
    pub unknown: Vec<u32>,
}

pub fn select<'a, O>(catalog: &'a Catalog<O>, selection: &Selection) -> Selected<'a, O> {
    match selection {
        Selection::OnePerTrain => Selected {
            satellites: one_per_train(catalog),
            unknown: Vec::new(),
        },
        Selection::All => Selected {
            satellites: catalog.satellites().iter().collect(),
            unknown: Vec::new(),
        },
        Selection::Explicit(ids) => {
            let mut satellites = Vec::with_capacity(ids.len());
            let mut unknown = Vec::new();
            let mut seen = HashSet::new();
            for &id in ids {
                if !seen.insert(id) {
                    continue;
                }
                match catalog.get(id) {
                    Some(sat) => satellites.push(sat),
                    None => {
                        log::warn!("Satellite {} is not in the catalog, skipping", id);
                        unknown.push(id);
                    }
                }
            }
            Selected {
                satellites,
                unknown,
            }
        }
    }
}

/// First satellite of each launch group, in catalog order.
pub fn one_per_train<O>(catalog: &Catalog<O>) -> Vec<&SatelliteRecord<O>> {
    let mut seen = HashSet::new();
    catalog
        .satellites()
        .iter()
        .filter(|sat| seen.insert(sat.launch_id.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog<()> {
        Catalog::from_records(vec![
            SatelliteRecord::new(44713, "STARLINK-1007", "19074", ()),
            SatelliteRecord::new(44714, "STARLINK-1008", "19074", ()),
            SatelliteRecord::new(53544, "STARLINK-4331", "22101", ()),
            SatelliteRecord::new(44715, "STARLINK-1009", "19074", ()),
            SatelliteRecord::new(53545, "STARLINK-4332", "22101", ()),
        ])
    }

    fn ids<O>(sats: &[&SatelliteRecord<O>]) -> Vec<u32> {
        sats.iter().map(|s| s.norad_id).collect()
    }

    #[test]
    fn keeps_first_of_each_train() {
        let catalog = catalog();
        let selected = select(&catalog, &Selection::OnePerTrain);
        assert_eq!(ids(&selected.satellites), vec![44713, 53544]);
        assert!(selected.unknown.is_empty());
    }

    #[test]
    fn explicit_ids_bypass_deduplication() {
        let catalog = catalog();
        let selected = select(&catalog, &Selection::Explicit(vec![44715, 44714, 44715]));
        assert_eq!(ids(&selected.satellites), vec![44715, 44714]);
    }

    #[test]
    fn unknown_ids_are_reported_and_skipped() {
        let catalog = catalog();
        let selected = select(&catalog, &Selection::Explicit(vec![1, 53545]));
        assert_eq!(ids(&selected.satellites), vec![53545]);
        assert_eq!(selected.unknown, vec![1]);
    }

    #[test]
    fn all_selects_everything() {
        let catalog = catalog();
        assert_eq!(select(&catalog, &Selection::All).satellites.len(), 5);
    }

    #[test]
    fn empty_catalog_selects_nothing() {
        let catalog: Catalog<()> = Catalog::default();
        assert!(one_per_train(&catalog).is_empty());
    }
}
