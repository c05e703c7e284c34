use std::collections::HashMap;

use serde::Serialize;
use utoipa::ToSchema;

/// A satellite as known to the catalog. `orbit` is whatever state the
/// propagation service needs; the prediction core never looks inside it.
#[derive(Debug, Clone)]
pub struct SatelliteRecord<O> {
    pub norad_id: u32,
    pub name: String,
    pub launch_id: String,
    pub orbit: O,
}

impl<O> SatelliteRecord<O> {
    pub fn new(
        norad_id: u32,
        name: impl Into<String>,
        launch_id: impl Into<String>,
        orbit: O,
    ) -> Self {
        Self {
            norad_id,
            name: name.into(),
            launch_id: launch_id.into(),
            orbit,
        }
    }

    pub fn info(&self) -> SatelliteInfo {
        SatelliteInfo {
            name: self.name.clone(),
            norad_id: self.norad_id,
            launch_id: self.launch_id.clone(),
        }
    }
}

/// Catalog listing entry
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SatelliteInfo {
    pub name: String,
    pub norad_id: u32,
    pub launch_id: String,
}

/// Satellites in load order, indexed by catalog number.
#[derive(Debug, Clone)]
pub struct Catalog<O> {
    satellites: Vec<SatelliteRecord<O>>,
    by_id: HashMap<u32, usize>,
}

impl<O> Default for Catalog<O> {
    fn default() -> Self {
        Self {
            satellites: Vec::new(),
            by_id: HashMap::new(),
        }
    }
}

impl<O> Catalog<O> {
    /// Build from records in order. A repeated catalog number keeps its first
    /// occurrence.
    pub fn from_records(records: impl IntoIterator<Item = SatelliteRecord<O>>) -> Self {
        let mut catalog = Self::default();
        for record in records {
            if catalog.by_id.contains_key(&record.norad_id) {
                log::debug!("Ignoring duplicate catalog entry {}", record.norad_id);
                continue;
            }
            catalog.by_id.insert(record.norad_id, catalog.satellites.len());
            catalog.satellites.push(record);
        }
        catalog
    }

    pub fn get(&self, norad_id: u32) -> Option<&SatelliteRecord<O>> {
        self.by_id.get(&norad_id).map(|&i| &self.satellites[i])
    }

    pub fn satellites(&self) -> &[SatelliteRecord<O>] {
        &self.satellites
    }

    pub fn len(&self) -> usize {
        self.satellites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.satellites.is_empty()
    }
}
