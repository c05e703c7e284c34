use std::fs;
use std::path::PathBuf;

use crate::catalog::error::CatalogError;
use crate::catalog::types::{Catalog, SatelliteRecord};
use crate::ephemeris::Sgp4Orbit;

pub type Sgp4Catalog = Catalog<Sgp4Orbit>;

pub struct TleLoader {
    path: PathBuf,
}

impl TleLoader {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load every satellite from the TLE file
    pub fn load(&self) -> Result<Sgp4Catalog, CatalogError> {
        let content = fs::read_to_string(&self.path)?;
        let catalog = parse_catalog(&content)?;
        log::info!(
            "Loaded {} satellites from {}",
            catalog.len(),
            self.path.display()
        );
        if let Some(newest) = catalog.satellites().iter().map(|s| s.orbit.epoch()).max() {
            log::info!("Newest element set epoch: {}", newest);
        }
        Ok(catalog)
    }
}

/// Parse TLE text into a catalog. Entries sgp4 rejects are skipped with a
/// warning; a text with no usable entry is an error.
pub fn parse_catalog(content: &str) -> Result<Sgp4Catalog, CatalogError> {
    let mut records = Vec::new();

    for (name, line1, line2) in parse_multi_tle(content) {
        match parse_record(name, &line1, &line2) {
            Ok(record) => records.push(record),
            Err(e) => log::warn!("Skipping TLE entry: {}", e),
        }
    }

    let catalog = Catalog::from_records(records);
    if catalog.is_empty() {
        return Err(CatalogError::NoSatellites);
    }
    Ok(catalog)
}

fn parse_record(
    name: Option<String>,
    line1: &str,
    line2: &str,
) -> Result<SatelliteRecord<Sgp4Orbit>, CatalogError> {
    let label = name.clone().unwrap_or_else(|| line1.to_string());
    let invalid = |message: String| CatalogError::InvalidTle {
        name: label.clone(),
        message,
    };

    let orbit =
        Sgp4Orbit::from_tle(name.clone(), line1, line2).map_err(|e| invalid(e.to_string()))?;
    let norad_id = u32::try_from(orbit.norad_id())
        .map_err(|_| invalid(format!("catalog number {} out of range", orbit.norad_id())))?;
    let launch_id = launch_id(line1).ok_or_else(|| invalid("missing launch designator".into()))?;
    let sat_name = name.unwrap_or_else(|| format!("NORAD {}", norad_id));

    Ok(SatelliteRecord::new(norad_id, sat_name, launch_id, orbit))
}

/// Launch year and number from the international designator field of line 1,
/// without the piece letter. Satellites of one train share it.
pub fn launch_id(line1: &str) -> Option<String> {
    let field = line1.get(9..14)?.trim();
    if field.is_empty() {
        None
    } else {
        Some(field.to_string())
    }
}

/// Parse multi-satellite TLE content
fn parse_multi_tle(content: &str) -> Vec<(Option<String>, String, String)> {
    let lines: Vec<&str> = content
        .lines()
        .map(|l| l.trim_end())
        .filter(|l| !l.trim().is_empty())
        .collect();

    let mut result = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if lines[i].starts_with("1 ") && i + 1 < lines.len() && lines[i + 1].starts_with("2 ") {
            // 2-line TLE (no name)
            result.push((None, lines[i].to_string(), lines[i + 1].to_string()));
            i += 2;
        } else if i + 2 < lines.len()
            && lines[i + 1].starts_with("1 ")
            && lines[i + 2].starts_with("2 ")
        {
            // 3-line TLE, CelesTrak pads names with trailing spaces
            let name = lines[i].trim().trim_start_matches("0 ").to_string();
            result.push((Some(name), lines[i + 1].to_string(), lines[i + 2].to_string()));
            i += 3;
        } else {
            i += 1;
        }
    }

    result
}
