mod error;
mod fetch;
mod selection;
pub(crate) mod tle_loader;
mod types;

pub use error::CatalogError;
pub use fetch::{download_catalog, DEFAULT_CATALOG_URL};
pub use selection::{select, Selection};
#[cfg(test)]
pub use tle_loader::parse_catalog;
pub use tle_loader::{Sgp4Catalog, TleLoader};
pub use types::{Catalog, SatelliteInfo, SatelliteRecord};
