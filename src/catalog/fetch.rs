use std::path::Path;
use std::time::Duration;

use crate::catalog::error::CatalogError;

pub const DEFAULT_CATALOG_URL: &str =
    "https://celestrak.org/NORAD/elements/supplemental/sup-gp.php?FILE=starlink&FORMAT=tle";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(60);

/// Download the element set at `url` into `cache_path`.
///
/// The body is written to a sibling temporary file and renamed into place, so
/// an interrupted download leaves the previous cache intact.
pub async fn download_catalog(url: &str, cache_path: &Path) -> Result<u64, CatalogError> {
    log::info!("Downloading element sets from {}", url);

    let client = reqwest::Client::builder()
        .timeout(DOWNLOAD_TIMEOUT)
        .build()?;
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        return Err(CatalogError::HttpStatus(status.as_u16()));
    }

    let body = response.bytes().await?;

    if let Some(parent) = cache_path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let temp_path = cache_path.with_extension("tmp");
    tokio::fs::write(&temp_path, &body).await?;
    tokio::fs::rename(&temp_path, cache_path).await?;

    log::info!(
        "Saved {} bytes of element sets to {}",
        body.len(),
        cache_path.display()
    );
    Ok(body.len() as u64)
}
