use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Download failed: {0}")]
    Download(#[from] reqwest::Error),
    #[error("Download failed with HTTP status {0}")]
    HttpStatus(u16),
    #[error("Invalid TLE for {name}: {message}")]
    InvalidTle { name: String, message: String },
    #[error("No satellites loaded")]
    NoSatellites,
}
