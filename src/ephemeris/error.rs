use thiserror::Error;

#[derive(Debug, Error)]
pub enum OrbitError {
    #[error("invalid tle: {0}")]
    Tle(#[from] sgp4::TleError),
    #[error("elements error: {0}")]
    Elements(#[from] sgp4::ElementsError),
}
