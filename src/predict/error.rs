use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("Propagation error: {0}")]
    Propagation(String),
    #[error("Time outside propagation range: {0}")]
    InvalidTime(String),
    #[error("Evaluation panicked: {0}")]
    Panicked(String),
}

impl From<sgp4::Error> for PredictError {
    fn from(err: sgp4::Error) -> Self {
        PredictError::Propagation(err.to_string())
    }
}
