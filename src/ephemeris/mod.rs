mod darkness;
mod error;
pub mod geometry;
pub(crate) mod orbit;
mod propagator;
pub mod sun;

pub use darkness::SolarDarkness;
pub use orbit::Sgp4Orbit;
pub use propagator::Sgp4Propagator;
