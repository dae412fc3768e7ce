use crate::fixtures::FixtureError;
use crate::generator::GeneratorError;
use crate::loader::LoadError;

/// Errors that abort a pipeline run before anything is timed
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The dataset parameters are invalid
    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    /// A fixture could not be written or verified
    #[error("Fixture error: {0}")]
    Fixture(#[from] FixtureError),

    /// The strategy selection names an unknown strategy
    #[error("Strategy selection error: {0}")]
    Strategy(#[from] LoadError),

    /// A harness parameter is out of range
    #[error("Invalid parameter {name}: must be at least 1, got {value}")]
    InvalidParameter {
        /// Name of the parameter
        name: &'static str,
        /// Rejected value
        value: usize,
    },
}
