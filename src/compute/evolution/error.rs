use crate::schema::ConfigError;

/// Precondition violations inside the generation loop.
///
/// These indicate a programming error (mismatched genomes, a wrongly sized
/// target, selecting before evaluating, an unvalidated config) and abort the run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvolutionError {
    #[error("Genome lengths differ: {left} vs {right}")]
    GenomeLengthMismatch { left: usize, right: usize },
    #[error("Individual has {actual} pixels but the target has {expected}")]
    TargetSizeMismatch { expected: usize, actual: usize },
    #[error("Individual {index} has no valid fitness")]
    Unevaluated { index: usize },
    #[error("Cannot select from an empty population")]
    EmptyPopulation,
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ConfigError> for EvolutionError {
    fn from(e: ConfigError) -> Self {
        EvolutionError::InvalidConfig(e.to_string())
    }
}
