use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("dimension mismatch: pattern has {pattern} matching dimensions, point set has {point_set}")]
    DimensionMismatch { pattern: usize, point_set: usize },

    #[error("search interrupted by caller")]
    Interrupted,
}

pub type Result<T> = std::result::Result<T, Error>;
