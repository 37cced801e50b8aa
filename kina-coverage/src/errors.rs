use thiserror::Error;

use kina_core::errors::ParseError;
use kina_d4::DepthQueryError;

#[derive(Error, Debug)]
pub enum CoverageError {
    #[error("No completeness thresholds supplied")]
    NoThresholds,

    #[error("Chunk size must be at least 1, got {0}")]
    InvalidChunkSize(usize),

    #[error("Duplicate interval id reached the completeness computer: {0}")]
    DuplicateIntervalId(String),

    #[error("No genes matched the requested filter")]
    EmptyStore,

    #[error("Malformed interval store line: {0}")]
    MalformedStoreLine(String),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    DepthQuery(#[from] DepthQueryError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
