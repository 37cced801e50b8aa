use std::process::ExitStatus;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DepthQueryError {
    #[error("Can't launch depth tool {binary}: {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Depth tool exited with {status}: {stderr}")]
    NonZeroExit { status: ExitStatus, stderr: String },

    #[error("Malformed depth tool output row: {0}")]
    MalformedRow(String),

    #[error("Depth tool returned {got} statistic rows for {expected} regions")]
    RowCountMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
