use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Interval line has fewer than 3 tab-separated fields: {0}")]
    MissingFields(String),

    #[error("Error parsing start position in line: {0}")]
    InvalidStart(String),

    #[error("Error parsing stop position in line: {0}")]
    InvalidStop(String),

    #[error("Malformed region string (expected chrom:start-stop): {0}")]
    MalformedRegion(String),

    #[error("Interval {0} has an empty chromosome name")]
    EmptyChromosome(String),

    #[error("Interval {id} has start {start} not below stop {stop}")]
    CoordinateOrder { id: String, start: u32, stop: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
