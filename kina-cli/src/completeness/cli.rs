use clap::{Arg, ArgAction, Command};

pub const COMPLETENESS_CMD: &str = "completeness";
pub const DEFAULT_THRESHOLDS: &str = "10,15,20,50,100";
pub const DEFAULT_CHUNK_SIZE: &str = "100";
pub const DEFAULT_THREADS: &str = "4";
pub const DEFAULT_D4TOOLS: &str = "d4tools";

pub fn create_completeness_cli() -> Command {
    Command::new(COMPLETENESS_CMD)
        .author("Clinbio")
        .about("Per-interval completeness fractions over one or more depth tracks.")
        .arg(
            Arg::new("d4")
                .long("d4")
                .help("Sample depth track as name=path; repeat for more samples")
                .action(ArgAction::Append)
                .required(true),
        )
        .arg(
            Arg::new("bed")
                .long("bed")
                .help("BED-like file with the intervals to assess"),
        )
        .arg(
            Arg::new("regions")
                .long("regions")
                .help("Comma-joined chrom:start-stop region strings"),
        )
        .arg(
            Arg::new("thresholds")
                .long("thresholds")
                .help("Comma-joined depth thresholds")
                .default_value(DEFAULT_THRESHOLDS),
        )
        .arg(
            Arg::new("chunksize")
                .long("chunksize")
                .help("Intervals per parallel batch; a performance knob only")
                .value_parser(clap::value_parser!(usize))
                .default_value(DEFAULT_CHUNK_SIZE),
        )
        .arg(
            Arg::new("threads")
                .long("threads")
                .help("Worker threads for the batch fan-out")
                .value_parser(clap::value_parser!(usize))
                .default_value(DEFAULT_THREADS),
        )
        .arg(
            Arg::new("d4tools")
                .long("d4tools")
                .help("Path to the d4tools executable")
                .default_value(DEFAULT_D4TOOLS),
        )
}
