use clap::{Arg, ArgAction, Command};

use crate::completeness::cli::{
    DEFAULT_CHUNK_SIZE, DEFAULT_D4TOOLS, DEFAULT_THREADS, DEFAULT_THRESHOLDS,
};

pub const GENES_CMD: &str = "genes";
pub const DEFAULT_BUILD: &str = "GRCh38";
pub const DEFAULT_LEVEL: &str = "gene";

pub fn create_genes_cli() -> Command {
    Command::new(GENES_CMD)
        .author("Clinbio")
        .about("Gene-level coverage rollups, optionally split per transcript or exon.")
        .arg(
            Arg::new("d4")
                .long("d4")
                .help("Sample depth track as name=path; repeat for more samples")
                .action(ArgAction::Append)
                .required(true),
        )
        .arg(
            Arg::new("store")
                .long("store")
                .help("Interval annotation file (gene/transcript/exon rows)")
                .required(true),
        )
        .arg(
            Arg::new("build")
                .long("build")
                .help("Reference genome build the store is queried in")
                .default_value(DEFAULT_BUILD),
        )
        .arg(
            Arg::new("level")
                .long("level")
                .help("Rollup granularity: gene, transcript or exon")
                .default_value(DEFAULT_LEVEL),
        )
        .arg(
            Arg::new("ensembl-ids")
                .long("ensembl-ids")
                .help("Comma-joined Ensembl gene ids"),
        )
        .arg(
            Arg::new("hgnc-ids")
                .long("hgnc-ids")
                .help("Comma-joined numeric HGNC ids"),
        )
        .arg(
            Arg::new("hgnc-symbols")
                .long("hgnc-symbols")
                .help("Comma-joined HGNC gene symbols"),
        )
        .arg(
            Arg::new("tags")
                .long("tags")
                .help("Keep only children carrying every listed tag"),
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
