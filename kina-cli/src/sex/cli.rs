use clap::{Arg, ArgAction, Command};

use crate::completeness::cli::DEFAULT_D4TOOLS;

pub const SEX_CMD: &str = "sex";
pub const DEFAULT_X_CHROM: &str = "X";
pub const DEFAULT_Y_CHROM: &str = "Y";

pub fn create_sex_cli() -> Command {
    Command::new(SEX_CMD)
        .author("Clinbio")
        .about("Predict sample sex from sex-chromosome mean coverage.")
        .arg(
            Arg::new("d4")
                .long("d4")
                .help("Sample depth track as name=path; repeat for more samples")
                .action(ArgAction::Append)
                .required(true),
        )
        .arg(
            Arg::new("x-chrom")
                .long("x-chrom")
                .help("Name of the X chromosome in the depth track")
                .default_value(DEFAULT_X_CHROM),
        )
        .arg(
            Arg::new("y-chrom")
                .long("y-chrom")
                .help("Name of the Y chromosome in the depth track")
                .default_value(DEFAULT_Y_CHROM),
        )
        .arg(
            Arg::new("d4tools")
                .long("d4tools")
                .help("Path to the d4tools executable")
                .default_value(DEFAULT_D4TOOLS),
        )
}
