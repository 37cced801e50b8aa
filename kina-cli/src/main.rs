mod completeness;
mod genes;
mod sex;
mod utils;

use anyhow::Result;
use clap::Command;

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "kina";
    pub const BIN_NAME: &str = "kina";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Clinbio")
        .about("Sequencing-depth coverage and completeness for clinical samples, computed from d4 depth-index files.")
        .subcommand_required(true)
        .subcommand(completeness::cli::create_completeness_cli())
        .subcommand(genes::cli::create_genes_cli())
        .subcommand(sex::cli::create_sex_cli())
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // COMPLETENESS
        //
        Some((completeness::cli::COMPLETENESS_CMD, matches)) => {
            completeness::handlers::run_completeness(matches)?;
        }

        //
        // GENE COVERAGE
        //
        Some((genes::cli::GENES_CMD, matches)) => {
            genes::handlers::run_genes(matches)?;
        }

        //
        // SEX CHECK
        //
        Some((sex::cli::SEX_CMD, matches)) => {
            sex::handlers::run_sex(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
