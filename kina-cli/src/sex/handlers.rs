use std::collections::BTreeMap;

use anyhow::Result;
use clap::ArgMatches;

use kina_core::models::SexMetrics;
use kina_coverage::sex_metrics;
use kina_d4::D4tools;

use crate::utils::parse_samples;

/// Matches items from CLAP args before running the sex check
pub fn run_sex(matches: &ArgMatches) -> Result<()> {
    let specs: Vec<String> = matches
        .get_many::<String>("d4")
        .expect("at least one --d4 sample is required")
        .cloned()
        .collect();
    let samples = parse_samples(&specs)?;

    let x_chromosome = matches
        .get_one::<String>("x-chrom")
        .expect("x-chrom has a default");
    let y_chromosome = matches
        .get_one::<String>("y-chrom")
        .expect("y-chrom has a default");
    let runner = D4tools::new(
        matches
            .get_one::<String>("d4tools")
            .expect("d4tools has a default")
            .as_str(),
    );

    let mut report: BTreeMap<String, SexMetrics> = BTreeMap::new();
    for (name, path) in &samples {
        let metrics = sex_metrics(&runner, path, x_chromosome, y_chromosome)?;
        report.insert(name.clone(), metrics);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
