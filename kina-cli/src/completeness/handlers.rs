use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, bail};
use clap::ArgMatches;

use kina_core::models::{GenomicInterval, IntervalSet};
use kina_coverage::completeness_by_interval;
use kina_d4::D4tools;

use crate::utils::{parse_samples, parse_thresholds};

/// Matches items from CLAP args before running the completeness computation
pub fn run_completeness(matches: &ArgMatches) -> Result<()> {
    let specs: Vec<String> = matches
        .get_many::<String>("d4")
        .expect("at least one --d4 sample is required")
        .cloned()
        .collect();
    let samples = parse_samples(&specs)?;

    let mut intervals: Vec<GenomicInterval> = Vec::new();
    if let Some(bed) = matches.get_one::<String>("bed") {
        intervals.extend(IntervalSet::try_from(Path::new(bed))?.intervals);
    }
    if let Some(regions) = matches.get_one::<String>("regions") {
        for region in regions.split(',') {
            intervals.push(region.trim().parse()?);
        }
    }
    if intervals.is_empty() {
        bail!("No intervals to assess: pass --bed and/or --regions");
    }

    let thresholds = parse_thresholds(
        matches
            .get_one::<String>("thresholds")
            .expect("thresholds has a default"),
    )?;
    let chunk_size = *matches
        .get_one::<usize>("chunksize")
        .expect("chunksize has a default");
    let threads = *matches
        .get_one::<usize>("threads")
        .expect("threads has a default");
    let runner = D4tools::new(
        matches
            .get_one::<String>("d4tools")
            .expect("d4tools has a default")
            .as_str(),
    );

    // Must create a Rayon thread pool in which to run the batch fan-out
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    let mut report: BTreeMap<String, BTreeMap<String, BTreeMap<u32, f64>>> = BTreeMap::new();
    for (name, path) in &samples {
        let result = pool.install(|| {
            completeness_by_interval(&runner, path, &intervals, &thresholds, chunk_size)
        })?;
        report.insert(name.clone(), result.into_iter().collect());
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
