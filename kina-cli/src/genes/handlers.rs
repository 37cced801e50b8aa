use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Result, bail};
use clap::ArgMatches;
use indicatif::ProgressBar;

use kina_core::models::{CoverageSummary, IntervalKind};
use kina_coverage::{Build, CoverageError, GeneFilter, IntervalStore, TsvIntervalStore, gene_coverage};
use kina_d4::D4tools;

use crate::utils::{parse_csv, parse_samples, parse_thresholds};

/// Matches items from CLAP args before running the gene rollup
pub fn run_genes(matches: &ArgMatches) -> Result<()> {
    let specs: Vec<String> = matches
        .get_many::<String>("d4")
        .expect("at least one --d4 sample is required")
        .cloned()
        .collect();
    let samples = parse_samples(&specs)?;

    let store_path = matches
        .get_one::<String>("store")
        .expect("store path is required");
    let build: Build = matches
        .get_one::<String>("build")
        .expect("build has a default")
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;
    let level: IntervalKind = matches
        .get_one::<String>("level")
        .expect("level has a default")
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))?;

    let filter = gene_filter(matches)?;
    let tags: Vec<String> = matches
        .get_one::<String>("tags")
        .map(|raw| parse_csv(raw))
        .unwrap_or_default();

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

    let store = TsvIntervalStore::from_path(Path::new(store_path))?;
    let genes = store.genes(build, &filter)?;
    if genes.is_empty() {
        return Err(CoverageError::EmptyStore.into());
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()?;

    let bar = ProgressBar::new(samples.len() as u64);

    let mut report: BTreeMap<String, Vec<CoverageSummary>> = BTreeMap::new();
    for (name, path) in &samples {
        bar.inc(1);
        let summaries = pool.install(|| {
            gene_coverage(
                &runner, &store, path, build, &genes, level, &thresholds, &tags, chunk_size,
            )
        })?;
        report.insert(name.clone(), summaries);
    }
    bar.finish_and_clear();

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Exactly one of the three identifier flags picks the gene set.
fn gene_filter(matches: &ArgMatches) -> Result<GeneFilter> {
    let ensembl = matches.get_one::<String>("ensembl-ids");
    let hgnc_ids = matches.get_one::<String>("hgnc-ids");
    let symbols = matches.get_one::<String>("hgnc-symbols");

    match (ensembl, hgnc_ids, symbols) {
        (Some(raw), None, None) => Ok(GeneFilter::EnsemblIds(parse_csv(raw))),
        (None, Some(raw), None) => {
            let ids = parse_csv(raw)
                .iter()
                .map(|id| {
                    id.parse::<u32>()
                        .map_err(|_| anyhow::anyhow!("Invalid HGNC id: {}", id))
                })
                .collect::<Result<Vec<u32>>>()?;
            Ok(GeneFilter::HgncIds(ids))
        }
        (None, None, Some(raw)) => Ok(GeneFilter::HgncSymbols(parse_csv(raw))),
        _ => bail!("Pass exactly one of --ensembl-ids, --hgnc-ids, --hgnc-symbols"),
    }
}
