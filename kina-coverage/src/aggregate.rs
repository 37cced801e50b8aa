use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use kina_core::models::{CoverageSummary, GenomicInterval, IntervalKind};
use kina_core::utils::safe_mean;
use kina_d4::DepthQuery;

use crate::completeness::{CompletenessResult, completeness_by_interval};
use crate::errors::CoverageError;
use crate::store::{Build, Gene, IntervalStore};

///
/// Roll depth coverage up to one [CoverageSummary] per gene.
///
/// At gene granularity the gene's own coordinates are the unit. At
/// transcript/exon granularity the children come from the interval store,
/// are de-duplicated by id, and the gene numbers are the unweighted
/// arithmetic means of the child numbers. Deliberately not length-weighted:
/// a short exon counts as much as a long one.
///
/// The first error aborts the whole rollup; no partial per-gene output is
/// ever returned.
///
#[allow(clippy::too_many_arguments)]
pub fn gene_coverage<D: DepthQuery + Sync, S: IntervalStore>(
    depth: &D,
    store: &S,
    file: &Path,
    build: Build,
    genes: &[Gene],
    kind: IntervalKind,
    thresholds: &[u32],
    tags: &[String],
    chunk_size: usize,
) -> Result<Vec<CoverageSummary>, CoverageError> {
    match kind {
        IntervalKind::Gene => gene_level(depth, file, genes, thresholds, chunk_size),
        IntervalKind::Transcript | IntervalKind::Exon => child_level(
            depth, store, file, build, genes, kind, thresholds, tags, chunk_size,
        ),
    }
}

fn gene_level<D: DepthQuery + Sync>(
    depth: &D,
    file: &Path,
    genes: &[Gene],
    thresholds: &[u32],
    chunk_size: usize,
) -> Result<Vec<CoverageSummary>, CoverageError> {
    let intervals: Vec<GenomicInterval> = genes.iter().map(|g| g.interval.clone()).collect();

    let means = depth.mean_coverage(file, &intervals)?;
    let mut fractions = completeness_by_interval(depth, file, &intervals, thresholds, chunk_size)?;

    let summaries = genes
        .iter()
        .zip(means)
        .map(|(gene, mean_coverage)| CoverageSummary {
            id: gene.interval.id.clone(),
            hgnc_id: gene.hgnc_id,
            hgnc_symbol: gene.hgnc_symbol.clone(),
            mean_coverage,
            completeness: fractions.remove(&gene.interval.id).unwrap_or_default(),
            children: None,
        })
        .collect();
    Ok(summaries)
}

#[allow(clippy::too_many_arguments)]
fn child_level<D: DepthQuery + Sync, S: IntervalStore>(
    depth: &D,
    store: &S,
    file: &Path,
    build: Build,
    genes: &[Gene],
    kind: IntervalKind,
    thresholds: &[u32],
    tags: &[String],
    chunk_size: usize,
) -> Result<Vec<CoverageSummary>, CoverageError> {
    let mut summaries: Vec<CoverageSummary> = Vec::with_capacity(genes.len());

    // genes run sequentially; each gene's batch fan-out keeps its own key space
    for gene in genes {
        let children = dedup_by_id(store.children_of(build, gene, kind, tags)?);

        if children.is_empty() {
            // zero resolvable children: coverage 0, completeness map stays
            // empty rather than zero-filled per threshold
            summaries.push(CoverageSummary {
                id: gene.interval.id.clone(),
                hgnc_id: gene.hgnc_id,
                hgnc_symbol: gene.hgnc_symbol.clone(),
                mean_coverage: 0.0,
                completeness: BTreeMap::new(),
                children: Some(Vec::new()),
            });
            continue;
        }

        let means = depth.mean_coverage(file, &children)?;
        let mut fractions =
            completeness_by_interval(depth, file, &children, thresholds, chunk_size)?;

        let child_summaries: Vec<CoverageSummary> = children
            .iter()
            .zip(&means)
            .map(|(child, mean_coverage)| CoverageSummary {
                id: child.id.clone(),
                hgnc_id: None,
                hgnc_symbol: None,
                mean_coverage: *mean_coverage,
                completeness: fractions.remove(&child.id).unwrap_or_default(),
                children: None,
            })
            .collect();

        summaries.push(CoverageSummary {
            id: gene.interval.id.clone(),
            hgnc_id: gene.hgnc_id,
            hgnc_symbol: gene.hgnc_symbol.clone(),
            mean_coverage: safe_mean(&means, None).unwrap_or(0.0),
            completeness: mean_completeness(&child_summaries, thresholds),
            children: Some(child_summaries),
        });
    }

    Ok(summaries)
}

/// Drop later children repeating an id already seen, keeping store order.
fn dedup_by_id(children: Vec<GenomicInterval>) -> Vec<GenomicInterval> {
    let mut seen: HashSet<String> = HashSet::with_capacity(children.len());
    children
        .into_iter()
        .filter(|child| seen.insert(child.id.clone()))
        .collect()
}

/// Unweighted mean of child fractions, per threshold.
fn mean_completeness(children: &[CoverageSummary], thresholds: &[u32]) -> BTreeMap<u32, f64> {
    thresholds
        .iter()
        .map(|threshold| {
            let fractions: Vec<f64> = children
                .iter()
                .filter_map(|child| child.completeness.get(threshold).copied())
                .collect();
            (*threshold, safe_mean(&fractions, None).unwrap_or(0.0))
        })
        .collect()
}

///
/// Share of intervals whose completeness reaches 1.0 at `threshold`.
///
pub fn fraction_fully_covered(result: &CompletenessResult, threshold: u32) -> f64 {
    if result.is_empty() {
        return 0.0;
    }
    let full = result
        .values()
        .filter(|fractions| fractions.get(&threshold).copied().unwrap_or(0.0) >= 1.0)
        .count();
    full as f64 / result.len() as f64
}
