use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use fxhash::FxHashMap;
use rayon::prelude::*;

use kina_core::models::GenomicInterval;
use kina_d4::{DepthQuery, DepthSpan};

use crate::errors::CoverageError;

/// Batch bound used when the caller has no preference. Purely a performance
/// knob: results are identical for any valid chunk size.
pub const DEFAULT_CHUNK_SIZE: usize = 100;

/// interval id -> depth threshold -> covered fraction in [0, 1]
pub type CompletenessResult = FxHashMap<String, BTreeMap<u32, f64>>;

///
/// Compute per-threshold completeness for every interval, fanning batches
/// out over the rayon pool.
///
/// The interval list is split into consecutive, order-preserving chunks;
/// each chunk queries the depth tool independently and owns its local
/// accumulator until the final merge, which runs after all workers have
/// joined. Chunks partition ids disjointly, so the merge is conflict-free;
/// a repeated id is a caller-side integrity violation and is rejected up
/// front instead of being silently resolved.
///
/// Any batch failure fails the whole computation: the fallible collect
/// stops scheduling sibling batches after the first error and no partial
/// result ever escapes.
///
pub fn completeness_by_interval<D: DepthQuery + Sync>(
    depth: &D,
    file: &Path,
    intervals: &[GenomicInterval],
    thresholds: &[u32],
    chunk_size: usize,
) -> Result<CompletenessResult, CoverageError> {
    if thresholds.is_empty() {
        return Err(CoverageError::NoThresholds);
    }
    if chunk_size == 0 {
        return Err(CoverageError::InvalidChunkSize(chunk_size));
    }

    let mut seen: HashSet<&str> = HashSet::with_capacity(intervals.len());
    for interval in intervals {
        if !seen.insert(interval.id.as_str()) {
            return Err(CoverageError::DuplicateIntervalId(interval.id.clone()));
        }
    }

    let partials: Vec<CompletenessResult> = intervals
        .par_chunks(chunk_size)
        .map(|batch| batch_completeness(depth, file, batch, thresholds))
        .collect::<Result<Vec<_>, CoverageError>>()?;

    let mut merged: CompletenessResult = FxHashMap::default();
    for partial in partials {
        merged.extend(partial);
    }
    Ok(merged)
}

/// One worker: completeness for every interval of a single batch.
fn batch_completeness<D: DepthQuery>(
    depth: &D,
    file: &Path,
    batch: &[GenomicInterval],
    thresholds: &[u32],
) -> Result<CompletenessResult, CoverageError> {
    let mut local: CompletenessResult = FxHashMap::default();
    for interval in batch {
        let spans = depth.depth_lines(file, interval)?;
        local.insert(
            interval.id.clone(),
            interval_completeness(interval, &spans, thresholds),
        );
    }
    Ok(local)
}

///
/// Fraction of the interval sitting at or above each threshold.
///
/// Track rows are clamped to the interval bounds so a row flanking the
/// region edge can never push a fraction past 1.
///
fn interval_completeness(
    interval: &GenomicInterval,
    spans: &[DepthSpan],
    thresholds: &[u32],
) -> BTreeMap<u32, f64> {
    let length = interval.length() as f64;
    let mut covered: BTreeMap<u32, u64> = thresholds.iter().map(|t| (*t, 0u64)).collect();

    for span in spans {
        let start = span.start.max(interval.start);
        let stop = span.stop.min(interval.stop);
        if start >= stop {
            continue;
        }
        let width = (stop - start) as u64;
        for (threshold, bases) in covered.iter_mut() {
            if span.depth >= *threshold {
                *bases += width;
            }
        }
    }

    covered
        .into_iter()
        .map(|(threshold, bases)| (threshold, bases as f64 / length))
        .collect()
}
