//! Typed access to an external d4tools-compatible depth-index executable.
//!
//! The tool is opaque: it takes a depth-index file plus region specifiers
//! and prints whitespace-delimited statistic rows. Anything it prints that
//! does not parse, or any nonzero exit, is a hard failure here; partial
//! output is never trusted.

pub mod errors;

pub use errors::DepthQueryError;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::NamedTempFile;

use kina_core::models::GenomicInterval;

/// One run-length row of a depth track: every base in [start, stop) sits at `depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthSpan {
    pub chromosome: String,
    pub start: u32,
    pub stop: u32,
    pub depth: u32,
}

///
/// Query surface of the external depth-index tool.
///
/// [D4tools] is the production implementation; tests substitute in-memory
/// tracks behind the same trait.
///
pub trait DepthQuery {
    /// Mean depth for every interval, aligned to input order.
    fn mean_coverage(
        &self,
        file: &Path,
        intervals: &[GenomicInterval],
    ) -> Result<Vec<f64>, DepthQueryError>;

    /// Mean depth per chromosome, filtered to the requested names.
    fn chromosome_means(
        &self,
        file: &Path,
        chromosomes: &[String],
    ) -> Result<Vec<(String, f64)>, DepthQueryError>;

    /// Run-length depth track across one interval.
    fn depth_lines(
        &self,
        file: &Path,
        interval: &GenomicInterval,
    ) -> Result<Vec<DepthSpan>, DepthQueryError>;
}

///
/// Wrapper around the `d4tools` executable.
///
/// The binary path is configurable so deployments can pin a specific build;
/// the depth-index file itself is read-only and safe to hit from several
/// invocations at once.
///
#[derive(Debug, Clone)]
pub struct D4tools {
    binary: PathBuf,
}

impl Default for D4tools {
    fn default() -> Self {
        D4tools::new("d4tools")
    }
}

impl D4tools {
    pub fn new<P: Into<PathBuf>>(binary: P) -> Self {
        D4tools {
            binary: binary.into(),
        }
    }

    /// Run the tool, returning captured stdout or the failure verbatim.
    fn run(&self, args: &[&str]) -> Result<String, DepthQueryError> {
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|source| DepthQueryError::Spawn {
                binary: self.binary.display().to_string(),
                source,
            })?;

        if !output.status.success() {
            return Err(DepthQueryError::NonZeroExit {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl DepthQuery for D4tools {
    fn mean_coverage(
        &self,
        file: &Path,
        intervals: &[GenomicInterval],
    ) -> Result<Vec<f64>, DepthQueryError> {
        if intervals.is_empty() {
            return Ok(Vec::new());
        }

        // the tool takes batched regions as a BED file on disk
        let mut region_file = NamedTempFile::new()?;
        for interval in intervals {
            writeln!(
                region_file,
                "{}\t{}\t{}",
                interval.chromosome, interval.start, interval.stop
            )?;
        }
        region_file.flush()?;

        let file = file.display().to_string();
        let regions = region_file.path().display().to_string();
        let stdout = self.run(&["stat", "-s", "mean", &file, "--region", &regions])?;

        let rows = output_rows(&stdout);
        if rows.len() != intervals.len() {
            return Err(DepthQueryError::RowCountMismatch {
                expected: intervals.len(),
                got: rows.len(),
            });
        }

        rows.iter()
            .map(|row| parse_stat_row(row).map(|(_, _, _, mean)| mean))
            .collect()
    }

    fn chromosome_means(
        &self,
        file: &Path,
        chromosomes: &[String],
    ) -> Result<Vec<(String, f64)>, DepthQueryError> {
        let file = file.display().to_string();
        let stdout = self.run(&["stat", "-s", "mean", &file])?;

        let mut means: Vec<(String, f64)> = Vec::new();
        for row in output_rows(&stdout) {
            let (chromosome, _, _, mean) = parse_stat_row(row)?;
            if chromosomes.contains(&chromosome) {
                means.push((chromosome, mean));
            }
        }
        Ok(means)
    }

    fn depth_lines(
        &self,
        file: &Path,
        interval: &GenomicInterval,
    ) -> Result<Vec<DepthSpan>, DepthQueryError> {
        let file = file.display().to_string();
        let region = interval.region();
        let stdout = self.run(&["view", &file, &region])?;

        output_rows(&stdout)
            .iter()
            .map(|row| parse_depth_row(row))
            .collect()
    }
}

/// Stdout split into rows; a single trailing run of blank lines is dropped.
/// Blank rows anywhere else fall through to the row parsers and fail there.
fn output_rows(stdout: &str) -> Vec<&str> {
    let mut rows: Vec<&str> = stdout.lines().collect();
    while rows.last().is_some_and(|row| row.trim().is_empty()) {
        rows.pop();
    }
    rows
}

/// Parse one `chrom start stop mean` statistic row.
fn parse_stat_row(row: &str) -> Result<(String, u32, u32, f64), DepthQueryError> {
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(DepthQueryError::MalformedRow(row.to_string()));
    }

    let start: u32 = fields[1]
        .parse()
        .map_err(|_| DepthQueryError::MalformedRow(row.to_string()))?;
    let stop: u32 = fields[2]
        .parse()
        .map_err(|_| DepthQueryError::MalformedRow(row.to_string()))?;
    let mean: f64 = fields[3]
        .parse()
        .map_err(|_| DepthQueryError::MalformedRow(row.to_string()))?;

    Ok((fields[0].to_string(), start, stop, mean))
}

/// Parse one `chrom start stop depth` run-length depth row.
fn parse_depth_row(row: &str) -> Result<DepthSpan, DepthQueryError> {
    let fields: Vec<&str> = row.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(DepthQueryError::MalformedRow(row.to_string()));
    }

    let start: u32 = fields[1]
        .parse()
        .map_err(|_| DepthQueryError::MalformedRow(row.to_string()))?;
    let stop: u32 = fields[2]
        .parse()
        .map_err(|_| DepthQueryError::MalformedRow(row.to_string()))?;
    let depth: u32 = fields[3]
        .parse()
        .map_err(|_| DepthQueryError::MalformedRow(row.to_string()))?;

    Ok(DepthSpan {
        chromosome: fields[0].to_string(),
        start,
        stop,
        depth,
    })
}
