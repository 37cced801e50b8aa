use std::path::Path;

use kina_core::models::{Sex, SexMetrics};
use kina_d4::DepthQuery;

use crate::errors::CoverageError;

///
/// Call sample sex from sex-chromosome mean coverage.
///
/// Male samples carry one copy of X and Y each, so their coverage ratio
/// sits near 1; female samples only pick up residual Y noise, pushing the
/// ratio very high. The band (12, 100) is ambiguous. At 100 and above the
/// Y signal is treated as noise and the call is female.
///
/// Boundary comparisons are part of the contract: a ratio of exactly 12 is
/// male, a ratio of exactly 100 is female.
///
pub fn predict_sex(x_coverage: f64, y_coverage: f64) -> Sex {
    if y_coverage == 0.0 {
        Sex::Female
    } else {
        let ratio = x_coverage / y_coverage;
        if x_coverage == 0.0 || (12.0 < ratio && ratio < 100.0) {
            Sex::Unknown
        } else if ratio <= 12.0 {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

///
/// Mean X/Y coverage for one depth track plus the sex call derived from it.
///
/// A chromosome missing from the track reports coverage 0.0 rather than
/// failing; the predictor's zero branches handle that case.
///
pub fn sex_metrics<D: DepthQuery>(
    depth: &D,
    file: &Path,
    x_chromosome: &str,
    y_chromosome: &str,
) -> Result<SexMetrics, CoverageError> {
    let requested = vec![x_chromosome.to_string(), y_chromosome.to_string()];
    let means = depth.chromosome_means(file, &requested)?;

    let coverage_of = |name: &str| {
        means
            .iter()
            .find(|(chromosome, _)| chromosome == name)
            .map(|(_, mean)| *mean)
            .unwrap_or(0.0)
    };

    let x_coverage = coverage_of(x_chromosome);
    let y_coverage = coverage_of(y_chromosome);

    Ok(SexMetrics {
        x_coverage,
        y_coverage,
        predicted_sex: predict_sex(x_coverage, y_coverage),
    })
}
