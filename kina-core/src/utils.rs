use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Mean of a float slice tolerant of NaN holes.
///
/// NaN entries are dropped before averaging; `None` stands in for the "NA"
/// sentinel when no values remain. Infinite entries are kept and poison the
/// mean to the corresponding infinity. The one degenerate case, opposing
/// infinities whose IEEE mean is NaN, also degrades to `None`. This is the
/// single mean policy of the whole workspace; do not add a second helper
/// with different infinity handling.
///
/// # Arguments
///
/// - values: the samples to average
/// - round_to: decimal places to round the mean to, if given
///
pub fn safe_mean(values: &[f64], round_to: Option<u32>) -> Option<f64> {
    let kept: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if kept.is_empty() {
        return None;
    }

    let mean = kept.iter().sum::<f64>() / kept.len() as f64;
    if mean.is_nan() {
        return None;
    }

    match round_to {
        Some(digits) => Some(round_to_digits(mean, digits)),
        None => Some(mean),
    }
}

/// Round a value to `digits` decimal places.
pub fn round_to_digits(value: f64, digits: u32) -> f64 {
    let factor = 10f64.powi(digits as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_safe_mean_empty_is_na() {
        assert_eq!(safe_mean(&[], None), None);
    }

    #[rstest]
    fn test_safe_mean_all_nan_is_na() {
        assert_eq!(safe_mean(&[f64::NAN, f64::NAN], None), None);
    }

    #[rstest]
    fn test_safe_mean_plain() {
        assert_eq!(safe_mean(&[1.0, 2.0, 3.0], None), Some(2.0));
    }

    #[rstest]
    fn test_safe_mean_filters_nan_holes() {
        assert_eq!(safe_mean(&[1.0, f64::NAN, 3.0], None), Some(2.0));
    }

    #[rstest]
    fn test_safe_mean_rounds() {
        assert_eq!(safe_mean(&[1.0, 2.0], Some(2)), Some(1.5));
        assert_eq!(safe_mean(&[1.0, 1.0, 2.0], Some(2)), Some(1.33));
    }

    #[rstest]
    fn test_safe_mean_infinity_poisons() {
        assert_eq!(
            safe_mean(&[1.0, f64::INFINITY, 3.0], None),
            Some(f64::INFINITY)
        );
        assert_eq!(
            safe_mean(&[f64::NEG_INFINITY, 3.0], Some(2)),
            Some(f64::NEG_INFINITY)
        );
    }

    #[rstest]
    fn test_safe_mean_opposing_infinities_degrade_to_na() {
        assert_eq!(safe_mean(&[f64::INFINITY, f64::NEG_INFINITY], None), None);
    }

    #[rstest]
    fn test_round_to_digits() {
        assert_eq!(round_to_digits(4.2199, 2), 4.22);
        assert_eq!(round_to_digits(15.0, 2), 15.0);
    }
}
