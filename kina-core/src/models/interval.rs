use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

///
/// GenomicInterval struct, one half-open interval [start, stop) on a chromosome
///
/// `id` is the stable key the interval is reported under: an Ensembl
/// identifier when one is known, otherwise the `chrom:start-stop` rendering.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone, Serialize, Deserialize)]
pub struct GenomicInterval {
    pub id: String,
    pub chromosome: String,
    pub start: u32,
    pub stop: u32,
}

impl GenomicInterval {
    ///
    /// Build an interval, rejecting empty chromosome names and start >= stop
    ///
    pub fn new(id: String, chromosome: String, start: u32, stop: u32) -> Result<Self, ParseError> {
        if chromosome.is_empty() {
            return Err(ParseError::EmptyChromosome(id));
        }
        if start >= stop {
            return Err(ParseError::CoordinateOrder { id, start, stop });
        }
        Ok(GenomicInterval {
            id,
            chromosome,
            start,
            stop,
        })
    }

    /// Interval length in base pairs.
    pub fn length(&self) -> u64 {
        (self.stop - self.start) as u64
    }

    ///
    /// Render the interval as a region specifier understood by the depth tool
    ///
    pub fn region(&self) -> String {
        format!("{}:{}-{}", self.chromosome, self.start, self.stop)
    }

    ///
    /// Get BED line of the interval (id in the name column)
    ///
    pub fn as_bed_line(&self) -> String {
        format!(
            "{}\t{}\t{}\t{}",
            self.chromosome, self.start, self.stop, self.id
        )
    }
}

impl FromStr for GenomicInterval {
    type Err = ParseError;

    /// Parse a `chrom:start-stop` region string; the whole string becomes the id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (chromosome, range) = s
            .split_once(':')
            .ok_or_else(|| ParseError::MalformedRegion(s.to_string()))?;
        let (start, stop) = range
            .split_once('-')
            .ok_or_else(|| ParseError::MalformedRegion(s.to_string()))?;

        let start: u32 = start
            .parse()
            .map_err(|_| ParseError::MalformedRegion(s.to_string()))?;
        let stop: u32 = stop
            .parse()
            .map_err(|_| ParseError::MalformedRegion(s.to_string()))?;

        GenomicInterval::new(s.to_string(), chromosome.to_string(), start, stop)
    }
}

impl Display for GenomicInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.region())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    fn test_length_and_region() {
        let interval =
            GenomicInterval::new("IVL1".to_string(), "chr1".to_string(), 100, 200).unwrap();
        assert_eq!(interval.length(), 100);
        assert_eq!(interval.region(), "chr1:100-200");
        assert_eq!(interval.as_bed_line(), "chr1\t100\t200\tIVL1");
    }

    #[rstest]
    fn test_rejects_empty_chromosome() {
        let result = GenomicInterval::new("x".to_string(), "".to_string(), 1, 2);
        assert!(matches!(result, Err(ParseError::EmptyChromosome(_))));
    }

    #[rstest]
    #[case(200, 100)]
    #[case(100, 100)]
    fn test_rejects_coordinate_order(#[case] start: u32, #[case] stop: u32) {
        let result = GenomicInterval::new("x".to_string(), "chr1".to_string(), start, stop);
        assert!(matches!(result, Err(ParseError::CoordinateOrder { .. })));
    }

    #[rstest]
    fn test_parse_region_string() {
        let interval: GenomicInterval = "chrX:10-20".parse().unwrap();
        assert_eq!(interval.id, "chrX:10-20");
        assert_eq!(interval.chromosome, "chrX");
        assert_eq!(interval.start, 10);
        assert_eq!(interval.stop, 20);
    }

    #[rstest]
    #[case("chr1")]
    #[case("chr1:100")]
    #[case("chr1:abc-200")]
    fn test_parse_region_string_malformed(#[case] raw: &str) {
        let result: Result<GenomicInterval, _> = raw.parse();
        assert!(matches!(result, Err(ParseError::MalformedRegion(_))));
    }
}
