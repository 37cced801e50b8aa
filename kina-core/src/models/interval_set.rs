use std::fmt::{self, Display};
use std::fs::File;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::errors::ParseError;
use crate::models::GenomicInterval;
use crate::utils::get_dynamic_reader;

///
/// IntervalSet struct, the parsed representation of a BED-like interval file.
///
/// Input order is preserved: downstream merges are keyed by id, but a
/// deterministic order keeps reserialization and test output stable.
///
#[derive(Clone, Debug, PartialEq)]
pub struct IntervalSet {
    pub intervals: Vec<GenomicInterval>,
}

pub struct IntervalSetIterator<'a> {
    interval_set: &'a IntervalSet,
    index: usize,
}

impl IntervalSet {
    ///
    /// Parse a BED-like byte stream into an ordered interval list.
    ///
    /// Blank lines and lines starting with `#` are skipped. A data line
    /// needs at least 3 tab-separated fields with integer start/stop; the
    /// 4th column, when present, supplies the interval id.
    ///
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        let mut intervals: Vec<GenomicInterval> = Vec::new();

        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            intervals.push(Self::parse_line(line)?);
        }

        Ok(IntervalSet { intervals })
    }

    fn parse_line(line: &str) -> Result<GenomicInterval, ParseError> {
        let parts: Vec<&str> = line.split('\t').collect();
        if parts.len() < 3 {
            return Err(ParseError::MissingFields(line.to_string()));
        }

        let start: u32 = parts[1]
            .parse()
            .map_err(|_| ParseError::InvalidStart(line.to_string()))?;
        let stop: u32 = parts[2]
            .parse()
            .map_err(|_| ParseError::InvalidStop(line.to_string()))?;

        let id = parts
            .get(3)
            .filter(|name| !name.is_empty())
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("{}:{}-{}", parts[0], start, stop));

        GenomicInterval::new(id, parts[0].to_string(), start, stop)
    }

    ///
    /// Serialize back to BED text, preserving order and values
    ///
    pub fn as_bed_string(&self) -> String {
        let mut buffer = String::new();
        for interval in &self.intervals {
            buffer.push_str(&interval.as_bed_line());
            buffer.push('\n');
        }
        buffer
    }

    ///
    /// Save the interval set to disk as a bed file
    ///
    /// # Arguments
    /// - path: the path to the file to dump to
    pub fn to_bed<T: AsRef<Path>>(&self, path: T) -> std::io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut file = File::create(path)?;
        file.write_all(self.as_bed_string().as_bytes())?;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }
}

impl TryFrom<&Path> for IntervalSet {
    type Error = ParseError;

    ///
    /// Create a new [IntervalSet] from a bed file on disk (gz-aware).
    ///
    fn try_from(value: &Path) -> Result<Self, ParseError> {
        let reader = get_dynamic_reader(value)
            .map_err(|e| std::io::Error::other(format!("{:#}", e)))?;
        IntervalSet::from_reader(reader)
    }
}

impl TryFrom<PathBuf> for IntervalSet {
    type Error = ParseError;

    fn try_from(value: PathBuf) -> Result<Self, ParseError> {
        IntervalSet::try_from(value.as_path())
    }
}

impl From<Vec<GenomicInterval>> for IntervalSet {
    fn from(intervals: Vec<GenomicInterval>) -> Self {
        IntervalSet { intervals }
    }
}

impl<'a> Iterator for IntervalSetIterator<'a> {
    type Item = &'a GenomicInterval;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.interval_set.intervals.len() {
            let interval = &self.interval_set.intervals[self.index];
            self.index += 1;
            Some(interval)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a IntervalSet {
    type Item = &'a GenomicInterval;
    type IntoIter = IntervalSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        IntervalSetIterator {
            interval_set: self,
            index: 0,
        }
    }
}

impl Display for IntervalSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntervalSet with {} intervals.", self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Cursor;

    use pretty_assertions::assert_eq;
    use rstest::*;

    const BED: &str =
        "# comment line\nchr1\t100\t200\tIVL1\n\nchr1\t300\t450\tIVL2\nchrX\t10\t20\n";

    #[rstest]
    fn test_parse_skips_blanks_and_comments() {
        let set = IntervalSet::from_reader(Cursor::new(BED)).unwrap();
        assert_eq!(set.len(), 3);

        let ids: Vec<&str> = set.into_iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["IVL1", "IVL2", "chrX:10-20"]);
    }

    #[rstest]
    fn test_parse_preserves_input_order() {
        // deliberately unsorted: order must survive parsing untouched
        let text = "chr2\t5\t10\nchr1\t100\t200\nchr1\t1\t2\n";
        let set = IntervalSet::from_reader(Cursor::new(text)).unwrap();

        let coords: Vec<(String, u32)> = set
            .into_iter()
            .map(|i| (i.chromosome.clone(), i.start))
            .collect();
        assert_eq!(
            coords,
            vec![
                ("chr2".to_string(), 5),
                ("chr1".to_string(), 100),
                ("chr1".to_string(), 1)
            ]
        );
    }

    #[rstest]
    fn test_parse_too_few_fields() {
        let result = IntervalSet::from_reader(Cursor::new("chr1\t100\n"));
        assert!(matches!(result, Err(ParseError::MissingFields(_))));
    }

    #[rstest]
    #[case("chr1\tabc\t200\n")]
    #[case("chr1\t1.5\t200\n")]
    fn test_parse_bad_start(#[case] text: &str) {
        let result = IntervalSet::from_reader(Cursor::new(text));
        assert!(matches!(result, Err(ParseError::InvalidStart(_))));
    }

    #[rstest]
    fn test_parse_bad_stop() {
        let result = IntervalSet::from_reader(Cursor::new("chr1\t100\txyz\n"));
        assert!(matches!(result, Err(ParseError::InvalidStop(_))));
    }

    #[rstest]
    fn test_round_trip_preserves_order_and_values() {
        let set = IntervalSet::from_reader(Cursor::new(BED)).unwrap();
        let reparsed = IntervalSet::from_reader(Cursor::new(set.as_bed_string())).unwrap();
        assert_eq!(set, reparsed);
    }

    #[rstest]
    fn test_open_from_path() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("regions.bed");
        std::fs::write(&path, BED).unwrap();

        let set = IntervalSet::try_from(path.as_path()).unwrap();
        assert_eq!(set.len(), 3);
    }

    #[rstest]
    fn test_open_bed_gz() {
        use flate2::Compression;
        use flate2::write::GzEncoder;
        use std::io::Write;

        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("regions.bed.gz");
        let file = File::create(&path).unwrap();
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(BED.as_bytes()).unwrap();
        encoder.finish().unwrap();

        let set = IntervalSet::try_from(path.as_path()).unwrap();
        assert_eq!(set.len(), 3);
    }
}
