use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

///
/// Granularity selector for gene-level coverage rollups.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    Gene,
    Transcript,
    Exon,
}

impl FromStr for IntervalKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gene" | "genes" => Ok(IntervalKind::Gene),
            "transcript" | "transcripts" => Ok(IntervalKind::Transcript),
            "exon" | "exons" => Ok(IntervalKind::Exon),
            _ => Err(format!("Invalid interval kind: {}", s)),
        }
    }
}

impl Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            IntervalKind::Gene => "gene",
            IntervalKind::Transcript => "transcript",
            IntervalKind::Exon => "exon",
        };
        write!(f, "{}", label)
    }
}

///
/// Coverage rollup for one reporting unit (a gene, transcript or exon).
///
/// `completeness` maps depth threshold to the fraction of the unit covered
/// at or above that depth. For transcript/exon granularity the per-child
/// rollups ride along in `children`.
///
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageSummary {
    pub id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hgnc_id: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hgnc_symbol: Option<String>,

    pub mean_coverage: f64,

    pub completeness: BTreeMap<u32, f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<CoverageSummary>>,
}

/// Sex call derived from sex-chromosome coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Female,
    Male,
    Unknown,
}

impl Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Sex::Female => "female",
            Sex::Male => "male",
            Sex::Unknown => "unknown",
        };
        write!(f, "{}", label)
    }
}

/// Mean X/Y coverage of one sample plus the sex call derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SexMetrics {
    pub x_coverage: f64,
    pub y_coverage: f64,
    pub predicted_sex: Sex,
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("gene", IntervalKind::Gene)]
    #[case("transcripts", IntervalKind::Transcript)]
    #[case("EXON", IntervalKind::Exon)]
    fn test_interval_kind_from_str(#[case] raw: &str, #[case] expected: IntervalKind) {
        assert_eq!(raw.parse::<IntervalKind>().unwrap(), expected);
    }

    #[rstest]
    fn test_interval_kind_from_str_invalid() {
        assert!("codon".parse::<IntervalKind>().is_err());
    }

    #[rstest]
    fn test_summary_serialization_skips_empty_idents() {
        let summary = CoverageSummary {
            id: "ENSG00000139618".to_string(),
            hgnc_id: None,
            hgnc_symbol: None,
            mean_coverage: 31.25,
            completeness: BTreeMap::from([(10, 1.0), (20, 0.5)]),
            children: None,
        };

        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("hgnc_id").is_none());
        assert_eq!(json["completeness"]["10"], 1.0);
    }

    #[rstest]
    fn test_sex_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Sex::Female).unwrap(), "\"female\"");
    }
}
