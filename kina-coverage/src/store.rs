use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

use kina_core::models::{GenomicInterval, IntervalKind};
use kina_core::utils::get_dynamic_reader;

use crate::errors::CoverageError;

/// Reference genome build addressing the interval store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Build {
    GRCh37,
    GRCh38,
}

impl FromStr for Build {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GRCh37" | "grch37" | "37" => Ok(Build::GRCh37),
            "GRCh38" | "grch38" | "38" => Ok(Build::GRCh38),
            _ => Err(format!("Invalid genome build: {}", s)),
        }
    }
}

impl Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Build::GRCh37 => "GRCh37",
            Build::GRCh38 => "GRCh38",
        };
        write!(f, "{}", label)
    }
}

///
/// Gene record as returned by the interval store.
///
/// The interval id is the Ensembl gene id; HGNC identifiers ride along when
/// the store knows them.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    pub interval: GenomicInterval,
    pub hgnc_id: Option<u32>,
    pub hgnc_symbol: Option<String>,
}

/// Identifier filter for gene lookup.
#[derive(Debug, Clone)]
pub enum GeneFilter {
    EnsemblIds(Vec<String>),
    HgncIds(Vec<u32>),
    HgncSymbols(Vec<String>),
}

impl GeneFilter {
    fn matches(&self, gene: &Gene) -> bool {
        match self {
            GeneFilter::EnsemblIds(ids) => ids.contains(&gene.interval.id),
            GeneFilter::HgncIds(ids) => gene.hgnc_id.is_some_and(|id| ids.contains(&id)),
            GeneFilter::HgncSymbols(symbols) => gene
                .hgnc_symbol
                .as_ref()
                .is_some_and(|symbol| symbols.contains(symbol)),
        }
    }
}

///
/// Lookup seam to whatever holds the gene/transcript/exon annotation.
///
/// The engine only ever receives fully-resolved interval lists through this
/// trait; it never reads ambient annotation state of its own.
///
pub trait IntervalStore {
    /// Genes of one build matching an identifier filter, in store order.
    fn genes(&self, build: Build, filter: &GeneFilter) -> Result<Vec<Gene>, CoverageError>;

    /// Child intervals (transcripts or exons) of one gene, filtered to rows
    /// carrying every requested tag, in store order.
    fn children_of(
        &self,
        build: Build,
        gene: &Gene,
        kind: IntervalKind,
        tags: &[String],
    ) -> Result<Vec<GenomicInterval>, CoverageError>;
}

#[derive(Debug, Clone)]
struct StoreRow {
    build: Build,
    kind: IntervalKind,
    interval: GenomicInterval,
    gene_id: String,
    hgnc_id: Option<u32>,
    hgnc_symbol: Option<String>,
    tags: Vec<String>,
}

///
/// Flat-file interval store.
///
/// One tab-separated row per feature:
/// `build  kind  chromosome  start  stop  feature_id  gene_id  [hgnc_id]  [hgnc_symbol]  [tags]`
///
/// Gene rows repeat their own id in the gene_id column; transcript/exon
/// rows point at their parent gene. `.` marks an absent optional column,
/// tags are comma-joined. Lines starting with `#` are skipped.
///
#[derive(Debug, Clone)]
pub struct TsvIntervalStore {
    rows: Vec<StoreRow>,
}

impl TsvIntervalStore {
    pub fn from_path(path: &Path) -> Result<Self, CoverageError> {
        use std::io::BufRead;

        let reader = get_dynamic_reader(path)
            .map_err(|e| std::io::Error::other(format!("{:#}", e)))?;

        let mut rows: Vec<StoreRow> = Vec::new();
        for line in reader.lines() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            rows.push(Self::parse_row(line)?);
        }

        Ok(TsvIntervalStore { rows })
    }

    fn parse_row(line: &str) -> Result<StoreRow, CoverageError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 7 {
            return Err(CoverageError::MalformedStoreLine(line.to_string()));
        }

        let build: Build = fields[0]
            .parse()
            .map_err(|_| CoverageError::MalformedStoreLine(line.to_string()))?;
        let kind: IntervalKind = fields[1]
            .parse()
            .map_err(|_| CoverageError::MalformedStoreLine(line.to_string()))?;
        let start: u32 = fields[3]
            .parse()
            .map_err(|_| CoverageError::MalformedStoreLine(line.to_string()))?;
        let stop: u32 = fields[4]
            .parse()
            .map_err(|_| CoverageError::MalformedStoreLine(line.to_string()))?;

        let interval =
            GenomicInterval::new(fields[5].to_string(), fields[2].to_string(), start, stop)?;

        let optional = |index: usize| {
            let value = *fields.get(index).unwrap_or(&"");
            if value.is_empty() || value == "." {
                None
            } else {
                Some(value.to_string())
            }
        };

        let hgnc_id = match optional(7) {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| CoverageError::MalformedStoreLine(line.to_string()))?,
            ),
            None => None,
        };

        Ok(StoreRow {
            build,
            kind,
            interval,
            gene_id: fields[6].to_string(),
            hgnc_id,
            hgnc_symbol: optional(8),
            tags: optional(9)
                .map(|raw| raw.split(',').map(|tag| tag.trim().to_string()).collect())
                .unwrap_or_default(),
        })
    }
}

impl IntervalStore for TsvIntervalStore {
    fn genes(&self, build: Build, filter: &GeneFilter) -> Result<Vec<Gene>, CoverageError> {
        let genes = self
            .rows
            .iter()
            .filter(|row| row.build == build && row.kind == IntervalKind::Gene)
            .map(|row| Gene {
                interval: row.interval.clone(),
                hgnc_id: row.hgnc_id,
                hgnc_symbol: row.hgnc_symbol.clone(),
            })
            .filter(|gene| filter.matches(gene))
            .collect();
        Ok(genes)
    }

    fn children_of(
        &self,
        build: Build,
        gene: &Gene,
        kind: IntervalKind,
        tags: &[String],
    ) -> Result<Vec<GenomicInterval>, CoverageError> {
        let children = self
            .rows
            .iter()
            .filter(|row| {
                row.build == build
                    && row.kind == kind
                    && row.gene_id == gene.interval.id
                    && tags.iter().all(|tag| row.tags.contains(tag))
            })
            .map(|row| row.interval.clone())
            .collect();
        Ok(children)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    const STORE: &str = "\
# build kind chrom start stop feature_id gene_id hgnc_id hgnc_symbol tags
GRCh38\tgene\t13\t32315000\t32400000\tENSG00000139618\tENSG00000139618\t1101\tBRCA2\t.
GRCh38\ttranscript\t13\t32315000\t32340000\tENST00000380152\tENSG00000139618\t.\t.\tcanonical,mane_select
GRCh38\ttranscript\t13\t32340000\t32400000\tENST00000530893\tENSG00000139618\t.\t.\t.
GRCh38\texon\t13\t32315000\t32316000\tENSE00001184784\tENSG00000139618\t.\t.\t.
GRCh37\tgene\t13\t32889611\t32973805\tENSG00000139618\tENSG00000139618\t1101\tBRCA2\t.
";

    fn store() -> TsvIntervalStore {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("annotation.tsv");
        std::fs::write(&path, STORE).unwrap();
        TsvIntervalStore::from_path(&path).unwrap()
    }

    #[rstest]
    fn test_genes_filtered_by_symbol_and_build() {
        let store = store();
        let genes = store
            .genes(
                Build::GRCh38,
                &GeneFilter::HgncSymbols(vec!["BRCA2".to_string()]),
            )
            .unwrap();

        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].interval.start, 32315000);
        assert_eq!(genes[0].hgnc_id, Some(1101));
    }

    #[rstest]
    fn test_genes_filtered_by_hgnc_id() {
        let store = store();
        let genes = store
            .genes(Build::GRCh37, &GeneFilter::HgncIds(vec![1101]))
            .unwrap();
        assert_eq!(genes.len(), 1);
        assert_eq!(genes[0].interval.start, 32889611);
    }

    #[rstest]
    fn test_children_of_gene() {
        let store = store();
        let genes = store
            .genes(
                Build::GRCh38,
                &GeneFilter::EnsemblIds(vec!["ENSG00000139618".to_string()]),
            )
            .unwrap();

        let transcripts = store
            .children_of(Build::GRCh38, &genes[0], IntervalKind::Transcript, &[])
            .unwrap();
        assert_eq!(transcripts.len(), 2);

        let exons = store
            .children_of(Build::GRCh38, &genes[0], IntervalKind::Exon, &[])
            .unwrap();
        assert_eq!(exons.len(), 1);
    }

    #[rstest]
    fn test_children_tag_filter() {
        let store = store();
        let genes = store
            .genes(
                Build::GRCh38,
                &GeneFilter::EnsemblIds(vec!["ENSG00000139618".to_string()]),
            )
            .unwrap();

        let canonical = store
            .children_of(
                Build::GRCh38,
                &genes[0],
                IntervalKind::Transcript,
                &["canonical".to_string()],
            )
            .unwrap();
        assert_eq!(canonical.len(), 1);
        assert_eq!(canonical[0].id, "ENST00000380152");
    }

    #[rstest]
    fn test_malformed_row_rejected() {
        let tempdir = tempfile::tempdir().unwrap();
        let path = tempdir.path().join("annotation.tsv");
        std::fs::write(&path, "GRCh38\tgene\t13\n").unwrap();

        let result = TsvIntervalStore::from_path(&path);
        assert!(matches!(
            result,
            Err(CoverageError::MalformedStoreLine(_))
        ));
    }
}
