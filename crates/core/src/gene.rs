//! Gene types - HGNC identifiers, assemblies and per-assembly metadata

use crate::{CoreError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn hgnc_token_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bHGNC:(\d+)\b").expect("valid HGNC regex"))
}

/// A HUGO Gene Nomenclature Committee identifier, e.g. `HGNC:2204`.
///
/// Ordering is numeric so that reports list `HGNC:9` before `HGNC:10`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HgncId {
    number: u64,
}

impl HgncId {
    pub const PREFIX: &'static str = "HGNC:";

    pub fn parse(raw: &str) -> Result<Self> {
        let digits = raw
            .strip_prefix(Self::PREFIX)
            .filter(|d| !d.is_empty() && d.bytes().all(|b| b.is_ascii_digit()))
            .ok_or_else(|| {
                CoreError::validation("hgnc_id", raw, "expected the form HGNC:<digits>")
            })?;

        let number = digits
            .parse::<u64>()
            .map_err(|e| CoreError::validation("hgnc_id", raw, e.to_string()))?;
        Ok(Self { number })
    }

    /// Every `HGNC:<digits>` token in `text`, in order of appearance, duplicates removed.
    pub fn find_all(text: &str) -> Vec<HgncId> {
        let mut ids: Vec<HgncId> = Vec::new();
        for cap in hgnc_token_regex().captures_iter(text) {
            let Ok(number) = cap[1].parse::<u64>() else {
                continue;
            };
            let id = HgncId { number };
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        ids
    }

    /// Numeric part, e.g. `2204`.
    pub fn number(&self) -> u64 {
        self.number
    }
}

impl PartialOrd for HgncId {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HgncId {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.number.cmp(&other.number)
    }
}

impl fmt::Display for HgncId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.number)
    }
}

impl FromStr for HgncId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HgncId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<HgncId> for String {
    fn from(id: HgncId) -> Self {
        id.to_string()
    }
}

/// Reference genome build the coordinates refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assembly {
    /// GRCh38
    Hg38,
    /// GRCh37
    Hg19,
}

impl Assembly {
    /// Report order: hg38 first.
    pub const ALL: [Assembly; 2] = [Assembly::Hg38, Assembly::Hg19];

    pub fn as_str(&self) -> &'static str {
        match self {
            Assembly::Hg38 => "hg38",
            Assembly::Hg19 => "hg19",
        }
    }
}

impl fmt::Display for Assembly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coding strand of a gene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Strand {
    Forward,
    Reverse,
}

impl TryFrom<i64> for Strand {
    type Error = String;

    fn try_from(value: i64) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Strand::Forward),
            -1 => Ok(Strand::Reverse),
            other => Err(format!("strand must be 1 or -1, got {}", other)),
        }
    }
}

impl From<Strand> for i64 {
    fn from(strand: Strand) -> Self {
        match strand {
            Strand::Forward => 1,
            Strand::Reverse => -1,
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", i64::from(*self))
    }
}

/// A gene's placement on one assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenomicPosition {
    #[serde(rename = "chr")]
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
}

impl GenomicPosition {
    /// Chromosomes 1-22, X, Y and MT; anything else is a patch or alt haplotype.
    pub fn is_primary_chromosome(&self) -> bool {
        let chrom = self.chrom.strip_prefix("chr").unwrap_or(&self.chrom);
        match chrom {
            "X" | "Y" | "MT" | "M" => true,
            other => other
                .parse::<u8>()
                .map(|n| (1..=22).contains(&n))
                .unwrap_or(false),
        }
    }

    /// The primary placement among several: first on a primary chromosome, else the first.
    pub fn select_primary(positions: &[GenomicPosition]) -> Option<&GenomicPosition> {
        positions
            .iter()
            .find(|p| p.is_primary_chromosome())
            .or_else(|| positions.first())
    }
}

/// Nomenclature record for one gene
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HgncRecord {
    pub hgnc_id: HgncId,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub ensembl: Option<String>,
}

/// Everything the report knows about one gene on one assembly
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneMetadata {
    pub chrom: String,
    pub start: u64,
    pub end: u64,
    pub strand: Strand,
    pub assembly: Assembly,
    pub hgnc_id: HgncId,
    pub symbol: String,
    pub name: String,
    pub alias: Vec<String>,
    pub ensembl: Option<String>,
}

impl GeneMetadata {
    pub fn new(record: &HgncRecord, assembly: Assembly, position: &GenomicPosition) -> Self {
        Self {
            chrom: position.chrom.clone(),
            start: position.start,
            end: position.end,
            strand: position.strand,
            assembly,
            hgnc_id: record.hgnc_id.clone(),
            symbol: record.symbol.clone(),
            name: record.name.clone(),
            alias: record.aliases.clone(),
            ensembl: record.ensembl.clone(),
        }
    }
}
