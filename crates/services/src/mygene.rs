//! MyGene.info client for genomic coordinates on hg38 and hg19.
//!
//! Endpoint: `{base}/v3/query?q=hgnc:<digits>&fields=genomic_pos,genomic_pos_hg19`

use crate::one_or_many::OneOrMany;
use crate::Result;
use felix_core::{Assembly, GenomicPosition, HgncId, Strand};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

const FIELDS: &str = "genomic_pos,genomic_pos_hg19";

/// All placements MyGene reports for one gene, per assembly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenePositions {
    pub hg38: Vec<GenomicPosition>,
    pub hg19: Vec<GenomicPosition>,
}

impl GenePositions {
    pub fn for_assembly(&self, assembly: Assembly) -> &[GenomicPosition] {
        match assembly {
            Assembly::Hg38 => &self.hg38,
            Assembly::Hg19 => &self.hg19,
        }
    }

    /// Primary placement on `assembly`, if any.
    pub fn primary(&self, assembly: Assembly) -> Option<&GenomicPosition> {
        GenomicPosition::select_primary(self.for_assembly(assembly))
    }

    pub fn is_empty(&self) -> bool {
        self.hg38.is_empty() && self.hg19.is_empty()
    }
}

#[derive(Clone)]
pub struct MyGeneClient {
    client: Client,
    base_url: String,
}

impl MyGeneClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Coordinates of the first hit. `Ok(None)` when MyGene has no hit for the id.
    #[instrument(skip(self))]
    pub async fn positions(&self, hgnc_id: &HgncId) -> Result<Option<GenePositions>> {
        let url = format!("{}/v3/query", self.base_url);
        let query = format!("hgnc:{}", hgnc_id.number());

        let response = self
            .client
            .get(&url)
            .query(&[("q", query.as_str()), ("fields", FIELDS), ("species", "human")])
            .send()
            .await?
            .error_for_status()?
            .json::<QueryResponse>()
            .await?;

        debug!("MyGene returned {} hits", response.hits.len());

        let Some(hit) = response.hits.into_iter().next() else {
            return Ok(None);
        };

        Ok(Some(GenePositions {
            hg38: convert_positions(hit.genomic_pos),
            hg19: convert_positions(hit.genomic_pos_hg19),
        }))
    }
}

fn convert_positions(raw: Option<OneOrMany<RawPosition>>) -> Vec<GenomicPosition> {
    raw.map(OneOrMany::into_vec)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| {
            let strand = Strand::try_from(p.strand?).ok()?;
            Some(GenomicPosition {
                chrom: p.chr?,
                start: p.start?,
                end: p.end?,
                strand,
            })
        })
        .collect()
}

// ==========================================
// RESPONSE TYPES
// ==========================================

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    hits: Vec<QueryHit>,
}

#[derive(Debug, Deserialize)]
struct QueryHit {
    #[serde(default)]
    genomic_pos: Option<OneOrMany<RawPosition>>,
    #[serde(default)]
    genomic_pos_hg19: Option<OneOrMany<RawPosition>>,
}

/// Positions are kept loose here; incomplete entries are dropped rather than failing the query.
#[derive(Debug, Deserialize)]
struct RawPosition {
    chr: Option<String>,
    start: Option<u64>,
    end: Option<u64>,
    strand: Option<i64>,
}
