//! Gene metadata enrichment from HGNC (nomenclature) and MyGene.info (coordinates).

use crate::hgnc::HgncClient;
use crate::mygene::MyGeneClient;
use crate::{Result, ServiceError};
use felix_core::{Assembly, GeneMetadata, HgncId};
use tracing::{info, instrument, warn};

/// What to do when a gene has no usable metadata
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MissingDataPolicy {
    /// Log the gene and leave it out of the report
    #[default]
    Skip,
    /// Abort the run
    Fail,
}

/// Metadata for every gene that could be enriched, plus the ones that were skipped
#[derive(Debug, Default)]
pub struct EnrichmentOutcome {
    pub metadata: Vec<GeneMetadata>,
    pub skipped: Vec<ServiceError>,
}

#[derive(Clone)]
pub struct MetadataEnricher {
    hgnc: HgncClient,
    mygene: MyGeneClient,
}

impl MetadataEnricher {
    pub fn new(hgnc: HgncClient, mygene: MyGeneClient) -> Self {
        Self { hgnc, mygene }
    }

    /// Metadata for each assembly the gene has coordinates on (hg38 first).
    ///
    /// Fails with an enrichment error when HGNC has no record or neither
    /// assembly has coordinates.
    #[instrument(skip(self))]
    pub async fn enrich(&self, hgnc_id: &HgncId) -> Result<Vec<GeneMetadata>> {
        let record = self
            .hgnc
            .fetch(hgnc_id)
            .await?
            .ok_or_else(|| ServiceError::enrichment(hgnc_id, "no HGNC record"))?;

        let positions = self
            .mygene
            .positions(hgnc_id)
            .await?
            .ok_or_else(|| ServiceError::enrichment(hgnc_id, "no MyGene.info hit"))?;

        let mut metadata = Vec::with_capacity(Assembly::ALL.len());
        for assembly in Assembly::ALL {
            match positions.primary(assembly) {
                Some(position) => metadata.push(GeneMetadata::new(&record, assembly, position)),
                None => warn!("{} ({}) has no {} coordinates", hgnc_id, record.symbol, assembly),
            }
        }

        if metadata.is_empty() {
            return Err(ServiceError::enrichment(hgnc_id, "no genomic coordinates on any assembly"));
        }
        Ok(metadata)
    }

    /// Enrich each id in turn. Missing data is handled per `policy`; transport
    /// and service failures always abort.
    pub async fn enrich_all<'a, I>(
        &self,
        ids: I,
        policy: MissingDataPolicy,
    ) -> Result<EnrichmentOutcome>
    where
        I: IntoIterator<Item = &'a HgncId>,
    {
        let mut outcome = EnrichmentOutcome::default();

        for hgnc_id in ids {
            match self.enrich(hgnc_id).await {
                Ok(metadata) => outcome.metadata.extend(metadata),
                Err(e) if e.is_missing_data() && policy == MissingDataPolicy::Skip => {
                    warn!("Skipping {}", e);
                    outcome.skipped.push(e);
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            "Enriched {} gene/assembly pairs, skipped {} genes",
            outcome.metadata.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }
}
