//! End-to-end run: fetch, parse, extract, enrich, join.

use crate::config::ServiceConfig;
use crate::enrich::{MetadataEnricher, MissingDataPolicy};
use crate::entrez::EntrezClient;
use crate::extract::extract_mentions;
use crate::hgnc::HgncClient;
use crate::lexicon::LexiconTagger;
use crate::mygene::MyGeneClient;
use crate::ner::{DiseaseTagger, NerClient};
use crate::{Result, ServiceError};
use felix_core::{build_rows, Document, Email, GeneMentions, PmcId, ReportRow};
use std::collections::BTreeSet;
use tracing::{info, instrument};

/// Everything a run produced
#[derive(Debug)]
pub struct PipelineOutput {
    pub document: Document,
    pub mentions: GeneMentions,
    pub rows: Vec<ReportRow>,
    /// Genes left out of the report for lack of metadata
    pub skipped: Vec<ServiceError>,
}

impl PipelineOutput {
    /// Number of distinct HGNC ids with at least one report row
    pub fn unique_genes(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.hgnc_id())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Runs the stages in order, each on the previous stage's output
pub struct Pipeline {
    entrez: EntrezClient,
    tagger: Box<dyn DiseaseTagger>,
    enricher: MetadataEnricher,
    policy: MissingDataPolicy,
}

impl Pipeline {
    pub fn new(
        entrez: EntrezClient,
        tagger: Box<dyn DiseaseTagger>,
        enricher: MetadataEnricher,
    ) -> Self {
        Self {
            entrez,
            tagger,
            enricher,
            policy: MissingDataPolicy::default(),
        }
    }

    /// Wire up the HTTP clients and the tagger the configuration asks for.
    ///
    /// With a lexicon configured the NER service is never contacted.
    pub async fn from_config(config: &ServiceConfig) -> Result<Self> {
        let client = config.http_client()?;

        let tagger: Box<dyn DiseaseTagger> = match &config.ner_lexicon {
            Some(path) => Box::new(LexiconTagger::from_file(path).await?),
            None => {
                let ner = NerClient::from_config(client.clone(), config);
                check_ner_health(&ner).await?;
                Box::new(ner)
            }
        };

        let entrez = EntrezClient::from_config(client.clone(), config);
        let enricher = MetadataEnricher::new(
            HgncClient::new(client.clone(), config.hgnc_url.clone()),
            MyGeneClient::new(client, config.mygene_url.clone()),
        );

        Ok(Self::new(entrez, tagger, enricher))
    }

    /// Builder: set the missing-metadata policy
    pub fn with_policy(mut self, policy: MissingDataPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[instrument(skip(self, email))]
    pub async fn run(&self, pmc_id: &PmcId, email: &Email) -> Result<PipelineOutput> {
        let xml = self.entrez.fetch_article(pmc_id, email).await?;

        let document = Document::from_jats_xml(&xml)?;
        info!("PMC article title: {}", document.title);

        let mentions = extract_mentions(&document, self.tagger.as_ref()).await?;

        let outcome = self.enricher.enrich_all(mentions.ids(), self.policy).await?;
        let rows = build_rows(&mentions, &outcome.metadata);

        let output = PipelineOutput {
            document,
            mentions,
            rows,
            skipped: outcome.skipped,
        };
        info!("{} unique HGNC IDs found", output.unique_genes());
        Ok(output)
    }
}

/// The NER worker must answer its health probe before any article is fetched.
async fn check_ner_health(ner: &NerClient) -> Result<()> {
    let problem = match ner.health().await {
        Ok(true) => return Ok(()),
        Ok(false) => "health check did not succeed".to_string(),
        Err(e) => e.to_string(),
    };
    Err(ServiceError::Ner(format!(
        "NER service is not reachable at {} ({}); start the model worker or pass a disease lexicon",
        ner.base_url(),
        problem
    )))
}
