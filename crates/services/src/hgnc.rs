//! HGNC REST client: approved symbol, name, aliases and Ensembl id.
//!
//! Endpoint: `{base}/fetch/hgnc_id/<digits>` with `Accept: application/json`

use crate::one_or_many::OneOrMany;
use crate::Result;
use felix_core::{HgncId, HgncRecord};
use reqwest::header::ACCEPT;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct HgncClient {
    client: Client,
    base_url: String,
}

impl HgncClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Look up one gene. `Ok(None)` when HGNC has no record for the id.
    #[instrument(skip(self))]
    pub async fn fetch(&self, hgnc_id: &HgncId) -> Result<Option<HgncRecord>> {
        let url = format!("{}/fetch/hgnc_id/{}", self.base_url, hgnc_id.number());

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json::<HgncResponse>()
            .await?;

        debug!("HGNC returned {} docs", response.response.docs.len());

        let record = response.response.docs.into_iter().next().map(|doc| HgncRecord {
            hgnc_id: hgnc_id.clone(),
            symbol: doc.symbol,
            name: doc.name,
            aliases: doc.alias_symbol.map(OneOrMany::into_vec).unwrap_or_default(),
            ensembl: doc.ensembl_gene_id,
        });
        Ok(record)
    }
}

// ==========================================
// RESPONSE TYPES
// ==========================================

#[derive(Debug, Deserialize)]
struct HgncResponse {
    response: HgncResponseBody,
}

#[derive(Debug, Deserialize)]
struct HgncResponseBody {
    #[serde(default)]
    docs: Vec<HgncDoc>,
}

#[derive(Debug, Deserialize)]
struct HgncDoc {
    #[serde(default)]
    symbol: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    alias_symbol: Option<OneOrMany<String>>,
    #[serde(default)]
    ensembl_gene_id: Option<String>,
}
