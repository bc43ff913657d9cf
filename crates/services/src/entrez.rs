//! NCBI E-utilities client for PMC full-text XML.
//!
//! Endpoint: `{base}/efetch.fcgi?db=pmc&id=<numeric id>&rettype=full&retmode=xml`

use crate::config::ServiceConfig;
use crate::{Result, ServiceError};
use felix_core::{Email, PmcId};
use reqwest::Client;
use tracing::{debug, info, instrument};

const TOOL_NAME: &str = "felix";

#[derive(Clone)]
pub struct EntrezClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl EntrezClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: None,
        }
    }

    pub fn from_config(client: Client, config: &ServiceConfig) -> Self {
        Self::new(client, config.entrez_url.clone()).with_api_key(config.ncbi_api_key.clone())
    }

    /// Builder: send an NCBI API key for the higher rate limit
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    /// Fetch the raw article XML. One attempt; any failure is a retrieval error.
    #[instrument(skip(self, email))]
    pub async fn fetch_article(&self, pmc_id: &PmcId, email: &Email) -> Result<String> {
        let url = format!("{}/efetch.fcgi", self.base_url);
        let mut params = vec![
            ("db", "pmc".to_string()),
            ("id", pmc_id.numeric().to_string()),
            ("rettype", "full".to_string()),
            ("retmode", "xml".to_string()),
            ("tool", TOOL_NAME.to_string()),
            ("email", email.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("api_key", key.clone()));
        }

        debug!("Requesting {} from Entrez", pmc_id);

        let response = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| ServiceError::Retrieval(format!("could not reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Retrieval(format!(
                "Entrez returned HTTP {} for {}",
                status, pmc_id
            )));
        }

        let xml = response
            .text()
            .await
            .map_err(|e| {
                ServiceError::Retrieval(format!("failed to read Entrez response: {}", e))
            })?;

        if xml.trim().is_empty() {
            return Err(ServiceError::Retrieval(format!(
                "Entrez returned an empty document for {}",
                pmc_id
            )));
        }

        if let Some(message) = entrez_error(&xml) {
            return Err(ServiceError::Retrieval(format!(
                "{} not found in PMC: {}",
                pmc_id, message
            )));
        }

        info!("Fetched {} ({} bytes)", pmc_id, xml.len());
        Ok(xml)
    }
}

/// Entrez reports unknown ids inside a 200 response as `<error>...</error>`.
fn entrez_error(xml: &str) -> Option<String> {
    let start = xml.find("<error")?;
    let rest = &xml[start..];
    let message = rest
        .find('>')
        .map(|open| &rest[open + 1..])
        .and_then(|body| body.find("</error>").map(|close| body[..close].trim()))
        .filter(|m| !m.is_empty())
        .unwrap_or("unknown error");
    Some(message.to_string())
}
