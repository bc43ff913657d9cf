//! Endpoint and client settings, read from the environment.

use crate::{Result, ServiceError};
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ENTREZ_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils";
pub const DEFAULT_HGNC_URL: &str = "https://rest.genenames.org";
pub const DEFAULT_MYGENE_URL: &str = "https://mygene.info";
pub const DEFAULT_NER_URL: &str = "http://localhost:8100";
pub const DEFAULT_NER_LABEL: &str = "DISEASE";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

const USER_AGENT: &str = concat!("felix/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub entrez_url: String,
    pub ncbi_api_key: Option<String>,
    pub hgnc_url: String,
    pub mygene_url: String,
    pub ner_url: String,
    pub ner_label: String,
    /// When set, diseases are tagged from this term list instead of the NER service
    pub ner_lexicon: Option<PathBuf>,
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            entrez_url: DEFAULT_ENTREZ_URL.to_string(),
            ncbi_api_key: None,
            hgnc_url: DEFAULT_HGNC_URL.to_string(),
            mygene_url: DEFAULT_MYGENE_URL.to_string(),
            ner_url: DEFAULT_NER_URL.to_string(),
            ner_label: DEFAULT_NER_LABEL.to_string(),
            ner_lexicon: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let timeout = match get("FELIX_HTTP_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .ok()
                    .filter(|secs| *secs > 0)
                    .ok_or_else(|| {
                        ServiceError::Config(format!(
                            "FELIX_HTTP_TIMEOUT_SECS must be a positive integer, got '{}'",
                            raw
                        ))
                    })?;
                Duration::from_secs(secs)
            }
            None => defaults.timeout,
        };

        Ok(Self {
            entrez_url: trim_url(get("FELIX_ENTREZ_URL").unwrap_or(defaults.entrez_url)),
            ncbi_api_key: get("NCBI_API_KEY"),
            hgnc_url: trim_url(get("FELIX_HGNC_URL").unwrap_or(defaults.hgnc_url)),
            mygene_url: trim_url(get("FELIX_MYGENE_URL").unwrap_or(defaults.mygene_url)),
            ner_url: trim_url(get("FELIX_NER_URL").unwrap_or(defaults.ner_url)),
            ner_label: get("FELIX_NER_LABEL").unwrap_or(defaults.ner_label),
            ner_lexicon: get("FELIX_NER_LEXICON").map(PathBuf::from),
            timeout,
        })
    }

    /// Builder: tag diseases from a term list
    pub fn with_lexicon(mut self, path: impl Into<PathBuf>) -> Self {
        self.ner_lexicon = Some(path.into());
        self
    }

    /// Shared HTTP client with the configured timeout
    pub fn http_client(&self) -> Result<Client> {
        let client = Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(client)
    }
}

fn trim_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
