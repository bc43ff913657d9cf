//! Service error types

use felix_core::HgncId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Core(#[from] felix_core::CoreError),

    #[error("Article retrieval failed: {0}")]
    Retrieval(String),

    #[error("No enrichment data for {hgnc_id}: {reason}")]
    Enrichment { hgnc_id: HgncId, reason: String },

    #[error("NER service error: {0}")]
    Ner(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ServiceError {
    pub(crate) fn enrichment(hgnc_id: &HgncId, reason: impl Into<String>) -> Self {
        Self::Enrichment {
            hgnc_id: hgnc_id.clone(),
            reason: reason.into(),
        }
    }

    /// Whether the run can continue past this error under the skip policy.
    pub fn is_missing_data(&self) -> bool {
        matches!(self, Self::Enrichment { .. })
    }
}

pub type Result<T> = std::result::Result<T, ServiceError>;
