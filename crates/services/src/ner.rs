//! Disease tagging: the trait the extractor talks to, and the HTTP client for
//! the NER model worker.

use crate::config::ServiceConfig;
use crate::{Result, ServiceError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Labels disease mentions in a sentence.
#[async_trait]
pub trait DiseaseTagger: Send + Sync {
    /// Disease mentions in `sentence`, as written in the text.
    async fn tag_diseases(&self, sentence: &str) -> Result<Vec<String>>;
}

/// Client for a biomedical NER model served over HTTP
#[derive(Clone)]
pub struct NerClient {
    client: Client,
    base_url: String,
    disease_label: String,
}

impl NerClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            disease_label: crate::config::DEFAULT_NER_LABEL.to_string(),
        }
    }

    pub fn from_config(client: Client, config: &ServiceConfig) -> Self {
        Self::new(client, config.ner_url.clone()).with_disease_label(config.ner_label.clone())
    }

    /// Builder: entity label that marks a disease span
    pub fn with_disease_label(mut self, label: impl Into<String>) -> Self {
        self.disease_label = label.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run the model over `text` and return every entity it finds.
    #[instrument(skip(self, text))]
    pub async fn extract_entities(&self, text: &str) -> Result<Vec<NerEntity>> {
        let url = format!("{}/ner", self.base_url);
        let request = NerRequest { text };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| ServiceError::Ner(format!("could not reach {}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Ner(format!("{} returned HTTP {}", url, status)));
        }

        let body: NerResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Ner(format!("invalid response from {}: {}", url, e)))?;

        debug!("NER returned {} entities", body.entities.len());
        Ok(body.entities)
    }

    /// Health check
    pub async fn health(&self) -> Result<bool> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;
        Ok(response.status().is_success())
    }
}

#[async_trait]
impl DiseaseTagger for NerClient {
    async fn tag_diseases(&self, sentence: &str) -> Result<Vec<String>> {
        let entities = self.extract_entities(sentence).await?;
        Ok(entities
            .into_iter()
            .filter(|e| e.label.eq_ignore_ascii_case(&self.disease_label))
            .map(|e| e.text)
            .collect())
    }
}

// ==========================================
// REQUEST/RESPONSE TYPES
// ==========================================

#[derive(Debug, Serialize)]
struct NerRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct NerResponse {
    #[serde(default)]
    entities: Vec<NerEntity>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NerEntity {
    pub text: String,
    #[serde(alias = "label_", alias = "entity_type")]
    pub label: String,
    #[serde(default)]
    pub start: Option<usize>,
    #[serde(default)]
    pub end: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SENTENCE: &str = "Mutations in COL4A3 (HGNC:2204) cause Alport syndrome";

    #[tokio::test]
    async fn test_tag_diseases_keeps_disease_label() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ner"))
            .and(body_json(serde_json::json!({ "text": SENTENCE })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entities": [
                    { "text": "Alport syndrome", "label": "DISEASE", "start": 38, "end": 53 },
                    { "text": "collagen", "label": "CHEMICAL", "start": 0, "end": 8 },
                    { "text": "hematuria", "label_": "disease" }
                ]
            })))
            .mount(&server)
            .await;

        let ner = NerClient::new(Client::new(), server.uri());
        let diseases = ner.tag_diseases(SENTENCE).await.unwrap();
        assert_eq!(diseases, vec!["Alport syndrome", "hematuria"]);
    }

    #[tokio::test]
    async fn test_custom_label() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "entities": [
                    { "text": "Alport syndrome", "label": "Disease_disorder" },
                    { "text": "kidney", "label": "DISEASE" }
                ]
            })))
            .mount(&server)
            .await;

        let ner = NerClient::new(Client::new(), server.uri()).with_disease_label("Disease_disorder");
        assert_eq!(ner.tag_diseases(SENTENCE).await.unwrap(), vec!["Alport syndrome"]);
    }

    #[tokio::test]
    async fn test_server_error_is_ner_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let ner = NerClient::new(Client::new(), server.uri());
        assert!(matches!(
            ner.tag_diseases(SENTENCE).await,
            Err(ServiceError::Ner(_))
        ));
    }

    #[tokio::test]
    async fn test_health() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let ner = NerClient::new(Client::new(), server.uri());
        assert!(ner.health().await.unwrap());
    }
}
