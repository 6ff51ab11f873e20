use async_trait::async_trait;
use pgvector::Vector;
use reqwest::{Client, Error as ReqwestError, StatusCode};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

#[derive(Serialize)]
struct EmbeddingsRequest<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbeddingsResponse {
    embeddings: Vec<Vec<f32>>,
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub service_url: String,
    pub timeout_secs: u64,
    pub embedding_dimension: usize,
}

impl EmbeddingsClientConfig {
    pub fn from_env(embedding_dimension: usize) -> Self {
        let service_url = env::var("EMBEDDINGS_SERVICE_URL")
            .unwrap_or_else(|_| "http://localhost:8081/embeddings".to_string());

        Self {
            service_url,
            timeout_secs: 30,
            embedding_dimension,
        }
    }
}

/// HTTP client for the external embedding service. Retry policy lives with
/// the caller; this client makes exactly one attempt per call.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl InferenceClient {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, ReqwestError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    async fn get_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        let request = EmbeddingsRequest { text };

        let response = self
            .client
            .post(&self.config.service_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EmbeddingProviderError::NetworkError(e.without_url().to_string()))?;

        match response.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(EmbeddingProviderError::RateLimitExceeded),
            StatusCode::SERVICE_UNAVAILABLE => {
                return Err(EmbeddingProviderError::ServiceUnavailable);
            }
            status if !status.is_success() => {
                return Err(EmbeddingProviderError::ApiError(format!(
                    "embedding service returned {}",
                    status
                )));
            }
            _ => {}
        }

        let mut body = response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| EmbeddingProviderError::ApiError(e.to_string()))?;

        if body.embeddings.is_empty() {
            return Err(EmbeddingProviderError::ApiError(
                "no embeddings returned".to_string(),
            ));
        }

        Ok(body.embeddings.swap_remove(0))
    }
}

pub struct InferenceEmbeddingProvider {
    client: InferenceClient,
}

impl InferenceEmbeddingProvider {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EmbeddingProvider for InferenceEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vector, EmbeddingProviderError> {
        let values = self.client.get_embedding(text).await?;

        let expected = self.client.config.embedding_dimension;
        if values.len() != expected {
            return Err(EmbeddingProviderError::DimensionMismatch {
                expected,
                actual: values.len(),
            });
        }

        Ok(Vector::from(values))
    }

    fn embedding_dimension(&self) -> usize {
        self.client.config.embedding_dimension
    }
}
