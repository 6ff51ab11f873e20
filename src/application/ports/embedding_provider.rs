use async_trait::async_trait;
use pgvector::Vector;

#[derive(Debug)]
pub enum EmbeddingProviderError {
    NetworkError(String),
    ApiError(String),
    DimensionMismatch { expected: usize, actual: usize },
    RateLimitExceeded,
    ServiceUnavailable,
}

impl std::fmt::Display for EmbeddingProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmbeddingProviderError::NetworkError(msg) => write!(f, "Network error: {}", msg),
            EmbeddingProviderError::ApiError(msg) => write!(f, "API error: {}", msg),
            EmbeddingProviderError::DimensionMismatch { expected, actual } => write!(
                f,
                "Embedding dimension mismatch: expected {}, got {}",
                expected, actual
            ),
            EmbeddingProviderError::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            EmbeddingProviderError::ServiceUnavailable => write!(f, "Service unavailable"),
        }
    }
}

impl std::error::Error for EmbeddingProviderError {}

/// External capability producing a fixed-dimension vector per text. The
/// dimensionality is fixed per deployment; a mismatch between a returned
/// vector and the configured dimension is a configuration error, not a
/// runtime-recoverable one.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vector, EmbeddingProviderError>;

    fn embedding_dimension(&self) -> usize;
}
