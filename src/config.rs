use std::env;
use std::time::Duration;

#[derive(Debug)]
pub enum ConfigError {
    MissingVariable(String),
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::MissingVariable(name) => {
                write!(f, "Missing environment variable: {}", name)
            }
            ConfigError::InvalidValue(msg) => write!(f, "Invalid configuration value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Sliding-window chunking parameters. Construction rejects configurations
/// that would produce non-advancing windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingConfig {
    size: usize,
    overlap: usize,
}

impl ChunkingConfig {
    pub fn new(size: usize, overlap: usize) -> Result<Self, ConfigError> {
        if size == 0 {
            return Err(ConfigError::InvalidValue(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if overlap >= size {
            return Err(ConfigError::InvalidValue(format!(
                "chunk overlap ({}) must be smaller than chunk size ({})",
                overlap, size
            )));
        }
        Ok(Self { size, overlap })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn stride(&self) -> usize {
        self.size - self.overlap
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            size: 1000,
            overlap: 200,
        }
    }
}

/// Per-step retry policy: exponential backoff, doubling from the initial
/// interval up to the cap, bounded by a maximum attempt count, with each
/// attempt's wall clock bounded by the step timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_attempts: u32,
    pub initial_interval: Duration,
    pub max_interval: Duration,
    pub step_timeout: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_interval: Duration::from_millis(1000),
            max_interval: Duration::from_millis(30_000),
            step_timeout: Duration::from_secs(120),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConcurrencyConfig {
    /// Cap on document workflows running at once within a batch.
    pub max_concurrent_documents: usize,
    /// Cap on activity-style steps running at once across all workflows.
    pub max_concurrent_activities: usize,
}

impl Default for ConcurrencyConfig {
    fn default() -> Self {
        Self {
            max_concurrent_documents: 10,
            max_concurrent_activities: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseCacheConfig {
    pub max_entries: usize,
    pub ttl: Duration,
}

impl Default for ParseCacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 64,
            ttl: Duration::from_secs(3600),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub blob_store_dir: String,
    pub port: u16,
    pub embedding_dimension: usize,
    pub chunking: ChunkingConfig,
    pub retry: RetryConfig,
    pub concurrency: ConcurrencyConfig,
    pub parse_cache: ParseCacheConfig,
    pub search_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVariable("DATABASE_URL".to_string()))?;

        let blob_store_dir =
            env::var("BLOB_STORE_DIR").unwrap_or_else(|_| "./documents".to_string());

        let chunking = ChunkingConfig::new(
            parse_env("CHUNK_SIZE", 1000)?,
            parse_env("CHUNK_OVERLAP", 200)?,
        )?;

        let retry = RetryConfig {
            max_attempts: parse_env("MAX_STEP_ATTEMPTS", 3)?,
            initial_interval: Duration::from_millis(parse_env("RETRY_INITIAL_INTERVAL_MS", 1000)?),
            max_interval: Duration::from_millis(parse_env("RETRY_MAX_INTERVAL_MS", 30_000)?),
            step_timeout: Duration::from_secs(parse_env("STEP_TIMEOUT_SECS", 120)?),
        };

        let concurrency = ConcurrencyConfig {
            max_concurrent_documents: parse_env("MAX_CONCURRENT_DOCUMENTS", 10)?,
            max_concurrent_activities: parse_env("MAX_CONCURRENT_ACTIVITIES", 5)?,
        };

        let parse_cache = ParseCacheConfig {
            max_entries: parse_env("PARSE_CACHE_MAX_ENTRIES", 64)?,
            ttl: Duration::from_secs(parse_env("PARSE_CACHE_TTL_SECS", 3600)?),
        };

        Ok(Self {
            database_url,
            blob_store_dir,
            port: parse_env("PORT", 3000)?,
            embedding_dimension: parse_env("EMBEDDING_DIMENSION", 3072)?,
            chunking,
            retry,
            concurrency,
            parse_cache,
            search_timeout: Duration::from_secs(parse_env("SEARCH_TIMEOUT_SECS", 10)?),
        })
    }
}

fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|_| ConfigError::InvalidValue(format!("{} must be a number, got {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunking_config_rejects_overlap_equal_to_size() {
        assert!(ChunkingConfig::new(1000, 1000).is_err());
        assert!(ChunkingConfig::new(1000, 1200).is_err());
    }

    #[test]
    fn chunking_config_rejects_zero_size() {
        assert!(ChunkingConfig::new(0, 0).is_err());
    }

    #[test]
    fn chunking_config_accepts_valid_window() {
        let config = ChunkingConfig::new(1000, 200).unwrap();
        assert_eq!(config.size(), 1000);
        assert_eq!(config.overlap(), 200);
        assert_eq!(config.stride(), 800);
    }

    #[test]
    fn default_chunking_matches_deployment_defaults() {
        let config = ChunkingConfig::default();
        assert_eq!(config.size(), 1000);
        assert_eq!(config.overlap(), 200);
    }
}
