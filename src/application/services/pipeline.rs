use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use futures::StreamExt;
use pgvector::Vector;
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, OwnedMutexGuard, OwnedSemaphorePermit, Semaphore};
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::application::ports::{BlobFetcher, EmbeddingProvider};
use crate::application::services::chunker::Chunker;
use crate::application::services::parsing_service::ParsingService;
use crate::application::services::retry::{RetryOutcome, with_retry};
use crate::config::{ConcurrencyConfig, RetryConfig};
use crate::domain::entities::{Chunk, DocumentRef, DocumentState, Page, ProcessingRecord};
use crate::domain::repositories::{
    ChunkRepository, HistoryRepository, PageRepository, StateRepository,
};

/// Step-level failure taxonomy. Every variant is retryable at the step level;
/// once retries are exhausted the error is recorded into the document state
/// and audit trail, never propagated to sibling documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Fetch(String),
    Parse(String),
    Embedding(String),
    Storage(String),
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::Fetch(msg) => write!(f, "Fetch error: {}", msg),
            PipelineError::Parse(msg) => write!(f, "Parse error: {}", msg),
            PipelineError::Embedding(msg) => write!(f, "Embedding error: {}", msg),
            PipelineError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngestStatus {
    Success,
    Failed,
    Skipped,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    pub pages_processed: i32,
    pub chunks_generated: i32,
    pub duration_ms: i64,
}

/// Per-document entry in the batch result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    pub document_id: String,
    pub file_name: String,
    pub status: IngestStatus,
    pub error: Option<String>,
    pub stats: Option<DocumentStats>,
}

/// Aggregate result for one ingestion trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub workflow_id: Uuid,
    pub total_documents: usize,
    pub successful: usize,
    pub failed: usize,
    pub skipped: usize,
    pub results: Vec<DocumentOutcome>,
}

/// Single-flight guard: at most one in-progress workflow per document id.
struct DocumentLocks {
    inner: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl DocumentLocks {
    fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    async fn acquire(&self, document_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().await;
            locks
                .entry(document_id.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}

enum RunOutcome {
    Skipped,
    Completed {
        pages_processed: i32,
        chunks_generated: i32,
    },
}

struct RunFailure {
    error: PipelineError,
    prior_fingerprint: Option<String>,
}

/// Orchestrates the per-document workflow:
/// CheckState -> Fetch -> Parse -> StorePages -> Embed -> StoreChunks ->
/// CommitState -> LogHistory, with per-step timeout and retry-with-backoff,
/// bounded concurrency across documents, and single-flight per document id.
pub struct PipelineCoordinator {
    blob_fetcher: Arc<dyn BlobFetcher>,
    parsing_service: Arc<ParsingService>,
    chunker: Chunker,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    state_repository: Arc<dyn StateRepository>,
    page_repository: Arc<dyn PageRepository>,
    chunk_repository: Arc<dyn ChunkRepository>,
    history_repository: Arc<dyn HistoryRepository>,
    retry: RetryConfig,
    max_concurrent_documents: usize,
    activity_permits: Arc<Semaphore>,
    document_locks: DocumentLocks,
}

impl PipelineCoordinator {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        blob_fetcher: Arc<dyn BlobFetcher>,
        parsing_service: Arc<ParsingService>,
        chunker: Chunker,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        state_repository: Arc<dyn StateRepository>,
        page_repository: Arc<dyn PageRepository>,
        chunk_repository: Arc<dyn ChunkRepository>,
        history_repository: Arc<dyn HistoryRepository>,
        retry: RetryConfig,
        concurrency: ConcurrencyConfig,
    ) -> Self {
        Self {
            blob_fetcher,
            parsing_service,
            chunker,
            embedding_provider,
            state_repository,
            page_repository,
            chunk_repository,
            history_repository,
            retry,
            max_concurrent_documents: concurrency.max_concurrent_documents.max(1),
            activity_permits: Arc::new(Semaphore::new(concurrency.max_concurrent_activities.max(1))),
            document_locks: DocumentLocks::new(),
        }
    }

    /// Processes a batch of documents. Documents run independently up to the
    /// configured concurrency cap; one document's failure never aborts the
    /// others.
    pub async fn process_batch(&self, documents: Vec<DocumentRef>) -> BatchOutcome {
        let workflow_id = Uuid::new_v4();
        let total_documents = documents.len();
        info!(%workflow_id, total_documents, "starting ingestion batch");

        let results: Vec<DocumentOutcome> = futures::stream::iter(
            documents
                .into_iter()
                .map(|document| self.process_document(document)),
        )
        .buffer_unordered(self.max_concurrent_documents)
        .collect()
        .await;

        let successful = results
            .iter()
            .filter(|r| r.status == IngestStatus::Success)
            .count();
        let failed = results
            .iter()
            .filter(|r| r.status == IngestStatus::Failed)
            .count();
        let skipped = results
            .iter()
            .filter(|r| r.status == IngestStatus::Skipped)
            .count();

        info!(%workflow_id, successful, failed, skipped, "ingestion batch finished");

        BatchOutcome {
            workflow_id,
            total_documents,
            successful,
            failed,
            skipped,
            results,
        }
    }

    pub async fn process_document(&self, document: DocumentRef) -> DocumentOutcome {
        // Single-flight: no two workflows for the same document id overlap.
        let _guard = self.document_locks.acquire(document.document_id()).await;

        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let timer = Instant::now();

        match self.run_document(&document).await {
            Ok(RunOutcome::Skipped) => {
                info!(
                    document_id = document.document_id(),
                    "fingerprint unchanged, skipping"
                );
                DocumentOutcome {
                    document_id: document.document_id().to_string(),
                    file_name: document.file_name().to_string(),
                    status: IngestStatus::Skipped,
                    error: None,
                    stats: None,
                }
            }
            Ok(RunOutcome::Completed {
                pages_processed,
                chunks_generated,
            }) => {
                let duration_ms = timer.elapsed().as_millis() as i64;
                self.log_history(ProcessingRecord::success(
                    run_id,
                    document.document_id().to_string(),
                    started_at,
                    pages_processed,
                    chunks_generated,
                    duration_ms,
                ))
                .await;

                info!(
                    document_id = document.document_id(),
                    pages_processed, chunks_generated, duration_ms, "document processed"
                );

                DocumentOutcome {
                    document_id: document.document_id().to_string(),
                    file_name: document.file_name().to_string(),
                    status: IngestStatus::Success,
                    error: None,
                    stats: Some(DocumentStats {
                        pages_processed,
                        chunks_generated,
                        duration_ms,
                    }),
                }
            }
            Err(failure) => {
                let duration_ms = timer.elapsed().as_millis() as i64;
                let message = failure.error.to_string();
                error!(
                    document_id = document.document_id(),
                    error = %message,
                    "document processing failed"
                );

                // Cleanup commits are best-effort: their own failure is
                // logged but never re-thrown.
                let failed_state = DocumentState::failed(
                    document.document_id().to_string(),
                    failure.prior_fingerprint,
                    message.clone(),
                );
                if let Err(commit_error) = self.state_repository.commit(&failed_state).await {
                    warn!(
                        document_id = document.document_id(),
                        error = %commit_error,
                        "failed to record failure state"
                    );
                }

                self.log_history(ProcessingRecord::failed(
                    run_id,
                    document.document_id().to_string(),
                    started_at,
                    duration_ms,
                    message.clone(),
                ))
                .await;

                DocumentOutcome {
                    document_id: document.document_id().to_string(),
                    file_name: document.file_name().to_string(),
                    status: IngestStatus::Failed,
                    error: Some(message),
                    stats: None,
                }
            }
        }
    }

    async fn run_document(&self, document: &DocumentRef) -> Result<RunOutcome, RunFailure> {
        let document_id = document.document_id();

        // CheckState: storage unavailability here is fatal to the run.
        let stored_state = self
            .state_repository
            .find_by_document_id(document_id)
            .await
            .map_err(|e| RunFailure {
                error: PipelineError::Storage(e.to_string()),
                prior_fingerprint: None,
            })?;
        let prior_fingerprint = stored_state
            .as_ref()
            .and_then(|s| s.content_fingerprint().map(str::to_string));

        let fail = |error: PipelineError| RunFailure {
            error,
            prior_fingerprint: prior_fingerprint.clone(),
        };

        let fingerprint = self
            .run_step("fingerprint", PipelineError::Fetch, move || async move {
                self.blob_fetcher
                    .fingerprint(document)
                    .await
                    .map_err(|e| PipelineError::Fetch(e.to_string()))
            })
            .await
            .map_err(&fail)?;

        if let Some(state) = &stored_state {
            if state.matches_fingerprint(&fingerprint) {
                return Ok(RunOutcome::Skipped);
            }
        }

        let bytes = self
            .run_step("fetch", PipelineError::Fetch, move || async move {
                self.blob_fetcher
                    .fetch(document)
                    .await
                    .map_err(|e| PipelineError::Fetch(e.to_string()))
            })
            .await
            .map_err(&fail)?;

        let payload: &[u8] = &bytes;
        let extracted = self
            .run_step("parse", PipelineError::Parse, move || async move {
                self.parsing_service
                    .parse(document_id, document.file_name(), payload)
                    .await
                    .map_err(|e| PipelineError::Parse(e.to_string()))
            })
            .await
            .map_err(&fail)?;

        // Page numbers are contiguous and 1-based regardless of what the
        // extractor reported.
        let total_pages = extracted.len() as i32;
        let pages: Vec<Page> = extracted
            .iter()
            .enumerate()
            .map(|(index, page)| {
                Page::new(
                    document_id.to_string(),
                    document.file_name().to_string(),
                    index as i32 + 1,
                    page.text.clone(),
                    total_pages,
                )
            })
            .collect();

        let page_rows = &pages;
        self.run_step("store_pages", PipelineError::Storage, move || async move {
            self.page_repository
                .replace_for_document(document_id, page_rows)
                .await
                .map_err(|e| PipelineError::Storage(e.to_string()))
        })
        .await
        .map_err(&fail)?;

        // Chunking reads only the in-memory parsed pages, never a re-read of
        // storage.
        let mut chunks: Vec<Chunk> = Vec::new();
        for page in &pages {
            for window in self.chunker.chunk(page.text()) {
                chunks.push(Chunk::new(
                    document_id.to_string(),
                    document.file_name().to_string(),
                    chunks.len() as i32,
                    page.page_number(),
                    page.page_number(),
                    window,
                ));
            }
        }

        let chunk_windows = &chunks;
        let embeddings = self
            .run_step("embed", PipelineError::Embedding, move || async move {
                self.embed_chunks(chunk_windows).await
            })
            .await
            .map_err(&fail)?;

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
            chunk.set_embedding(embedding);
        }

        let chunk_rows = &chunks;
        self.run_step("store_chunks", PipelineError::Storage, move || async move {
            self.chunk_repository
                .replace_for_document(document_id, chunk_rows)
                .await
                .map_err(|e| PipelineError::Storage(e.to_string()))
        })
        .await
        .map_err(&fail)?;

        let completed = DocumentState::completed(document_id.to_string(), fingerprint);
        let completed_state = &completed;
        self.run_step("commit_state", PipelineError::Storage, move || async move {
            self.state_repository
                .commit(completed_state)
                .await
                .map_err(|e| PipelineError::Storage(e.to_string()))
        })
        .await
        .map_err(&fail)?;

        Ok(RunOutcome::Completed {
            pages_processed: total_pages,
            chunks_generated: chunks.len() as i32,
        })
    }

    /// Embeds chunks strictly in chunk-index order. The first failure aborts
    /// the remaining chunks so no partial chunk set is ever persisted; the
    /// whole batch is retried as one step.
    async fn embed_chunks(&self, chunks: &[Chunk]) -> Result<Vec<Vector>, PipelineError> {
        let mut vectors = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            let vector = self
                .embedding_provider
                .embed(chunk.text())
                .await
                .map_err(|e| {
                    PipelineError::Embedding(format!("chunk {}: {}", chunk.chunk_index(), e))
                })?;
            vectors.push(vector);
        }
        Ok(vectors)
    }

    /// Runs one activity-style step under the shared activity permit and the
    /// retry policy.
    async fn run_step<T, F, Fut>(
        &self,
        step: &str,
        timeout_error: fn(String) -> PipelineError,
        operation: F,
    ) -> Result<T, PipelineError>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T, PipelineError>>,
    {
        let _permit = self.acquire_activity_permit().await;
        let outcome: RetryOutcome<T> = with_retry(
            &self.retry,
            step,
            |elapsed: Duration| timeout_error(format!("step timed out after {:?}", elapsed)),
            operation,
        )
        .await?;
        Ok(outcome.value)
    }

    async fn acquire_activity_permit(&self) -> Option<OwnedSemaphorePermit> {
        // The semaphore is never closed; a failed acquire only means shutdown.
        self.activity_permits.clone().acquire_owned().await.ok()
    }

    async fn log_history(&self, record: ProcessingRecord) {
        // Best-effort side channel: an audit failure never affects the
        // document's reported outcome.
        if let Err(e) = self.history_repository.append(&record).await {
            warn!(
                document_id = record.document_id(),
                error = %e,
                "failed to append processing history"
            );
        }
    }
}
