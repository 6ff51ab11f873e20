use serde::{Deserialize, Serialize};

/// Which retrieval signal(s) to use for a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    Lexical,
    Semantic,
    Hybrid,
}

/// Where a fused hit's score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceMode {
    Lexical,
    Semantic,
    Hybrid,
}

/// Identity of a result across ranked lists: the same chunk position found by
/// both adapters must fuse into a single hit.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChunkLocator {
    pub document_id: String,
    pub chunk_index: i32,
}

/// One scored result from a single index adapter, ordered by descending score
/// within its source list.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub document_id: String,
    pub file_name: String,
    pub chunk_index: i32,
    pub page_start: i32,
    pub page_end: i32,
    pub score: f32,
}

impl ScoredChunk {
    pub fn locator(&self) -> ChunkLocator {
        ChunkLocator {
            document_id: self.document_id.clone(),
            chunk_index: self.chunk_index,
        }
    }
}

/// A fused, rank-ordered result returned to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub document_id: String,
    pub file_name: String,
    pub chunk_index: i32,
    pub page_start: i32,
    pub page_end: i32,
    pub score: f32,
    pub source_mode: SourceMode,
}
