pub mod chunk;
pub mod document;
pub mod page;
pub mod processing_record;
pub mod search;

pub use chunk::Chunk;
pub use document::{DocumentOperation, DocumentRef, DocumentState, DocumentStatus};
pub use page::Page;
pub use processing_record::{ProcessingRecord, RunStatus};
pub use search::{ChunkLocator, ScoredChunk, SearchHit, SearchMode, SourceMode};
