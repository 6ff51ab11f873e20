pub mod chunk_model;
pub mod history_model;
pub mod page_model;
pub mod state_model;

pub use chunk_model::{ChunkModel, NewChunkModel};
pub use history_model::{NewProcessingRecordModel, ProcessingRecordModel};
pub use page_model::{NewPageModel, PageModel};
pub use state_model::{DocumentStateModel, NewDocumentStateModel};
