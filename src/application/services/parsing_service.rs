use std::sync::Arc;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::application::ports::document_parser::{
    DocumentParseError, DocumentParser, ExtractedPage,
};
use crate::application::services::parse_cache::ParseCache;

/// Converts raw bytes into an ordered page sequence, consulting the parse
/// cache keyed by (document id, byte-content hash) so unchanged bytes are
/// never parsed twice.
pub struct ParsingService {
    parser: Arc<dyn DocumentParser>,
    cache: ParseCache,
}

impl ParsingService {
    pub fn new(parser: Arc<dyn DocumentParser>, cache: ParseCache) -> Self {
        Self { parser, cache }
    }

    pub async fn parse(
        &self,
        document_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<Arc<Vec<ExtractedPage>>, DocumentParseError> {
        let content_hash = content_hash(bytes);

        if let Some(pages) = self.cache.get(document_id, &content_hash) {
            debug!(document_id, "parse cache hit");
            return Ok(pages);
        }

        let mut pages = self.parser.extract_pages(bytes, file_name).await?;
        // The external parser does not guarantee page order.
        pages.sort_by_key(|page| page.page_number);

        self.cache.insert(document_id, &content_hash, pages.clone());

        Ok(Arc::new(pages))
    }
}

fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}
