use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;

use super::{PdfExtractor, TextExtractor};
use crate::application::ports::document_parser::{
    DocumentParseError, DocumentParser, ExtractedPage,
};

/// Routes a file to the right extractor by extension. Word documents and
/// anything else without a dedicated extractor are rejected as unsupported.
pub struct CompositeDocumentExtractor {
    pdf_extractor: Arc<PdfExtractor>,
    text_extractor: Arc<TextExtractor>,
}

impl CompositeDocumentExtractor {
    pub fn new() -> Self {
        Self {
            pdf_extractor: Arc::new(PdfExtractor::new()),
            text_extractor: Arc::new(TextExtractor::new()),
        }
    }

    fn extractor_for(&self, file_name: &str) -> Option<Arc<dyn DocumentParser>> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)?;

        match extension.as_str() {
            "pdf" => Some(self.pdf_extractor.clone()),
            "txt" | "md" => Some(self.text_extractor.clone()),
            _ => None,
        }
    }
}

impl Default for CompositeDocumentExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentParser for CompositeDocumentExtractor {
    async fn extract_pages(
        &self,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<Vec<ExtractedPage>, DocumentParseError> {
        let extractor = self.extractor_for(file_name).ok_or_else(|| {
            DocumentParseError::UnsupportedFormat(format!(
                "no extractor registered for {}",
                file_name
            ))
        })?;

        extractor.extract_pages(bytes, file_name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn routes_text_files_to_the_text_extractor() {
        let composite = CompositeDocumentExtractor::new();
        let pages = composite
            .extract_pages(b"plain contents", "report.TXT")
            .await
            .unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].text, "plain contents");
    }

    #[tokio::test]
    async fn rejects_word_documents() {
        let composite = CompositeDocumentExtractor::new();
        let result = composite.extract_pages(b"...", "contract.docx").await;

        assert!(matches!(
            result,
            Err(DocumentParseError::UnsupportedFormat(_))
        ));
    }

    #[tokio::test]
    async fn rejects_files_without_an_extension() {
        let composite = CompositeDocumentExtractor::new();
        let result = composite.extract_pages(b"...", "README").await;

        assert!(matches!(
            result,
            Err(DocumentParseError::UnsupportedFormat(_))
        ));
    }
}
