use async_trait::async_trait;

use crate::application::ports::document_parser::{
    DocumentParseError, DocumentParser, ExtractedPage,
};

/// Plain-text and markdown files carry no page structure, so the whole file
/// becomes a single page.
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentParser for TextExtractor {
    async fn extract_pages(
        &self,
        bytes: &[u8],
        _file_name: &str,
    ) -> Result<Vec<ExtractedPage>, DocumentParseError> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| DocumentParseError::MalformedDocument(format!("invalid utf-8: {}", e)))?;

        Ok(vec![ExtractedPage {
            page_number: 1,
            text: text.to_string(),
        }])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn produces_a_single_page() {
        let extractor = TextExtractor::new();
        let pages = extractor
            .extract_pages(b"hello world", "notes.txt")
            .await
            .unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[0].text, "hello world");
    }

    #[tokio::test]
    async fn rejects_invalid_utf8() {
        let extractor = TextExtractor::new();
        let result = extractor.extract_pages(&[0xff, 0xfe, 0x00], "notes.txt").await;

        assert!(matches!(
            result,
            Err(DocumentParseError::MalformedDocument(_))
        ));
    }
}
