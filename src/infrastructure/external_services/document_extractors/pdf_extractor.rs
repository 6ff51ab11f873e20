use async_trait::async_trait;
use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::application::ports::document_parser::{
    DocumentParseError, DocumentParser, ExtractedPage,
};

pub struct PdfExtractor;

impl PdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentParser for PdfExtractor {
    async fn extract_pages(
        &self,
        bytes: &[u8],
        _file_name: &str,
    ) -> Result<Vec<ExtractedPage>, DocumentParseError> {
        let doc = Document::load_mem(bytes)
            .map_err(|e| DocumentParseError::MalformedDocument(e.to_string()))?;

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let extracted: Vec<Result<ExtractedPage, String>> = page_numbers
            .into_par_iter()
            .map(|page_num| {
                let text = doc
                    .extract_text(&[page_num])
                    .map_err(|e| format!("page {}: {}", page_num, e))?;

                let cleaned: String = text
                    .split('\n')
                    .map(|line| line.trim_end())
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n");

                Ok(ExtractedPage {
                    page_number: page_num as i32,
                    text: cleaned,
                })
            })
            .collect();

        let mut pages = Vec::with_capacity(extracted.len());
        for result in extracted {
            match result {
                Ok(page) => pages.push(page),
                Err(e) => return Err(DocumentParseError::ExtractionFailed(e)),
            }
        }

        if pages.is_empty() {
            return Err(DocumentParseError::MalformedDocument(
                "document contains no pages".to_string(),
            ));
        }

        Ok(pages)
    }
}
