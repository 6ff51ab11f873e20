use async_trait::async_trait;

#[derive(Debug)]
pub enum DocumentParseError {
    UnsupportedFormat(String),
    MalformedDocument(String),
    ExtractionFailed(String),
}

impl std::fmt::Display for DocumentParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentParseError::UnsupportedFormat(kind) => {
                write!(f, "Unsupported format: {}", kind)
            }
            DocumentParseError::MalformedDocument(msg) => {
                write!(f, "Malformed document: {}", msg)
            }
            DocumentParseError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
        }
    }
}

impl std::error::Error for DocumentParseError {}

/// One page as returned by the external parse capability. Page numbers are
/// 1-based; ordering is not guaranteed by the extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    pub page_number: i32,
    pub text: String,
}

/// External parse capability: raw bytes in, unordered page texts out.
/// A parser failure is a hard failure for the document's run; no placeholder
/// text is ever substituted for unparseable content.
#[async_trait]
pub trait DocumentParser: Send + Sync {
    async fn extract_pages(
        &self,
        bytes: &[u8],
        file_name: &str,
    ) -> Result<Vec<ExtractedPage>, DocumentParseError>;
}
