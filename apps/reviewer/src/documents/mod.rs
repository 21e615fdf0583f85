// Document Extractor: turns uploaded bytes into normalised plain text.

pub mod extract;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use extract::extract_text;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    JobDescription,
}

impl DocumentKind {
    /// Multipart field name the document is uploaded under.
    pub fn field_name(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "resume",
            DocumentKind::JobDescription => "job_description",
        }
    }

    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "resume" => Some(DocumentKind::Resume),
            "job_description" | "jd" => Some(DocumentKind::JobDescription),
            _ => None,
        }
    }
}

/// Extracted, normalised, non-empty document text. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtractedDocument {
    kind: DocumentKind,
    text: String,
}

impl ExtractedDocument {
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("could not read PDF: {0}")]
    Pdf(String),

    #[error("job description is not valid UTF-8 text")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("{0:?} contains no extractable text")]
    Empty(DocumentKind),

    #[error("upload is {size} bytes; the limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}
