use bytes::Bytes;
use tracing::debug;

use super::{DocumentKind, ExtractedDocument, ExtractionError};

const MAX_CONSECUTIVE_BLANK_LINES: usize = 2;

/// Extracts text from an uploaded document.
///
/// Resumes are PDFs and are parsed on a blocking thread; job descriptions are
/// plain UTF-8. A document that normalises to nothing is an error, which
/// callers treat the same as an absent document.
pub async fn extract_text(
    kind: DocumentKind,
    bytes: Bytes,
    max_bytes: usize,
) -> Result<ExtractedDocument, ExtractionError> {
    if bytes.len() > max_bytes {
        return Err(ExtractionError::TooLarge {
            size: bytes.len(),
            limit: max_bytes,
        });
    }

    let raw = match kind {
        DocumentKind::Resume => {
            tokio::task::spawn_blocking(move || {
                pdf_extract::extract_text_from_mem(&bytes)
                    .map_err(|e| ExtractionError::Pdf(e.to_string()))
            })
            .await??
        }
        DocumentKind::JobDescription => String::from_utf8(bytes.to_vec())?,
    };

    let document = ExtractedDocument::from_text(kind, &raw)?;
    debug!("Extracted {:?}: {} chars", kind, document.text().len());
    Ok(document)
}

impl ExtractedDocument {
    /// Builds a document from already-decoded text.
    pub fn from_text(kind: DocumentKind, raw: &str) -> Result<Self, ExtractionError> {
        let text = normalize(raw);
        if text.is_empty() {
            return Err(ExtractionError::Empty(kind));
        }
        Ok(Self { kind, text })
    }
}

/// CRLF → LF, strips a leading BOM, trims line ends, collapses long runs of
/// blank lines and trims the whole text.
fn normalize(raw: &str) -> String {
    let raw = raw.trim_start_matches('\u{feff}').replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0;
    for line in raw.lines().map(str::trim_end) {
        if line.is_empty() {
            blank_run += 1;
            if blank_run > MAX_CONSECUTIVE_BLANK_LINES {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }

    lines.join("\n").trim().to_string()
}
