use lopdf::Document;
use tracing::{debug, info, warn};

use crate::error::{Result, ServiceError};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Rejects anything not declared as `application/pdf`. Runs before any parsing.
pub fn ensure_pdf(content_type: Option<&str>) -> Result<()> {
    match content_type {
        Some(PDF_MIME_TYPE) => Ok(()),
        other => Err(ServiceError::UnsupportedMediaType(
            other.unwrap_or("no content type").to_string(),
        )),
    }
}

/// Plain text of every page in page order, concatenated and trimmed.
pub fn extract_text(bytes: &[u8]) -> Result<String> {
    let document =
        Document::load_mem(bytes).map_err(|e| ServiceError::Extraction(e.to_string()))?;

    let pages = document.get_pages();
    debug!(page_count = %pages.len(), "Loaded PDF document");

    let mut text = String::new();
    for page_number in pages.keys() {
        let page_text = document
            .extract_text(&[*page_number])
            .map_err(|e| ServiceError::Extraction(format!("page {page_number}: {e}")))?;
        text.push_str(&page_text);
    }

    let text = text.trim();
    if text.is_empty() {
        warn!(page_count = %pages.len(), "PDF contains no extractable text");
        return Err(ServiceError::EmptyDocument);
    }

    info!(
        page_count = %pages.len(),
        characters = %text.chars().count(),
        "Extracted text from PDF"
    );
    Ok(text.to_string())
}

/// Runs [`extract_text`] on the blocking pool; PDF parsing is CPU-bound.
pub async fn extract_text_blocking(bytes: Vec<u8>) -> Result<String> {
    tokio::task::spawn_blocking(move || extract_text(&bytes))
        .await
        .map_err(|e| ServiceError::Internal(format!("PDF extraction task failed: {e}")))?
}
