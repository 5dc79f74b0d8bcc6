//! Online PDF source: download the document and extract its text page by
//! page.

use super::{DocumentSource, FetchError};
use async_trait::async_trait;
use lopdf::Document as PdfDocument;
use reqwest::Client;
use std::time::Duration;

pub struct PdfSource {
    client: Client,
}

impl PdfSource {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl DocumentSource for PdfSource {
    async fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        let response = self.client.get(reference).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "HTTP {} fetching PDF",
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        let text = extract_pdf_text(&bytes)?;

        if text.trim().is_empty() {
            return Err(FetchError::EmptyContent);
        }

        tracing::debug!(url = %reference, text_len = text.len(), "Extracted PDF text");
        Ok(text)
    }
}

/// Extract text from every page, skipping pages that fail individually.
fn extract_pdf_text(bytes: &[u8]) -> Result<String, FetchError> {
    let document =
        PdfDocument::load_mem(bytes).map_err(|e| FetchError::Malformed(e.to_string()))?;

    let mut content = String::new();
    for (page_number, _) in document.get_pages() {
        match document.extract_text(&[page_number]) {
            Ok(text) => {
                content.push_str(&text);
                content.push('\n');
            }
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "Failed to extract PDF page text");
            }
        }
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_are_classified_as_malformed() {
        let result = extract_pdf_text(b"this is not a pdf");
        assert!(matches!(result, Err(FetchError::Malformed(_))));
    }
}
