//! Webpage source: fetch HTML and extract structural text nodes.

use super::{DocumentSource, FetchError};
use async_trait::async_trait;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;

/// Tags whose text is considered page content.
const CONTENT_SELECTOR: &str = "p, li, div, a";

pub struct WebpageSource {
    client: Client,
}

impl WebpageSource {
    pub fn new(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

#[async_trait]
impl DocumentSource for WebpageSource {
    async fn fetch(&self, reference: &str) -> Result<String, FetchError> {
        let response = self.client.get(reference).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Network(format!(
                "HTTP {} fetching webpage",
                response.status()
            )));
        }

        let html = response.text().await?;
        let text = extract_structural_text(&html);

        if text.trim().is_empty() {
            return Err(FetchError::EmptyContent);
        }

        tracing::debug!(url = %reference, text_len = text.len(), "Extracted webpage text");
        Ok(text)
    }
}

/// Collect the text of content-bearing elements, one block per element.
fn extract_structural_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse(CONTENT_SELECTOR).expect("static selector");

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>())
        .map(|block| block.trim().to_string())
        .filter(|block| !block.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_paragraphs_and_list_items() {
        let html = r#"
            <html><body>
                <p>First paragraph.</p>
                <ul><li>Item one</li><li>Item two</li></ul>
                <script>ignored();</script>
            </body></html>
        "#;
        let text = extract_structural_text(html);
        assert!(text.contains("First paragraph."));
        assert!(text.contains("Item one"));
        assert!(text.contains("Item two"));
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn markup_without_content_yields_empty_text() {
        let text = extract_structural_text("<html><head><title>t</title></head></html>");
        assert!(text.trim().is_empty());
    }
}
