//! Document router: dispatch an input-type tag to its source-specific
//! one-shot pipeline.
//!
//! Fetch failures become descriptive in-band diagnostics (the conversation
//! display always gets a readable entry), while an unsupported input-type
//! tag is a caller programming error and is rejected before any network
//! call.

use crate::models::ModelDescriptor;
use crate::services::fetchers::{
    DocumentSource, FetchError, PdfSource, WebpageSource, YoutubeSource,
};
use crate::services::prompt::PromptTemplate;
use crate::services::providers::CompletionProvider;
use secrecy::SecretString;
use std::time::Duration;

/// Supported input kinds for document processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Webpage,
    Pdf,
    Youtube,
}

impl InputKind {
    /// Parse the caller-facing input-type tag. Unknown tags are a caller
    /// defect, so this returns `None` rather than guessing.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "Text" => Some(InputKind::Text),
            "Webpage URL" => Some(InputKind::Webpage),
            "PDF URL" => Some(InputKind::Pdf),
            "Youtube URL" => Some(InputKind::Youtube),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InputKind::Text => "Text",
            InputKind::Webpage => "Webpage URL",
            InputKind::Pdf => "PDF URL",
            InputKind::Youtube => "Youtube URL",
        }
    }
}

/// Routes document-processing requests to the matching source pipeline and
/// performs the one-shot completion.
pub struct DocumentRouter {
    webpage: WebpageSource,
    pdf: PdfSource,
    youtube: YoutubeSource,
}

impl DocumentRouter {
    pub fn new(fetch_timeout: Duration) -> Self {
        Self {
            webpage: WebpageSource::new(fetch_timeout),
            pdf: PdfSource::new(fetch_timeout),
            youtube: YoutubeSource::new(fetch_timeout),
        }
    }

    async fn fetch_content(&self, kind: InputKind, input: &str) -> Result<String, FetchError> {
        match kind {
            // Plain text is the content; no fetch.
            InputKind::Text => Ok(input.to_string()),
            InputKind::Webpage => self.webpage.fetch(input).await,
            InputKind::Pdf => self.pdf.fetch(input).await,
            InputKind::Youtube => self.youtube.fetch(input).await,
        }
    }

    /// Run the pipeline for `kind`: fetch content, build the one-shot
    /// prompt, invoke completion. Fetch and completion failures are
    /// returned as readable diagnostic text, not errors.
    #[allow(clippy::too_many_arguments)]
    pub async fn process(
        &self,
        provider: &dyn CompletionProvider,
        model: &ModelDescriptor,
        kind: InputKind,
        input: &str,
        instruction: &str,
        temperature: f32,
        credential: &SecretString,
    ) -> String {
        let content = match self.fetch_content(kind, input).await {
            Ok(content) => content,
            Err(error) => {
                tracing::warn!(kind = kind.label(), error = %error, "Content fetch failed");
                return render_diagnostic(kind, input, &error);
            }
        };

        let messages = PromptTemplate::one_shot(instruction, &content).render(model);
        let temperature = model.effective_temperature(temperature);

        match provider
            .complete(&messages, model.provider_id, temperature, credential)
            .await
        {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(kind = kind.label(), error = %error, "Completion failed");
                error.user_message()
            }
        }
    }
}

/// Render a classified fetch failure as user-visible diagnostic text. Kept
/// separate from classification so tests can assert on either side alone.
pub fn render_diagnostic(kind: InputKind, reference: &str, error: &FetchError) -> String {
    match kind {
        InputKind::Text => format!("Error processing text: {}", error),
        InputKind::Webpage => format!("Error processing webpage: {}", error),
        InputKind::Pdf => format!("Error processing PDF: {}", error),
        InputKind::Youtube => {
            let headline = match error {
                FetchError::NoTranscript => "No transcript available for this video".to_string(),
                other => format!("Error processing YouTube video: {}", other),
            };
            format!(
                "{}\n\n\
                 Possible reasons:\n\
                 - Video has no captions/transcript available\n\
                 - Video is private or region-restricted\n\
                 - YouTube is blocking automated access\n\
                 - Invalid video URL format\n\n\
                 URL attempted: {}",
                headline, reference
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ModelRegistry;
    use crate::services::providers::MockProvider;

    fn model(label: &str) -> &'static ModelDescriptor {
        ModelRegistry::builtin().resolve(label).expect("known label")
    }

    #[test]
    fn parses_supported_tags_and_rejects_the_rest() {
        assert_eq!(InputKind::parse("Text"), Some(InputKind::Text));
        assert_eq!(InputKind::parse("Webpage URL"), Some(InputKind::Webpage));
        assert_eq!(InputKind::parse("PDF URL"), Some(InputKind::Pdf));
        assert_eq!(InputKind::parse("Youtube URL"), Some(InputKind::Youtube));
        assert_eq!(InputKind::parse("Spreadsheet URL"), None);
        assert_eq!(InputKind::parse("text"), None);
    }

    #[test]
    fn missing_transcript_diagnostic_is_descriptive() {
        let text = render_diagnostic(
            InputKind::Youtube,
            "https://youtu.be/abc123xyz00",
            &FetchError::NoTranscript,
        );
        assert!(text.contains("No transcript available"));
        assert!(text.contains("private or region-restricted"));
        assert!(text.contains("https://youtu.be/abc123xyz00"));
    }

    #[test]
    fn webpage_diagnostic_names_the_source_kind() {
        let text = render_diagnostic(
            InputKind::Webpage,
            "https://example.com",
            &FetchError::Timeout,
        );
        assert!(text.starts_with("Error processing webpage:"));
    }

    #[tokio::test]
    async fn plain_text_pipeline_invokes_no_fetch() {
        let router = DocumentRouter::new(Duration::from_secs(5));
        let provider = MockProvider::new();
        let credential = SecretString::new("sk-test".to_string());

        let output = router
            .process(
                &provider,
                model("GPT-4o mini"),
                InputKind::Text,
                "Hello",
                "Summarize in 5 words. ",
                0.7,
                &credential,
            )
            .await;

        assert_eq!(output, "Mock completion for: Summarize in 5 words. Hello");
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model_id, "gpt-4o-mini");
    }

    #[tokio::test]
    async fn provider_failure_surfaces_as_readable_text() {
        use crate::services::providers::ProviderError;

        let router = DocumentRouter::new(Duration::from_secs(5));
        let provider = MockProvider::new();
        provider.fail_with(|| ProviderError::RateLimited);
        let credential = SecretString::new("sk-test".to_string());

        let output = router
            .process(
                &provider,
                model("GPT-4o"),
                InputKind::Text,
                "Hello",
                "Summarize. ",
                0.7,
                &credential,
            )
            .await;

        assert!(output.contains("rate-limiting"));
    }
}
