//! Prompt assembly: typed template segments rendered into an ordered message
//! sequence at call time.
//!
//! Model capabilities are applied here, uniformly: models without system
//! message support get the instruction silently dropped (never merged into
//! the user text), and fixed-temperature models are handled by
//! [`ModelDescriptor::effective_temperature`] at the call site.

use crate::models::{ChatMessage, ModelDescriptor};

/// Example instructions surfaced to UIs for the document-processing flow.
pub const EXAMPLE_INSTRUCTIONS: [&str; 6] = [
    "You are a Text Summarizer. Provide a concise summary of the input text within 100 words, capturing its essential points.",
    "You are a Grammar Checker. Correct grammatical errors in the input text while preserving its original meaning and style.",
    "You are a Content Optimizer. Your task is to polish the input text for better clarity, fluency, and impact, without altering its fundamental meaning.",
    "Please process the following webpage of a job posting and output the following information: company name, job title, salary range (use N/A if not mentioned), and ten skill names mentioned.",
    "Please list ten skill names mentioned in the following job description.",
    "Please provide the salary range mentioned in the following job description. If no salary range is specified, please inform the user accordingly.",
];

/// One typed segment of a prompt, in assembly order.
#[derive(Debug, Clone)]
enum Segment {
    /// System instruction; dropped for models that do not support one.
    Instruction(String),

    /// Prior conversation turns, oldest first.
    PriorTurns(Vec<ChatMessage>),

    /// The current user input.
    UserInput(String),

    /// One-shot document prompt: instruction concatenated directly with the
    /// fetched content as a single combined user message, no role separation.
    Document { instruction: String, content: String },
}

/// Ordered list of typed segments, rendered against a model descriptor.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    segments: Vec<Segment>,
}

impl PromptTemplate {
    /// Conversational template: optional system instruction, prior turns,
    /// current user message. `history` must already be in stored order.
    pub fn chat(
        system_prompt: Option<&str>,
        history: Vec<ChatMessage>,
        message: &str,
    ) -> Self {
        let mut segments = Vec::new();
        if let Some(instruction) = system_prompt.filter(|s| !s.trim().is_empty()) {
            segments.push(Segment::Instruction(instruction.to_string()));
        }
        if !history.is_empty() {
            segments.push(Segment::PriorTurns(history));
        }
        segments.push(Segment::UserInput(message.to_string()));
        Self { segments }
    }

    /// One-shot document template: instruction + content, no history.
    pub fn one_shot(instruction: &str, content: &str) -> Self {
        Self {
            segments: vec![Segment::Document {
                instruction: instruction.to_string(),
                content: content.to_string(),
            }],
        }
    }

    /// Render the ordered message sequence for the given model.
    pub fn render(&self, model: &ModelDescriptor) -> Vec<ChatMessage> {
        let mut messages = Vec::new();
        for segment in &self.segments {
            match segment {
                Segment::Instruction(instruction) => {
                    if model.supports_system_message {
                        messages.push(ChatMessage::system(instruction.clone()));
                    }
                }
                Segment::PriorTurns(history) => messages.extend(history.iter().cloned()),
                Segment::UserInput(input) => messages.push(ChatMessage::user(input.clone())),
                Segment::Document {
                    instruction,
                    content,
                } => messages.push(ChatMessage::user(format!("{}{}", instruction, content))),
            }
        }
        messages
    }
}

/// System instruction for the translation operation.
pub fn translation_instruction(target_language: &str) -> String {
    format!(
        "You are a Language Translator. Convert the user's input to {target}, \
         outputting only the translated text. \
         If the input is already in {target}, output it as-is.",
        target = target_language
    )
}
