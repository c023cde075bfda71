// src/llm/mod.rs
//! Text-completion seam used by the query structurer and description expander

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Language model request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Language model returned error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Language model returned an empty reply")]
    EmptyReply,
}

/// A language model that turns a prompt into free text
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Model name for logging
    fn name(&self) -> &str;
}

/// Strip markdown code fences and any prose around a JSON object
pub fn strip_code_fences(reply: &str) -> &str {
    let mut text = reply.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // Drop the info string (```json) along with the opening fence
        text = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches("json").trim_start_matches("JSON"),
        };
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }
    let text = text.trim();

    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_json_fence() {
        let reply = "```json\n{\"role\": \"nurse\"}\n```";
        assert_eq!(strip_code_fences(reply), "{\"role\": \"nurse\"}");
    }

    #[test]
    fn test_strip_bare_fence() {
        let reply = "  ```\n{\"role\": null}\n```  ";
        assert_eq!(strip_code_fences(reply), "{\"role\": null}");
    }

    #[test]
    fn test_strip_single_line_fence() {
        assert_eq!(strip_code_fences("```json{\"a\": 1}```"), "{\"a\": 1}");
    }

    #[test]
    fn test_plain_json_untouched() {
        assert_eq!(strip_code_fences("{\"a\": 1}"), "{\"a\": 1}");
    }

    #[test]
    fn test_surrounding_prose_removed() {
        let reply = "Here is the result:\n{\"a\": 1}\nHope this helps.";
        assert_eq!(strip_code_fences(reply), "{\"a\": 1}");
    }
}
