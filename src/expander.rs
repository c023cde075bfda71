// src/expander.rs
use crate::llm::{prompts, LanguageModel};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExpandError {
    #[error("Description snippet is required.")]
    MissingDescription,

    #[error("Language model is not configured on this server.")]
    ModelNotConfigured,
}

/// Expands short job snippets into full descriptions
pub struct DescriptionExpander {
    model: Option<Arc<dyn LanguageModel>>,
}

impl DescriptionExpander {
    pub fn new(model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self { model }
    }

    /// Expand `snippet`, echoing it back unchanged if the model call fails
    pub async fn expand(&self, snippet: &str) -> Result<String, ExpandError> {
        if snippet.trim().is_empty() {
            return Err(ExpandError::MissingDescription);
        }
        let model = self.model.as_ref().ok_or(ExpandError::ModelNotConfigured)?;

        info!("Expanding description snippet ({} chars)", snippet.len());

        match model
            .complete(&prompts::expand_description_prompt(snippet))
            .await
        {
            Ok(text) => {
                info!("Expanded description with {}", model.name());
                Ok(text.trim().to_string())
            }
            Err(e) => {
                warn!("Description expansion failed, echoing snippet: {}", e);
                Ok(snippet.to_string())
            }
        }
    }
}
