// src/structurer.rs
use crate::llm::{prompts, strip_code_fences, LanguageModel, LlmError};
use crate::types::StructuredQuery;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
enum StructureError {
    #[error(transparent)]
    Model(#[from] LlmError),

    #[error("Unparsable model reply: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Turns free-text queries into [`StructuredQuery`] values via a language model
pub struct QueryStructurer {
    model: Option<Arc<dyn LanguageModel>>,
}

impl QueryStructurer {
    pub fn new(model: Option<Arc<dyn LanguageModel>>) -> Self {
        Self { model }
    }

    /// Structure `raw_text`, which the caller has already lowercased.
    ///
    /// Never fails: without a model, or when the call or parsing fails, the
    /// raw text becomes the role and every other field is left empty.
    pub async fn structure(&self, raw_text: &str) -> StructuredQuery {
        let Some(model) = &self.model else {
            debug!("No language model configured, using raw query as role");
            return StructuredQuery::fallback(raw_text);
        };

        info!("Structuring query with {}: '{}'", model.name(), raw_text);

        match Self::ask(model.as_ref(), raw_text).await {
            Ok(query) => {
                info!("Structured query: {:?}", query);
                query
            }
            Err(e) => {
                warn!("Query structuring failed, falling back to raw text: {}", e);
                StructuredQuery::fallback(raw_text)
            }
        }
    }

    async fn ask(model: &dyn LanguageModel, raw_text: &str) -> Result<StructuredQuery, StructureError> {
        let reply = model
            .complete(&prompts::structure_query_prompt(raw_text))
            .await?;
        Ok(serde_json::from_str(strip_code_fences(&reply))?)
    }
}
