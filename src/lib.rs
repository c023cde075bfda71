//! Job search aggregation service.
//!
//! A free-text query is structured by a language model, fanned out to every
//! configured job source concurrently, and the merged results are
//! deduplicated by (title, company, location). A second endpoint expands short
//! job snippets into full descriptions.

use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

pub mod aggregator;
pub mod config;
pub mod expander;
pub mod llm;
pub mod sources;
pub mod structurer;
pub mod types;
pub mod web;

#[cfg(test)]
mod test_support;

pub use aggregator::{Aggregator, SearchError};
pub use config::AppConfig;
pub use expander::{DescriptionExpander, ExpandError};
pub use llm::{GeminiClient, LanguageModel};
pub use sources::JobSource;
pub use structurer::QueryStructurer;
pub use types::{JobListing, StructuredQuery};
pub use web::{build_rocket, start_web_server};

/// Build the language model client when an API key is configured
pub fn build_language_model(config: &AppConfig) -> Result<Option<Arc<dyn LanguageModel>>> {
    match config.model.api_key() {
        Some(api_key) => {
            let client = GeminiClient::new(&config.model, api_key, config.request_timeout())?;
            info!("Language model: {}", config.model.name);
            Ok(Some(Arc::new(client)))
        }
        None => {
            warn!("No language model API key configured; queries will not be structured");
            Ok(None)
        }
    }
}

/// Build the search aggregator and description expander sharing one model client
pub fn build_services(config: &AppConfig) -> Result<(Aggregator, DescriptionExpander)> {
    let model = build_language_model(config)?;
    let aggregator = Aggregator::from_config(config, model.clone())?;
    let expander = DescriptionExpander::new(model);
    Ok((aggregator, expander))
}
