// src/aggregator/mod.rs
//! Fan-out search across every configured source, merged and deduplicated

pub mod dedup;

pub use dedup::{dedup_listings, Signature};

use crate::config::AppConfig;
use crate::llm::LanguageModel;
use crate::sources::{
    fetch_within, AdzunaSource, JobSource, JobsPikrSource, PagePolicy, SnapshotSource,
};
use crate::structurer::QueryStructurer;
use crate::types::JobListing;
use futures::future::join_all;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, info_span, Instrument};

/// Keep-alive probe answered without touching the model or any source
pub const WAKEUP_QUERY: &str = "wakeup";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("A search query 'q' is required.")]
    MissingQuery,

    #[error("No job sources are configured on this server.")]
    NoSourcesConfigured,
}

pub struct Aggregator {
    structurer: QueryStructurer,
    sources: Vec<Arc<dyn JobSource>>,
    source_timeout: Duration,
}

impl Aggregator {
    pub fn new(
        structurer: QueryStructurer,
        sources: Vec<Arc<dyn JobSource>>,
        source_timeout: Duration,
    ) -> Self {
        Self {
            structurer,
            sources,
            source_timeout,
        }
    }

    /// Build the aggregator with every source that has credentials configured
    pub fn from_config(
        config: &AppConfig,
        model: Option<Arc<dyn LanguageModel>>,
    ) -> anyhow::Result<Self> {
        let mut sources: Vec<Arc<dyn JobSource>> = Vec::new();
        let timeout = config.request_timeout();

        if let Some((app_id, app_key)) = config.sources.adzuna.credentials() {
            let pages = PagePolicy {
                max_pages: config.max_pages,
                delay: config.page_delay(),
            };
            sources.push(Arc::new(AdzunaSource::new(
                &config.sources.adzuna,
                app_id,
                app_key,
                pages,
                timeout,
            )?));
            debug!("Adzuna source enabled");
        } else {
            debug!("Adzuna credentials missing, source disabled");
        }

        if let Some((client_id, auth_key)) = config.sources.jobspikr.credentials() {
            sources.push(Arc::new(JobsPikrSource::new(
                &config.sources.jobspikr,
                client_id,
                auth_key,
                timeout,
            )?));
            debug!("JobsPikr source enabled");
        } else {
            debug!("JobsPikr credentials missing, source disabled");
        }

        if let Some(path) = &config.sources.snapshot.path {
            sources.push(Arc::new(SnapshotSource::new(path.clone())));
            debug!("Snapshot source enabled: {}", path.display());
        }

        Ok(Self::new(
            QueryStructurer::new(model),
            sources,
            config.source_timeout(),
        ))
    }

    /// Names of the configured sources, in fan-in order
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Run a full search for a free-text query.
    ///
    /// Results keep source order: everything from the first source, then the
    /// listings from later sources whose signature has not been seen yet.
    pub async fn search(&self, raw_query: &str) -> Result<Vec<JobListing>, SearchError> {
        let query = raw_query.to_lowercase();

        if query.is_empty() {
            return Err(SearchError::MissingQuery);
        }
        if query == WAKEUP_QUERY {
            info!("Received wakeup call, returning empty list");
            return Ok(Vec::new());
        }
        if self.sources.is_empty() {
            return Err(SearchError::NoSourcesConfigured);
        }

        let span = info_span!("search", request_id = %uuid::Uuid::new_v4());
        async {
            info!("Received search query: '{}'", query);
            let structured = self.structurer.structure(&query).await;

            let batches = join_all(
                self.sources
                    .iter()
                    .map(|source| fetch_within(source.as_ref(), &structured, self.source_timeout)),
            )
            .await;

            let merged: Vec<JobListing> = batches.into_iter().flatten().collect();
            let fetched = merged.len();
            let unique = dedup_listings(merged);

            info!(
                "Found {} unique jobs ({} fetched) from {} sources",
                unique.len(),
                fetched,
                self.sources.len()
            );
            Ok(unique)
        }
        .instrument(span)
        .await
    }
}
