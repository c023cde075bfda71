// src/sources/mod.rs
//! Adapters for upstream job-listing providers
//!
//! Each source maps one provider's response format onto [`JobListing`].
//! Failures are returned as [`SourceError`] and absorbed by [`fetch_within`],
//! so a broken provider only shrinks the merged result set.

pub mod adzuna;
pub mod jobspikr;
pub mod pagination;
pub mod snapshot;

pub use adzuna::AdzunaSource;
pub use jobspikr::JobsPikrSource;
pub use pagination::PagePolicy;
pub use snapshot::SnapshotSource;

use crate::types::{JobListing, StructuredQuery};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;
use tokio::time::Instant;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Timed out after {secs}s")]
    Timeout { secs: u64 },
}

/// One upstream job-listing provider
#[async_trait]
pub trait JobSource: Send + Sync {
    /// Fetch listings for `query`.
    ///
    /// Sources return an empty list without any request when the query has
    /// no role to search for.
    async fn fetch(&self, query: &StructuredQuery) -> Result<Vec<JobListing>, SourceError>;

    /// Fetch listings for `query`, giving up at `deadline`.
    ///
    /// The default drops the whole fetch when time runs out. Sources that
    /// make several requests override it to return what they have.
    async fn fetch_until(
        &self,
        query: &StructuredQuery,
        deadline: Instant,
    ) -> Result<Vec<JobListing>, SourceError> {
        let secs = deadline.saturating_duration_since(Instant::now()).as_secs();
        tokio::time::timeout_at(deadline, self.fetch(query))
            .await
            .unwrap_or(Err(SourceError::Timeout { secs }))
    }

    /// Source name for logging
    fn name(&self) -> &str;
}

/// Run `source` within `budget`, turning any failure into an empty list
pub async fn fetch_within(
    source: &dyn JobSource,
    query: &StructuredQuery,
    budget: Duration,
) -> Vec<JobListing> {
    match source.fetch_until(query, Instant::now() + budget).await {
        Ok(listings) => {
            debug!("Source {} returned {} listings", source.name(), listings.len());
            listings
        }
        Err(e) => {
            warn!(source = source.name(), "Source failed, skipping: {}", e);
            Vec::new()
        }
    }
}

/// Read an upstream error body for logging
pub(crate) async fn api_error(response: reqwest::Response) -> SourceError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    SourceError::Api { status, message }
}
