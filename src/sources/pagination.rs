// src/sources/pagination.rs
use super::SourceError;
use crate::types::JobListing;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

/// How far a paginated source may walk for a single query
#[derive(Debug, Clone, Copy)]
pub struct PagePolicy {
    pub max_pages: u32,
    /// Pause before every page after the first
    pub delay: Duration,
}

impl Default for PagePolicy {
    fn default() -> Self {
        Self {
            max_pages: 5,
            delay: Duration::ZERO,
        }
    }
}

impl PagePolicy {
    /// Fetch pages `1..=max_pages` in order, stopping at the first empty page.
    ///
    /// A failure on the first page is returned; a failure on a later page ends
    /// the walk and keeps what was collected so far.
    pub async fn collect<F, Fut>(&self, fetch_page: F) -> Result<Vec<JobListing>, SourceError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<JobListing>, SourceError>>,
    {
        self.collect_until(None, fetch_page).await
    }

    /// Like [`collect`](Self::collect), but the walk ends at `deadline`.
    ///
    /// Running out of time counts as a failure of the page in flight: on the
    /// first page it is a [`SourceError::Timeout`], afterwards the pages
    /// already fetched are returned.
    pub async fn collect_until<F, Fut>(
        &self,
        deadline: Option<Instant>,
        mut fetch_page: F,
    ) -> Result<Vec<JobListing>, SourceError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<Vec<JobListing>, SourceError>>,
    {
        let started = Instant::now();
        let mut listings = Vec::new();

        for page in 1..=self.max_pages.max(1) {
            if page > 1 {
                if deadline.is_some_and(|d| Instant::now() + self.delay >= d) {
                    debug!("No time left for page {}, keeping {} listings", page, listings.len());
                    break;
                }
                if !self.delay.is_zero() {
                    tokio::time::sleep(self.delay).await;
                }
            }

            let fetched = match deadline {
                Some(deadline) => tokio::time::timeout_at(deadline, fetch_page(page))
                    .await
                    .unwrap_or_else(|_| {
                        Err(SourceError::Timeout {
                            secs: deadline.saturating_duration_since(started).as_secs(),
                        })
                    }),
                None => fetch_page(page).await,
            };

            match fetched {
                Ok(batch) if batch.is_empty() => {
                    debug!("Page {} is empty, stopping", page);
                    break;
                }
                Ok(batch) => listings.extend(batch),
                Err(e) if page == 1 => return Err(e),
                Err(e) => {
                    warn!("Page {} failed, keeping {} listings: {}", page, listings.len(), e);
                    break;
                }
            }
        }

        Ok(listings)
    }
}
