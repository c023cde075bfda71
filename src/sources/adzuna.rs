// src/sources/adzuna.rs
//! Adzuna job search API: keyword, location and salary filters, paginated

use super::{api_error, JobSource, PagePolicy, SourceError};
use crate::config::AdzunaConfig;
use crate::types::{JobListing, StructuredQuery};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tokio::time::Instant;
use tracing::info;

/// Experience levels Adzuna can narrow on as an extra required keyword
const KEYWORD_EXPERIENCE_LEVELS: [&str; 2] = ["entry-level", "junior"];

pub struct AdzunaSource {
    client: Client,
    base_url: String,
    country: String,
    app_id: String,
    app_key: String,
    results_per_page: u32,
    pages: PagePolicy,
}

#[derive(Debug, Deserialize)]
struct AdzunaResponse {
    #[serde(default)]
    results: Vec<AdzunaJob>,
}

#[derive(Debug, Deserialize)]
struct AdzunaJob {
    id: Option<Value>,
    title: Option<String>,
    company: Option<DisplayName>,
    location: Option<DisplayName>,
    description: Option<String>,
    redirect_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DisplayName {
    display_name: Option<String>,
}

impl From<AdzunaJob> for JobListing {
    fn from(job: AdzunaJob) -> Self {
        // Adzuna ids arrive as strings, older responses used numbers
        let id = match job.id {
            Some(Value::String(s)) => s,
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };

        JobListing::from_parts(
            id,
            job.title,
            job.company.and_then(|c| c.display_name),
            job.location.and_then(|l| l.display_name),
            job.description,
            job.redirect_url,
        )
    }
}

impl AdzunaSource {
    pub fn new(
        config: &AdzunaConfig,
        app_id: &str,
        app_key: &str,
        pages: PagePolicy,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country: config.country.clone(),
            app_id: app_id.to_string(),
            app_key: app_key.to_string(),
            results_per_page: config.results_per_page,
            pages,
        })
    }

    fn page_url(&self, page: u32) -> String {
        format!(
            "{}/v1/api/jobs/{}/search/{}",
            self.base_url, self.country, page
        )
    }

    fn query_params(&self, query: &StructuredQuery, what: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("app_id", self.app_id.clone()),
            ("app_key", self.app_key.clone()),
            ("what", what.to_string()),
            ("results_per_page", self.results_per_page.to_string()),
            ("content-type", "application/json".to_string()),
        ];

        if let Some(location) = &query.location {
            params.push(("where", location.clone()));
        }
        if let Some(salary) = query.salary_min.filter(|s| *s > 0) {
            params.push(("salary_min", salary.to_string()));
        }
        if let Some(level) = query
            .experience_level
            .as_deref()
            .filter(|l| KEYWORD_EXPERIENCE_LEVELS.contains(l))
        {
            params.push(("what_and", level.to_string()));
        }

        params
    }

    /// Fetch a single results page
    pub async fn fetch_page(
        &self,
        query: &StructuredQuery,
        page: u32,
    ) -> Result<Vec<JobListing>, SourceError> {
        let Some(what) = query.search_term() else {
            return Ok(Vec::new());
        };

        info!(
            "Requesting Adzuna page {} for '{}' in '{}'",
            page,
            what,
            query.location.as_deref().unwrap_or("anywhere")
        );

        let response = self
            .client
            .get(self.page_url(page))
            .query(&self.query_params(query, what))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: AdzunaResponse = serde_json::from_str(&response.text().await?)?;
        Ok(body.results.into_iter().map(JobListing::from).collect())
    }
}

#[async_trait]
impl JobSource for AdzunaSource {
    async fn fetch(&self, query: &StructuredQuery) -> Result<Vec<JobListing>, SourceError> {
        if query.search_term().is_none() {
            return Ok(Vec::new());
        }
        self.pages
            .collect(move |page| self.fetch_page(query, page))
            .await
    }

    async fn fetch_until(
        &self,
        query: &StructuredQuery,
        deadline: Instant,
    ) -> Result<Vec<JobListing>, SourceError> {
        if query.search_term().is_none() {
            return Ok(Vec::new());
        }
        self.pages
            .collect_until(Some(deadline), move |page| self.fetch_page(query, page))
            .await
    }

    fn name(&self) -> &str {
        "adzuna"
    }
}
