// src/sources/jobspikr.rs
//! JobsPikr data API: boolean must-clause search over job fields

use super::{api_error, JobSource, SourceError};
use crate::config::JobsPikrConfig;
use crate::types::{JobListing, StructuredQuery};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tracing::info;

pub struct JobsPikrSource {
    client: Client,
    endpoint: String,
    client_id: String,
    client_auth_key: String,
    size: u32,
}

#[derive(Debug, Deserialize)]
struct JobsPikrResponse {
    #[serde(default)]
    job_data: Vec<JobsPikrJob>,
}

#[derive(Debug, Deserialize)]
struct JobsPikrJob {
    uniq_id: Option<String>,
    job_title: Option<String>,
    company_name: Option<String>,
    city: Option<String>,
    state: Option<String>,
    job_description: Option<String>,
    url: Option<String>,
}

impl From<JobsPikrJob> for JobListing {
    fn from(job: JobsPikrJob) -> Self {
        let location = [job.city, job.state]
            .into_iter()
            .flatten()
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");

        JobListing::from_parts(
            job.uniq_id.unwrap_or_default(),
            job.job_title,
            job.company_name,
            Some(location),
            job.job_description,
            job.url,
        )
    }
}

fn query_string(field: &str, value: &str) -> Value {
    json!({
        "query_string": {
            "default_field": field,
            "query": value,
        }
    })
}

impl JobsPikrSource {
    pub fn new(
        config: &JobsPikrConfig,
        client_id: &str,
        client_auth_key: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            client_id: client_id.to_string(),
            client_auth_key: client_auth_key.to_string(),
            size: config.size,
        })
    }

    fn search_body(&self, query: &StructuredQuery, role: &str) -> Value {
        let mut must = vec![query_string("job_title", role)];
        if let Some(location) = &query.location {
            must.push(query_string("city", location));
        }

        json!({
            "search_query_json": {
                "bool": { "must": must }
            },
            "size": self.size,
            "format": "json",
        })
    }
}

#[async_trait]
impl JobSource for JobsPikrSource {
    async fn fetch(&self, query: &StructuredQuery) -> Result<Vec<JobListing>, SourceError> {
        let Some(role) = query.search_term() else {
            return Ok(Vec::new());
        };

        info!("Requesting JobsPikr listings for '{}'", role);

        let response = self
            .client
            .post(&self.endpoint)
            .header("client_id", &self.client_id)
            .header("client_auth_key", &self.client_auth_key)
            .json(&self.search_body(query, role))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let body: JobsPikrResponse = serde_json::from_str(&response.text().await?)?;
        Ok(body.job_data.into_iter().map(JobListing::from).collect())
    }

    fn name(&self) -> &str {
        "jobspikr"
    }
}
