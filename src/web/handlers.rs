// src/web/handlers.rs
use crate::aggregator::{Aggregator, SearchError};
use crate::expander::{DescriptionExpander, ExpandError};
use crate::types::JobListing;
use crate::web::types::*;

use rocket::http::Status;
use rocket::serde::json::{Json, Value};
use rocket::State;
use tracing::{error, info};

pub async fn search_jobs_handler(
    q: Option<String>,
    aggregator: &State<Aggregator>,
) -> Result<Json<Vec<JobListing>>, ApiError> {
    let query = q.unwrap_or_default();

    match aggregator.search(&query).await {
        Ok(listings) => Ok(Json(listings)),
        Err(e @ SearchError::MissingQuery) => Err(api_error(Status::BadRequest, e.to_string())),
        Err(e @ SearchError::NoSourcesConfigured) => {
            error!("Search rejected: {}", e);
            Err(api_error(Status::InternalServerError, e.to_string()))
        }
    }
}

pub async fn expand_job_handler(
    request: Json<Value>,
    expander: &State<DescriptionExpander>,
) -> Result<Json<ExpandResponse>, ApiError> {
    let snippet = ExpandRequest::from_body(&request).description.unwrap_or_default();

    match expander.expand(&snippet).await {
        Ok(full_description) => Ok(Json(ExpandResponse { full_description })),
        Err(e @ ExpandError::MissingDescription) => {
            Err(api_error(Status::BadRequest, e.to_string()))
        }
        Err(e @ ExpandError::ModelNotConfigured) => {
            error!("Expansion rejected: {}", e);
            Err(api_error(Status::InternalServerError, e.to_string()))
        }
    }
}

pub async fn list_sources_handler(aggregator: &State<Aggregator>) -> Json<Vec<String>> {
    Json(
        aggregator
            .source_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

pub async fn health_handler() -> Json<&'static str> {
    info!("Health check");
    Json("OK")
}
