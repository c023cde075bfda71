// src/web/mod.rs

pub mod handlers;
pub mod types;

pub use handlers::*;
pub use types::*;

use crate::aggregator::Aggregator;
use crate::config::ServerSettings;
use crate::expander::DescriptionExpander;
use crate::types::JobListing;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::{Json, Value};
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[get("/search?<q>")]
pub async fn search_jobs(
    q: Option<String>,
    aggregator: &State<Aggregator>,
) -> Result<Json<Vec<JobListing>>, ApiError> {
    handlers::search_jobs_handler(q, aggregator).await
}

#[post("/job/expand", data = "<request>")]
pub async fn expand_job(
    request: Json<Value>,
    expander: &State<DescriptionExpander>,
) -> Result<Json<ExpandResponse>, ApiError> {
    handlers::expand_job_handler(request, expander).await
}

#[get("/sources")]
pub async fn list_sources(aggregator: &State<Aggregator>) -> Json<Vec<String>> {
    handlers::list_sources_handler(aggregator).await
}

#[get("/health")]
pub async fn health() -> Json<&'static str> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Invalid request format"))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Not found"))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Request body does not match the expected shape"))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<ErrorResponse> {
    Json(ErrorResponse::new("Internal server error"))
}

/// Assemble the API with its state, without binding a socket
pub fn build_rocket(aggregator: Aggregator, expander: DescriptionExpander) -> Rocket<Build> {
    rocket::build()
        .attach(Cors)
        .manage(aggregator)
        .manage(expander)
        .register(
            "/",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![search_jobs, expand_job, list_sources, health, options],
        )
}

pub async fn start_web_server(
    settings: &ServerSettings,
    aggregator: Aggregator,
    expander: DescriptionExpander,
) -> Result<()> {
    let sources = aggregator.source_names().join(", ");
    info!("Starting job search API server");
    info!("Sources: [{}]", sources);
    info!("Server: http://{}:{}", settings.address, settings.port);

    let figment = rocket::Config::figment()
        .merge(("address", settings.address.as_str()))
        .merge(("port", settings.port));

    build_rocket(aggregator, expander)
        .configure(figment)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
