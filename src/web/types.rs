// src/web/types.rs
use rocket::http::Status;
use rocket::serde::json::{Json, Value};
use rocket::serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Error half of every API route: a status plus `{"error": "..."}`
pub type ApiError = (Status, Json<ErrorResponse>);

pub fn api_error(status: Status, message: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

#[derive(Debug, Default)]
pub struct ExpandRequest {
    pub description: Option<String>,
}

impl ExpandRequest {
    /// Read an expand body; anything but a string `description` counts as missing
    pub fn from_body(body: &Value) -> Self {
        Self {
            description: body
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct ExpandResponse {
    pub full_description: String,
}
