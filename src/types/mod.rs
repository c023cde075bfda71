// src/types/mod.rs
pub mod job;
pub mod query;

pub use job::{JobListing, DESCRIPTION_FALLBACK, NOT_AVAILABLE};
pub use query::StructuredQuery;
