// src/aggregator/dedup.rs
use crate::types::JobListing;
use std::collections::HashSet;

/// Identity of a listing for deduplication: lowercased title, company and location.
///
/// Source ids are ignored; two providers rarely agree on them.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    title: String,
    company: String,
    location: String,
}

impl From<&JobListing> for Signature {
    fn from(job: &JobListing) -> Self {
        Self {
            title: job.title.to_lowercase(),
            company: job.company.to_lowercase(),
            location: job.location.to_lowercase(),
        }
    }
}

/// Keep the first listing for each signature, preserving input order
pub fn dedup_listings(listings: Vec<JobListing>) -> Vec<JobListing> {
    let mut seen = HashSet::with_capacity(listings.len());
    listings
        .into_iter()
        .filter(|job| seen.insert(Signature::from(job)))
        .collect()
}
