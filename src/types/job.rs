// src/types/job.rs
use serde::{Deserialize, Serialize};

/// Placeholder for fields a source does not provide
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder description for listings that come without one
pub const DESCRIPTION_FALLBACK: &str = "See original posting for details.";

/// Normalized job listing returned to callers.
///
/// Every string field always carries a value so the JSON shape is stable no
/// matter which source produced the record. `id` is only unique within the
/// source that issued it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobListing {
    #[serde(default)]
    pub id: String,
    #[serde(default = "not_available")]
    pub title: String,
    #[serde(default = "not_available")]
    pub company: String,
    #[serde(default = "not_available")]
    pub location: String,
    #[serde(default = "description_fallback")]
    pub description: String,
    #[serde(default)]
    pub link: Option<String>,
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

fn description_fallback() -> String {
    DESCRIPTION_FALLBACK.to_string()
}

/// Keeps a value only when it has visible content
fn present(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

impl JobListing {
    /// Build a listing from raw source fields, backfilling anything missing
    pub fn from_parts(
        id: impl Into<String>,
        title: Option<String>,
        company: Option<String>,
        location: Option<String>,
        description: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: present(title).unwrap_or_else(not_available),
            company: present(company).unwrap_or_else(not_available),
            location: present(location).unwrap_or_else(not_available),
            description: present(description).unwrap_or_else(description_fallback),
            link: present(link),
        }
    }

    /// True when the lowercased title or description contains `term`
    pub fn mentions(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.title.to_lowercase().contains(&term)
            || self.description.to_lowercase().contains(&term)
    }
}
