// src/types/query.rs
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Search fields extracted from a free-text query
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
    #[serde(default, deserialize_with = "non_blank")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "non_blank")]
    pub location: Option<String>,
    #[serde(default, deserialize_with = "lenient_salary")]
    pub salary_min: Option<i64>,
    #[serde(default, deserialize_with = "non_blank")]
    pub experience_level: Option<String>,
}

impl StructuredQuery {
    /// Degraded query used when the model cannot structure the input
    pub fn fallback(raw_text: &str) -> Self {
        Self {
            role: Some(raw_text.to_string()),
            ..Self::default()
        }
    }

    /// Role as a search term, if any
    pub fn search_term(&self) -> Option<&str> {
        self.role.as_deref().map(str::trim).filter(|r| !r.is_empty())
    }
}

fn non_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// Models return salaries as numbers, floats or strings like "$120,000".
// Anything that does not reduce to an integer is dropped rather than failing
// the whole reply.
fn lenient_salary<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Some(Value::String(s)) => {
            let digits: String = s
                .chars()
                .filter(|c| !matches!(c, '$' | ',' | ' '))
                .collect();
            digits.parse::<i64>().ok()
        }
        _ => None,
    })
}
