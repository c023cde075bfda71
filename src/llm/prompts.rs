// src/llm/prompts.rs

/// Prompt asking the model to pull search fields out of a query
pub fn structure_query_prompt(query: &str) -> String {
    format!(
        r#"Read the job search query below and extract up to four fields:
1. role: the job title or kind of work being searched for.
2. location: the city, region or country, or "remote".
3. salary_min: the minimum salary as a plain integer, without currency symbols or separators.
4. experience_level: for example "entry-level", "junior", "senior" or "manager".

Reply with a single JSON object that has exactly the keys "role", "location", "salary_min" and "experience_level".
Use null for any field the query does not mention. Do not add any other text.

Query: "{query}"

JSON:"#
    )
}

/// Prompt asking the model to elaborate a short job description
pub fn expand_description_prompt(snippet: &str) -> String {
    format!(
        r#"Expand the job description snippet below into a detailed, well-formatted description of 3 to 4 paragraphs.
Describe the likely duties, qualifications and team culture the snippet implies, in a professional tone.
Do not contradict or stray from the responsibilities the snippet implies.
Do not invent a job title or a company name; reply with the description text only.

Snippet: "{snippet}"

Expanded description:"#
    )
}
