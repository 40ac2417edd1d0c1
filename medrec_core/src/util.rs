//! Text helpers shared by the dataset and advisor crates.

use std::sync::OnceLock;

/// Disclaimer attached to every medication suggestion.
pub const STANDARD_DISCLAIMER: &str = "These suggestions are not a substitute for professional medical advice. Always consult with your healthcare provider before taking any medication.";

/// Fenced code block, optionally tagged `json`.
static FENCE_PATTERN: OnceLock<regex::Regex> = OnceLock::new();

#[expect(
    clippy::expect_used,
    reason = "Static regex pattern validated at compile time"
)]
fn fence_pattern() -> &'static regex::Regex {
    FENCE_PATTERN.get_or_init(|| {
        regex::Regex::new(r"(?s)```(?:json|JSON)?\s*(.*?)\s*```")
            .expect("Static regex pattern is guaranteed to be valid")
    })
}

/// Split the free-text symptom field on commas, trimming and dropping
/// empty entries.
#[must_use]
pub fn split_symptom_text(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse a JSON object out of a model reply.
///
/// Accepts a bare object, an object inside a markdown fence, or an object
/// surrounded by prose.
pub fn extract_json(content: &str) -> anyhow::Result<serde_json::Value> {
    let trimmed = content.trim();
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(trimmed) {
        return Ok(value);
    }

    let fenced = fence_pattern()
        .captures(trimmed)
        .and_then(|cap| cap.get(1))
        .and_then(|m| serde_json::from_str::<serde_json::Value>(m.as_str()).ok());
    if let Some(value) = fenced {
        return Ok(value);
    }

    let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) else {
        anyhow::bail!("Model reply contains no JSON object");
    };
    if end < start {
        anyhow::bail!("Model reply contains no JSON object");
    }

    Ok(serde_json::from_str(&trimmed[start..=end])?)
}

/// System instruction asking for a reply matching `schema`.
#[must_use]
pub fn schema_instruction(schema: &serde_json::Value) -> String {
    format!(
        "Respond only with a single JSON object that matches this JSON schema, without markdown fences or extra text:\n{schema}"
    )
}
