//! Knowledge-base rows and the results derived from them.

use serde::{Deserialize, Serialize};

/// One row of the condition knowledge base.
///
/// Field names follow the dataset header
/// (`Disease,Description,Medication,Diets,Workout,Precautions,Symptoms`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConditionRecord {
    pub disease: String,
    pub description: String,
    pub medication: String,
    pub diets: String,
    pub workout: String,
    pub precautions: String,
    pub symptoms: String,
}

impl ConditionRecord {
    /// Column names in file order.
    pub const COLUMNS: [&'static str; 7] = [
        "Disease",
        "Description",
        "Medication",
        "Diets",
        "Workout",
        "Precautions",
        "Symptoms",
    ];

    /// Normalized symptom tokens, empties dropped.
    #[must_use]
    pub fn symptom_tokens(&self) -> Vec<String> {
        self.symptoms
            .split(',')
            .map(normalize_symptom)
            .filter(|s| !s.is_empty())
            .collect()
    }

    #[must_use]
    pub fn medication_list(&self) -> Vec<String> {
        split_list(&self.medication)
    }

    #[must_use]
    pub fn diet_list(&self) -> Vec<String> {
        split_list(&self.diets)
    }

    #[must_use]
    pub fn precaution_list(&self) -> Vec<String> {
        split_list(&self.precautions)
    }

    /// Case-insensitive key used to treat rows of the same disease as one.
    #[must_use]
    pub fn disease_key(&self) -> String {
        self.disease.trim().to_lowercase()
    }
}

/// Lower-case, trim and fold inner whitespace runs into `_`, so that
/// `"Skin Rash"` and `"skin_rash"` compare equal.
#[must_use]
pub fn normalize_symptom(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .to_lowercase()
}

/// Split a list-valued field. Accepts `a, b` as well as `['a', 'b']`.
fn split_list(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    let inner = trimmed
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .unwrap_or(trimmed);

    inner
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Knowledge-base entry as handed to prompt builders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionInfo {
    pub disease: String,
    pub description: String,
    pub medication: String,
    pub diets: String,
    pub workout: String,
    pub precaution: String,
}

impl From<&ConditionRecord> for ConditionInfo {
    fn from(record: &ConditionRecord) -> Self {
        Self {
            disease: record.disease.clone(),
            description: record.description.clone(),
            medication: record.medication.clone(),
            diets: record.diets.clone(),
            workout: record.workout.clone(),
            precaution: record.precautions.clone(),
        }
    }
}

/// A ranked matcher hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub record: ConditionRecord,
    /// Distinct normalized query symptoms that matched this disease.
    pub matched_symptoms: Vec<String>,
    /// `matched_symptoms.len()`
    pub score: usize,
    /// Percentage of the query covered, capped at 100.
    pub confidence: f64,
}

impl MatchResult {
    #[must_use]
    pub fn disease(&self) -> &str {
        &self.record.disease
    }
}

/// Outcome of disease prediction: either a knowledge-base hit or the
/// names returned by the generative fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum Prediction {
    DatabaseMatch { matches: Vec<MatchResult> },
    AiFallback { diseases: Vec<String> },
}

impl Prediction {
    #[must_use]
    pub fn diseases(&self) -> Vec<String> {
        match self {
            Self::DatabaseMatch { matches } => {
                matches.iter().map(|m| m.record.disease.clone()).collect()
            }
            Self::AiFallback { diseases } => diseases.clone(),
        }
    }

    #[must_use]
    pub fn primary(&self) -> Option<&str> {
        match self {
            Self::DatabaseMatch { matches } => matches.first().map(MatchResult::disease),
            Self::AiFallback { diseases } => diseases.first().map(String::as_str),
        }
    }

    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self, Self::AiFallback { .. })
    }
}
