use serde::{Deserialize, Serialize};

use crate::Prediction;

/// Where the disease list came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredictionSource {
    Database,
    Ai,
}

impl From<&Prediction> for PredictionSource {
    fn from(prediction: &Prediction) -> Self {
        match prediction {
            Prediction::DatabaseMatch { .. } => Self::Database,
            Prediction::AiFallback { .. } => Self::Ai,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationSuggestion {
    pub suggestions: String,
    pub disclaimer: String,
}

/// Full answer for one submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub diseases: Vec<String>,
    pub medications: MedicationSuggestion,
    pub diet_chart: String,
    pub source: PredictionSource,
}
