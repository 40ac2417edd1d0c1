use medrec_core::{
    AnalysisResult, HealthProfile, LLMProvider, PredictionSource, split_symptom_text,
};
use medrec_dataset::{ConditionStore, SymptomMatcher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{Instrument, error, info, info_span};
use uuid::Uuid;

use crate::diet::DietChartGenerator;
use crate::error::{AdvisorError, Result};
use crate::fallback::{DEFAULT_MAX_DISEASES, FallbackPredictor};
use crate::medication::MedicationAdvisor;
use crate::predictor::DiseasePredictor;

/// Shown to the user for any failure other than missing symptoms.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An AI-related error occurred. Please check your inputs and try again.";

/// Used for medication and diet output when no disease was predicted.
const DEFAULT_CONDITION: &str = "general wellness";

#[derive(Debug, Clone)]
pub struct AdvisorSettings {
    pub model: String,
    pub top_k: usize,
    pub max_diseases: usize,
}

impl AdvisorSettings {
    #[must_use]
    pub const fn new(model: String) -> Self {
        Self {
            model,
            top_k: medrec_dataset::DEFAULT_TOP_K,
            max_diseases: DEFAULT_MAX_DISEASES,
        }
    }
}

/// One user submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Comma-separated free text.
    pub symptoms: String,
    #[serde(flatten)]
    pub profile: HealthProfile,
}

/// `{ success, data, error }` envelope returned to callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalysisResponse {
    /// Keeps only the user-facing message of an error.
    #[must_use]
    pub fn from_result(result: Result<AnalysisResult>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(e) => {
                let message = match e {
                    AdvisorError::NoSymptoms => e.to_string(),
                    _ => GENERIC_FAILURE_MESSAGE.to_string(),
                };
                Self {
                    success: false,
                    data: None,
                    error: Some(message),
                }
            }
        }
    }
}

pub struct HealthAnalyzer<P: LLMProvider + ?Sized> {
    predictor: DiseasePredictor<P>,
    medication: MedicationAdvisor<P>,
    diet: DietChartGenerator<P>,
}

impl<P: LLMProvider + ?Sized> HealthAnalyzer<P> {
    pub fn new(provider: Arc<P>, store: Arc<ConditionStore>, settings: AdvisorSettings) -> Self {
        let fallback = FallbackPredictor::new(Arc::clone(&provider), settings.model.clone())
            .with_max_diseases(settings.max_diseases);
        Self {
            predictor: DiseasePredictor::new(
                Arc::clone(&store),
                SymptomMatcher::new(settings.top_k),
                fallback,
            ),
            medication: MedicationAdvisor::new(
                Arc::clone(&provider),
                Arc::clone(&store),
                settings.model.clone(),
            ),
            diet: DietChartGenerator::new(provider, store, settings.model),
        }
    }

    #[must_use]
    pub const fn predictor(&self) -> &DiseasePredictor<P> {
        &self.predictor
    }

    pub async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let span = info_span!("analysis", request_id = %Uuid::now_v7());
        async {
            let result = self.run(request).await;
            if let Err(e) = &result {
                error!("Error in health analysis: {e}");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run(&self, request: &AnalysisRequest) -> Result<AnalysisResult> {
        let symptoms = split_symptom_text(&request.symptoms);
        if symptoms.is_empty() {
            return Err(AdvisorError::NoSymptoms);
        }
        info!("Analyzing {} symptoms", symptoms.len());

        let prediction = self.predictor.predict(&symptoms).await?;
        let disease = prediction.primary().unwrap_or(DEFAULT_CONDITION).to_string();
        info!(
            "Primary condition: {disease} ({:?})",
            PredictionSource::from(&prediction)
        );

        let (medications, diet_chart) = tokio::try_join!(
            self.medication.suggest(&disease, &symptoms, &request.profile),
            self.diet.generate(&disease, &symptoms, &request.profile),
        )?;

        Ok(AnalysisResult {
            diseases: prediction.diseases(),
            medications,
            diet_chart,
            source: PredictionSource::from(&prediction),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_hides_internal_errors() {
        let response = AnalysisResponse::from_result(Err(AdvisorError::Fallback(
            anyhow::anyhow!("connection refused"),
        )));
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
    }

    #[test]
    fn response_keeps_missing_symptom_message() {
        let response = AnalysisResponse::from_result(Err(AdvisorError::NoSymptoms));
        assert_eq!(
            response.error.as_deref(),
            Some("Please provide at least one symptom.")
        );
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("data").is_none());
    }
}
