//! End-to-end tests of prediction and analysis against a scripted model.
//!
//! The fake provider answers by looking at the system prompt, so the
//! concurrent medication and diet calls can arrive in any order.

use async_trait::async_trait;
use medrec_advisor::prompts::{DIET_SYSTEM_PROMPT, FALLBACK_SYSTEM_PROMPT, MEDICATION_SYSTEM_PROMPT};
use medrec_advisor::{
    AdvisorError, AdvisorSettings, AnalysisRequest, AnalysisResponse, DiseasePredictor,
    FallbackPredictor, GENERIC_FAILURE_MESSAGE, HealthAnalyzer,
};
use medrec_core::{
    ActivityLevel, ChatMessage, ConditionRecord, Gender, HealthProfile, LLMProvider, LLMResponse,
    Prediction, PredictionSource, STANDARD_DISCLAIMER,
};
use medrec_dataset::{ConditionStore, Dataset, SymptomMatcher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct ScriptedProvider {
    fallback_reply: Option<String>,
    medication_reply: Option<String>,
    diet_reply: Option<String>,
    fallback_calls: AtomicUsize,
    total_calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    fn working() -> Self {
        Self {
            fallback_reply: Some(r#"{"possibleDiseases": ["Migraine", "migraine", "Tension headache"]}"#.to_string()),
            medication_reply: Some(
                "```json\n{\"medicationSuggestions\": \"- **Analgesics**\", \"disclaimer\": \"\"}\n```"
                    .to_string(),
            ),
            diet_reply: Some(r###"{"dietChart": "## Diet Plan\n- **Breakfast**: oats"}"###.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn chat(&self, messages: &[ChatMessage], _model: &str) -> anyhow::Result<LLMResponse> {
        self.total_calls.fetch_add(1, Ordering::SeqCst);
        let system = messages.first().map(|m| m.content.clone()).unwrap_or_default();
        let user = messages.get(1).map(|m| m.content.clone()).unwrap_or_default();
        self.prompts.lock().unwrap().push(user);

        let reply = if system == FALLBACK_SYSTEM_PROMPT {
            self.fallback_calls.fetch_add(1, Ordering::SeqCst);
            self.fallback_reply.clone()
        } else if system == MEDICATION_SYSTEM_PROMPT {
            self.medication_reply.clone()
        } else if system == DIET_SYSTEM_PROMPT {
            self.diet_reply.clone()
        } else {
            None
        };

        reply
            .map(|content| LLMResponse {
                content,
                usage: None,
            })
            .ok_or_else(|| anyhow::anyhow!("provider unavailable"))
    }

    fn get_default_model(&self) -> &'static str {
        "scripted"
    }
}

fn flu_store() -> Arc<ConditionStore> {
    let flu = ConditionRecord {
        disease: "Flu".to_string(),
        description: "Viral infection".to_string(),
        medication: "['Oseltamivir', 'Rest']".to_string(),
        diets: "['Soup']".to_string(),
        workout: "Light stretching".to_string(),
        precautions: "['Hydrate']".to_string(),
        symptoms: "fever,cough,fatigue".to_string(),
    };
    Arc::new(ConditionStore::from_dataset(Dataset::new(vec![flu])))
}

fn profile() -> HealthProfile {
    HealthProfile {
        age: 29,
        gender: Gender::Female,
        weight_kg: 58.0,
        height_cm: 165.0,
        activity_level: ActivityLevel::ModeratelyActive,
        dietary_restrictions: None,
    }
}

fn request(symptoms: &str) -> AnalysisRequest {
    AnalysisRequest {
        symptoms: symptoms.to_string(),
        profile: profile(),
    }
}

fn analyzer(provider: &Arc<ScriptedProvider>, store: Arc<ConditionStore>) -> HealthAnalyzer<ScriptedProvider> {
    HealthAnalyzer::new(Arc::clone(provider), store, AdvisorSettings::new("test-model".to_string()))
}

#[tokio::test]
async fn test_dataset_hit_skips_fallback() {
    let provider = Arc::new(ScriptedProvider::working());
    let predictor = DiseasePredictor::new(
        flu_store(),
        SymptomMatcher::default(),
        FallbackPredictor::new(Arc::clone(&provider), "test-model".to_string()),
    );

    let prediction = predictor.predict(&["fever".to_string()]).await.unwrap();
    let Prediction::DatabaseMatch { matches } = prediction else {
        panic!("expected a dataset match");
    };
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].disease(), "Flu");
    assert_eq!(matches[0].score, 1);
    assert_eq!(provider.fallback_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_no_match_invokes_fallback() {
    let provider = Arc::new(ScriptedProvider::working());
    let predictor = DiseasePredictor::new(
        flu_store(),
        SymptomMatcher::default(),
        FallbackPredictor::new(Arc::clone(&provider), "test-model".to_string())
            .with_max_diseases(5),
    );

    let prediction = predictor.predict(&["xyz123".to_string()]).await.unwrap();
    assert!(prediction.is_fallback());
    assert_eq!(prediction.diseases(), vec!["Migraine", "Tension headache"]);
    assert_eq!(provider.fallback_calls.load(Ordering::SeqCst), 1);

    // The dataset vocabulary is offered to the model.
    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts[0].contains("cough, fatigue, fever"));
}

#[tokio::test]
async fn test_empty_dataset_always_falls_back() {
    let provider = Arc::new(ScriptedProvider::working());
    let store = Arc::new(ConditionStore::new("/nonexistent/medrec/dataset.csv"));
    let predictor = DiseasePredictor::new(
        store,
        SymptomMatcher::default(),
        FallbackPredictor::new(Arc::clone(&provider), "test-model".to_string()),
    );

    let prediction = predictor.predict(&["fever".to_string()]).await.unwrap();
    assert!(prediction.is_fallback());
    let prompts = provider.prompts.lock().unwrap();
    assert!(!prompts[0].contains("Valid Symptoms"));
}

#[tokio::test]
async fn test_full_analysis_from_dataset() {
    let provider = Arc::new(ScriptedProvider::working());
    let result = analyzer(&provider, flu_store())
        .analyze(&request("Fever, cough"))
        .await
        .unwrap();

    assert_eq!(result.diseases, vec!["Flu"]);
    assert_eq!(result.source, PredictionSource::Database);
    assert_eq!(result.medications.suggestions, "- **Analgesics**");
    assert_eq!(result.medications.disclaimer, STANDARD_DISCLAIMER);
    assert!(result.diet_chart.starts_with("## Diet Plan"));
    assert_eq!(provider.total_calls.load(Ordering::SeqCst), 2);

    // Medication prompt is grounded on the dataset row.
    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts.iter().any(|p| p.contains("Oseltamivir")));
    assert!(prompts.iter().any(|p| p.contains("Light stretching")));
}

#[tokio::test]
async fn test_empty_fallback_uses_general_wellness() {
    let provider = Arc::new(ScriptedProvider {
        fallback_reply: Some(r#"{"possibleDiseases": []}"#.to_string()),
        ..ScriptedProvider::working()
    });
    let result = analyzer(&provider, flu_store())
        .analyze(&request("xyz123"))
        .await
        .unwrap();

    assert!(result.diseases.is_empty());
    assert_eq!(result.source, PredictionSource::Ai);
    let prompts = provider.prompts.lock().unwrap();
    assert!(prompts.iter().any(|p| p.contains("Predicted Disease: general wellness")));
}

#[tokio::test]
async fn test_blank_symptoms_rejected_without_calls() {
    let provider = Arc::new(ScriptedProvider::working());
    let err = analyzer(&provider, flu_store())
        .analyze(&request(" , ,"))
        .await
        .unwrap_err();

    assert!(matches!(err, AdvisorError::NoSymptoms));
    assert_eq!(provider.total_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_fallback_failure_surfaces_generic_message() {
    let provider = Arc::new(ScriptedProvider {
        fallback_reply: None,
        ..ScriptedProvider::working()
    });
    let result = analyzer(&provider, flu_store()).analyze(&request("xyz123")).await;
    assert!(matches!(result, Err(AdvisorError::Fallback(_))));

    // Exactly one attempt, no retry.
    assert_eq!(provider.fallback_calls.load(Ordering::SeqCst), 1);

    let response = AnalysisResponse::from_result(result);
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some(GENERIC_FAILURE_MESSAGE));
}

#[tokio::test]
async fn test_invalid_diet_reply_fails_analysis() {
    let provider = Arc::new(ScriptedProvider {
        diet_reply: Some("Here is your plan without JSON".to_string()),
        ..ScriptedProvider::working()
    });
    let result = analyzer(&provider, flu_store()).analyze(&request("fever")).await;
    assert!(matches!(result, Err(AdvisorError::DietChart(_))));
}
