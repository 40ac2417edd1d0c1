use medrec_core::{
    ConditionInfo, HealthProfile, LLMProvider, MedicationSuggestion, STANDARD_DISCLAIMER,
};
use medrec_dataset::ConditionStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AdvisorError, Result};
use crate::{decode_reply, prompts};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MedicationReply {
    medication_suggestions: String,
    #[serde(default)]
    disclaimer: String,
}

pub struct MedicationAdvisor<P: LLMProvider + ?Sized> {
    provider: Arc<P>,
    store: Arc<ConditionStore>,
    model: String,
}

impl<P: LLMProvider + ?Sized> MedicationAdvisor<P> {
    pub const fn new(provider: Arc<P>, store: Arc<ConditionStore>, model: String) -> Self {
        Self {
            provider,
            store,
            model,
        }
    }

    pub async fn suggest(
        &self,
        disease: &str,
        symptoms: &[String],
        profile: &HealthProfile,
    ) -> Result<MedicationSuggestion> {
        let dataset = self.store.dataset();
        let guideline = dataset.find_by_disease(disease).map(ConditionInfo::from);
        debug!(
            "Medication guideline for {disease}: {}",
            if guideline.is_some() { "dataset" } else { "none" }
        );

        let messages =
            prompts::medication_messages(disease, symptoms, profile, guideline.as_ref());
        let response = self
            .provider
            .chat_structured(&messages, &self.model, &prompts::medication_schema())
            .await
            .map_err(AdvisorError::Medication)?;

        let reply: MedicationReply = decode_reply(&response).map_err(AdvisorError::Medication)?;
        info!("Generated medication suggestions for {disease}");

        let disclaimer = if reply.disclaimer.trim().is_empty() {
            STANDARD_DISCLAIMER.to_string()
        } else {
            reply.disclaimer
        };
        Ok(MedicationSuggestion {
            suggestions: reply.medication_suggestions,
            disclaimer,
        })
    }
}
