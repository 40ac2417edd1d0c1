use medrec_core::{ConditionInfo, HealthProfile, LLMProvider};
use medrec_dataset::ConditionStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

use crate::error::{AdvisorError, Result};
use crate::{decode_reply, prompts};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DietReply {
    diet_chart: String,
}

/// Personalized 7-day diet chart with workout and precautions, in markdown.
pub struct DietChartGenerator<P: LLMProvider + ?Sized> {
    provider: Arc<P>,
    store: Arc<ConditionStore>,
    model: String,
}

impl<P: LLMProvider + ?Sized> DietChartGenerator<P> {
    pub const fn new(provider: Arc<P>, store: Arc<ConditionStore>, model: String) -> Self {
        Self {
            provider,
            store,
            model,
        }
    }

    pub async fn generate(
        &self,
        disease: &str,
        symptoms: &[String],
        profile: &HealthProfile,
    ) -> Result<String> {
        let dataset = self.store.dataset();
        let guideline = dataset.find_by_disease(disease).map(ConditionInfo::from);

        let messages = prompts::diet_messages(disease, symptoms, profile, guideline.as_ref());
        let response = self
            .provider
            .chat_structured(&messages, &self.model, &prompts::diet_schema())
            .await
            .map_err(AdvisorError::DietChart)?;

        let reply: DietReply = decode_reply(&response).map_err(AdvisorError::DietChart)?;
        if reply.diet_chart.trim().is_empty() {
            return Err(AdvisorError::DietChart(anyhow::anyhow!(
                "Model returned an empty diet chart"
            )));
        }

        info!("Generated diet chart for {disease}");
        Ok(reply.diet_chart)
    }
}
