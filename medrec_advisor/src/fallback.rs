use medrec_core::LLMProvider;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::{AdvisorError, Result};
use crate::{decode_reply, prompts};

pub const DEFAULT_MAX_DISEASES: usize = 5;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FallbackReply {
    possible_diseases: Vec<String>,
}

/// Asks the model for condition names when the dataset has no match.
pub struct FallbackPredictor<P: LLMProvider + ?Sized> {
    provider: Arc<P>,
    model: String,
    max_diseases: usize,
}

impl<P: LLMProvider + ?Sized> FallbackPredictor<P> {
    pub const fn new(provider: Arc<P>, model: String) -> Self {
        Self {
            provider,
            model,
            max_diseases: DEFAULT_MAX_DISEASES,
        }
    }

    #[must_use]
    pub const fn with_max_diseases(mut self, max_diseases: usize) -> Self {
        self.max_diseases = max_diseases;
        self
    }

    /// At most `max_diseases` distinct names, most likely first.
    ///
    /// `valid_symptoms` is the dataset vocabulary, or empty.
    pub async fn predict(&self, symptoms: &[String], valid_symptoms: &str) -> Result<Vec<String>> {
        info!("Invoking fallback predictor for {} symptoms", symptoms.len());

        let messages = prompts::fallback_messages(symptoms, valid_symptoms, self.max_diseases);
        let response = self
            .provider
            .chat_structured(&messages, &self.model, &prompts::fallback_schema())
            .await
            .map_err(AdvisorError::Fallback)?;

        let reply: FallbackReply = decode_reply(&response).map_err(AdvisorError::Fallback)?;
        let diseases = clean_names(reply.possible_diseases, self.max_diseases);
        if diseases.is_empty() {
            warn!("Fallback predictor returned no diseases");
        }
        Ok(diseases)
    }
}

/// Trim, drop empties, dedupe case-insensitively, cap at `limit`.
fn clean_names(names: Vec<String>, limit: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut cleaned = Vec::new();
    for name in names {
        if cleaned.len() >= limit {
            break;
        }
        let name = name.trim();
        if name.is_empty() {
            continue;
        }
        let key = name.to_lowercase();
        if seen.contains(&key) {
            continue;
        }
        seen.push(key);
        cleaned.push(name.to_string());
    }
    cleaned
}
