#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod condition;
pub mod profile;
pub mod util;

pub use analysis::{AnalysisResult, MedicationSuggestion, PredictionSource};
pub use condition::{ConditionInfo, ConditionRecord, MatchResult, Prediction, normalize_symptom};
pub use profile::{ActivityLevel, Gender, HealthProfile};
pub use util::{STANDARD_DISCLAIMER, extract_json, split_symptom_text};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LLMResponse {
    pub content: String,
    pub usage: Option<Usage>,
}

#[derive(Debug, Clone)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn chat(&self, messages: &[ChatMessage], model: &str) -> anyhow::Result<LLMResponse>;

    /// Request a reply shaped by `schema`.
    ///
    /// The default appends the schema as a system instruction; providers
    /// with a native JSON mode should override it.
    async fn chat_structured(
        &self,
        messages: &[ChatMessage],
        model: &str,
        schema: &serde_json::Value,
    ) -> anyhow::Result<LLMResponse> {
        let mut messages = messages.to_vec();
        messages.push(ChatMessage::system(util::schema_instruction(schema)));
        self.chat(&messages, model).await
    }

    fn get_default_model(&self) -> &str;
}
