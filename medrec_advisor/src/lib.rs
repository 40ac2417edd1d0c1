#![warn(
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

//! Model-backed advice on top of the condition dataset.
//!
//! The [`DiseasePredictor`] answers from the dataset when the matcher has
//! hits and asks the model otherwise. [`HealthAnalyzer`] then runs the
//! medication and diet flows for the primary disease concurrently.

mod analysis;
mod diet;
mod error;
mod fallback;
mod medication;
mod predictor;
pub mod prompts;

pub use analysis::{
    AdvisorSettings, AnalysisRequest, AnalysisResponse, GENERIC_FAILURE_MESSAGE, HealthAnalyzer,
};
pub use diet::DietChartGenerator;
pub use error::{AdvisorError, Result};
pub use fallback::{DEFAULT_MAX_DISEASES, FallbackPredictor};
pub use medication::MedicationAdvisor;
pub use predictor::DiseasePredictor;

use medrec_core::{LLMResponse, extract_json};
use serde::de::DeserializeOwned;

/// Decode a structured model reply into `T`.
fn decode_reply<T: DeserializeOwned>(response: &LLMResponse) -> anyhow::Result<T> {
    let value = extract_json(&response.content)?;
    Ok(serde_json::from_value(value)?)
}
