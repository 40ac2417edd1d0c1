use thiserror::Error;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error("Please provide at least one symptom.")]
    NoSymptoms,

    #[error("Fallback prediction failed: {0}")]
    Fallback(anyhow::Error),

    #[error("Medication suggestion failed: {0}")]
    Medication(anyhow::Error),

    #[error("Diet chart generation failed: {0}")]
    DietChart(anyhow::Error),
}
