use medrec_advisor::{DiseasePredictor, FallbackPredictor};
use medrec_config::Config;
use medrec_core::{Prediction, split_symptom_text};
use medrec_dataset::{ConditionStore, SymptomMatcher};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct PredictInput {
    /// Comma-separated symptoms
    pub symptoms: String,
    pub dataset: Option<PathBuf>,
    pub model: Option<String>,
    pub json: bool,
}

/// Dataset prediction with the model fallback.
#[derive(Debug, Clone, Copy)]
pub struct PredictStrategy;

impl super::CommandStrategy for PredictStrategy {
    type Input = PredictInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let symptoms = split_symptom_text(&input.symptoms);
        if symptoms.is_empty() {
            anyhow::bail!("Please provide at least one symptom.");
        }

        let config = Config::load()?;
        let model = input
            .model
            .unwrap_or_else(|| config.agents.defaults.model.clone());
        let provider = Arc::new(super::build_provider(&config));
        let store = Arc::new(ConditionStore::new(
            input.dataset.unwrap_or_else(|| config.dataset.path.clone()),
        ));

        let predictor = DiseasePredictor::new(
            store,
            SymptomMatcher::new(config.dataset.top_k),
            FallbackPredictor::new(provider, model)
                .with_max_diseases(config.fallback.max_diseases),
        );
        let prediction = predictor.predict(&symptoms).await?;

        if input.json {
            println!("{}", serde_json::to_string_pretty(&prediction)?);
            return Ok(());
        }

        match &prediction {
            Prediction::DatabaseMatch { matches } => {
                println!("Source: dataset");
                for m in matches {
                    println!("- {} ({:.0}%)", m.disease(), m.confidence);
                }
            }
            Prediction::AiFallback { diseases } => {
                println!("Source: AI (no dataset match)");
                for disease in diseases {
                    println!("- {disease}");
                }
            }
        }
        Ok(())
    }
}
