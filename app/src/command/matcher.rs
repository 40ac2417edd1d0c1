use medrec_config::Config;
use medrec_core::split_symptom_text;
use medrec_dataset::{ConditionStore, DEFAULT_TOP_K, SymptomMatcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct MatchInput {
    /// Comma-separated symptoms
    pub symptoms: String,
    pub dataset: Option<PathBuf>,
    pub top_k: Option<usize>,
    pub json: bool,
}

/// Runs the dataset matcher only, without contacting the model.
#[derive(Debug, Clone, Copy)]
pub struct MatchStrategy;

impl super::CommandStrategy for MatchStrategy {
    type Input = MatchInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let symptoms = split_symptom_text(&input.symptoms);
        if symptoms.is_empty() {
            anyhow::bail!("Please provide at least one symptom.");
        }

        // With `--dataset` the config file is optional.
        let (path, config) = match input.dataset {
            Some(path) => {
                let config = Config::load()
                    .map_err(|e| warn!("No usable config, using defaults: {e}"))
                    .ok();
                (path, config)
            }
            None => {
                let config = Config::load()?;
                (config.dataset.path.clone(), Some(config))
            }
        };
        info!("Using dataset at {}", path.display());

        let store = Arc::new(ConditionStore::new(path));
        let dataset = store.dataset();
        let matcher = SymptomMatcher::new(effective_top_k(input.top_k, config.as_ref()));
        let matches = matcher.rank(&dataset, &symptoms);

        if input.json {
            println!("{}", serde_json::to_string_pretty(&matches)?);
            return Ok(());
        }

        if matches.is_empty() {
            println!("No dataset match. Use 'medrec predict' to ask the model.");
            return Ok(());
        }
        for (rank, m) in matches.iter().enumerate() {
            println!(
                "{}. {} (score {}, {:.0}%): {}",
                rank + 1,
                m.disease(),
                m.score,
                m.confidence,
                m.matched_symptoms.join(", ")
            );
        }
        Ok(())
    }
}

/// `--top-k`, then the configured `dataset.top_k`, then the default.
fn effective_top_k(requested: Option<usize>, config: Option<&Config>) -> usize {
    requested
        .or_else(|| config.map(|c| c.dataset.top_k))
        .unwrap_or(DEFAULT_TOP_K)
}
