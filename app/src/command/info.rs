use medrec_config::Config;
use medrec_dataset::{ConditionStore, SymptomVocabulary};
use tracing::info;

/// Prints the active configuration and whether the dataset loads.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        println!("=== medrec Configuration ===\n");

        println!("Provider:");
        println!("  Zhipu API Key: {}", mask_key(&config.providers.zhipu.api_key));
        if let Some(ref base_url) = config.providers.zhipu.base_url {
            println!("  Base URL: {base_url}");
        }
        println!();

        println!("Agent Defaults:");
        println!("  Model: {}", config.agents.defaults.model);
        println!("  Max Tokens: {}", config.agents.defaults.max_tokens);
        println!("  Temperature: {}", config.agents.defaults.temperature);
        println!();

        println!("Dataset:");
        println!("  Path: {}", config.dataset.path.display());
        println!("  Top K: {}", config.dataset.top_k);

        info!("Testing dataset load");
        let store = ConditionStore::new(&config.dataset.path);
        match store.try_dataset() {
            Ok(dataset) => {
                let vocabulary = SymptomVocabulary::from_dataset(&dataset);
                println!("  Status: Loaded");
                println!("  Records: {}", dataset.len());
                println!("  Distinct Symptoms: {}", vocabulary.len());
            }
            Err(e) => {
                println!("  Status: Load failed");
                println!("  Error: {e}");
            }
        }
        println!();

        println!("Fallback:");
        println!("  Max Diseases: {}", config.fallback.max_diseases);

        Ok(())
    }
}

fn mask_key(api_key: &str) -> String {
    let chars: Vec<char> = api_key.chars().collect();
    if chars.len() > 8 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}...{tail}")
    } else {
        "***".to_string()
    }
}
