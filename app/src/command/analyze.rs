use medrec_advisor::{AdvisorSettings, AnalysisRequest, AnalysisResponse, HealthAnalyzer};
use medrec_config::Config;
use medrec_core::HealthProfile;
use medrec_dataset::ConditionStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct AnalyzeInput {
    pub symptoms: String,
    pub profile: HealthProfile,
    pub dataset: Option<PathBuf>,
    pub model: Option<String>,
    pub json: bool,
}

/// Full analysis: diseases, medication suggestions and a diet chart.
#[derive(Debug, Clone, Copy)]
pub struct AnalyzeStrategy;

impl super::CommandStrategy for AnalyzeStrategy {
    type Input = AnalyzeInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;

        let settings = AdvisorSettings {
            model: input
                .model
                .unwrap_or_else(|| config.agents.defaults.model.clone()),
            top_k: config.dataset.top_k,
            max_diseases: config.fallback.max_diseases,
        };
        let provider = Arc::new(super::build_provider(&config));
        let store = Arc::new(ConditionStore::new(
            input.dataset.unwrap_or_else(|| config.dataset.path.clone()),
        ));
        let analyzer = HealthAnalyzer::new(provider, store, settings);

        let request = AnalysisRequest {
            symptoms: input.symptoms,
            profile: input.profile,
        };
        let response = AnalysisResponse::from_result(analyzer.analyze(&request).await);

        if input.json {
            println!("{}", serde_json::to_string_pretty(&response)?);
            return Ok(());
        }

        let Some(data) = response.data else {
            anyhow::bail!(
                "{}",
                response.error.unwrap_or_else(|| "Analysis failed".to_string())
            );
        };

        println!("## Possible Conditions\n");
        if data.diseases.is_empty() {
            println!("- No specific condition identified");
        }
        for disease in &data.diseases {
            println!("- {disease}");
        }
        println!("\n## Medication Suggestions\n");
        println!("{}", data.medications.suggestions);
        println!("\n> {}\n", data.medications.disclaimer);
        println!("{}", data.diet_chart);
        Ok(())
    }
}
