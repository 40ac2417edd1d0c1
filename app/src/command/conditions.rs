use medrec_core::{ConditionInfo, split_symptom_text};
use medrec_dataset::search_conditions;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ConditionsInput {
    /// Comma-separated symptoms
    pub symptoms: String,
    pub dataset: Option<PathBuf>,
    pub json: bool,
}

/// Knowledge-base entries whose symptom list contains a given symptom exactly.
#[derive(Debug, Clone, Copy)]
pub struct ConditionsStrategy;

impl super::CommandStrategy for ConditionsStrategy {
    type Input = ConditionsInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let symptoms = split_symptom_text(&input.symptoms);
        if symptoms.is_empty() {
            anyhow::bail!("Please provide at least one symptom.");
        }

        let store = super::open_store(input.dataset)?;
        let dataset = store.try_dataset()?;
        let conditions = search_conditions(&dataset, &symptoms);

        if input.json {
            println!("{}", serde_json::to_string_pretty(&conditions)?);
            return Ok(());
        }

        if conditions.is_empty() {
            println!("No condition lists these symptoms.");
        }
        for condition in &conditions {
            println!("{}", format_condition(condition));
        }
        Ok(())
    }
}

fn format_condition(info: &ConditionInfo) -> String {
    let mut out = format!("## {}\n\n{}\n", info.disease, info.description);
    for (label, value) in [
        ("Medication", &info.medication),
        ("Diets", &info.diets),
        ("Workout", &info.workout),
        ("Precautions", &info.precaution),
    ] {
        if !value.is_empty() {
            let _ = write!(out, "\n- {label}: {value}");
        }
    }
    out.push('\n');
    out
}
