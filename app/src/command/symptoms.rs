use medrec_dataset::SymptomVocabulary;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct SymptomsInput {
    pub dataset: Option<PathBuf>,
    /// Only list entries related to this phrase.
    pub filter: Option<String>,
}

/// Lists the symptom vocabulary known to the dataset.
#[derive(Debug, Clone, Copy)]
pub struct SymptomsStrategy;

impl super::CommandStrategy for SymptomsStrategy {
    type Input = SymptomsInput;

    async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let store = super::open_store(input.dataset)?;
        let dataset = store.try_dataset()?;
        let vocabulary = SymptomVocabulary::from_dataset(&dataset);

        let symptoms: Vec<&str> = match input.filter.as_deref() {
            Some(phrase) => vocabulary.suggest(phrase),
            None => vocabulary.iter().collect(),
        };

        if symptoms.is_empty() {
            println!("No matching symptoms.");
        }
        for symptom in symptoms {
            println!("{symptom}");
        }
        Ok(())
    }
}
