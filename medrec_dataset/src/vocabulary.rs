//! Controlled symptom vocabulary derived from the dataset.

use medrec_core::normalize_symptom;
use std::collections::BTreeSet;

use crate::loader::Dataset;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymptomVocabulary {
    symptoms: BTreeSet<String>,
}

impl SymptomVocabulary {
    #[must_use]
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let symptoms = dataset
            .records()
            .iter()
            .flat_map(medrec_core::ConditionRecord::symptom_tokens)
            .collect();
        Self { symptoms }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symptoms.iter().map(String::as_str)
    }

    #[must_use]
    pub fn contains(&self, symptom: &str) -> bool {
        self.symptoms.contains(&normalize_symptom(symptom))
    }

    /// Vocabulary entries that contain `phrase` or are contained in it.
    #[must_use]
    pub fn suggest(&self, phrase: &str) -> Vec<&str> {
        let phrase = normalize_symptom(phrase);
        if phrase.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|s| s.contains(phrase.as_str()) || phrase.contains(s))
            .collect()
    }

    /// Comma-separated list for prompts.
    #[must_use]
    pub fn joined(&self) -> String {
        self.iter().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medrec_core::ConditionRecord;

    fn row(symptoms: &str) -> ConditionRecord {
        ConditionRecord {
            disease: "X".to_string(),
            description: String::new(),
            medication: String::new(),
            diets: String::new(),
            workout: String::new(),
            precautions: String::new(),
            symptoms: symptoms.to_string(),
        }
    }

    #[test]
    fn collects_sorted_distinct_tokens() {
        let dataset = Dataset::new(vec![row("cough, Fever"), row("fever,skin_rash")]);
        let vocabulary = SymptomVocabulary::from_dataset(&dataset);

        assert_eq!(vocabulary.len(), 3);
        assert_eq!(vocabulary.joined(), "cough, fever, skin_rash");
        assert!(vocabulary.contains("Skin Rash"));
    }

    #[test]
    fn suggest_uses_containment() {
        let dataset = Dataset::new(vec![row("high_fever,mild_fever,cough")]);
        let vocabulary = SymptomVocabulary::from_dataset(&dataset);

        assert_eq!(vocabulary.suggest("fever"), vec!["high_fever", "mild_fever"]);
        assert_eq!(vocabulary.suggest("persistent cough"), vec!["cough"]);
        assert!(vocabulary.suggest("").is_empty());
    }
}
