//! Message builders and output schemas for each model call.

use medrec_core::{ChatMessage, ConditionInfo, HealthProfile};
use serde_json::json;

pub const FALLBACK_SYSTEM_PROMPT: &str = "You are a medical assistant. Identify possible diseases from a user's symptoms. Reply with condition names only.";

pub const MEDICATION_SYSTEM_PROMPT: &str = "You are a medical expert specializing in medication recommendations. Format suggestions as a clean, bulleted markdown list with each medication bolded.";

pub const DIET_SYSTEM_PROMPT: &str = "You are a registered dietitian creating personalized diet charts. Respond only with the chart in markdown, without introductory or concluding text.";

#[must_use]
pub fn fallback_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "possibleDiseases": { "type": "array", "items": { "type": "string" } }
        },
        "required": ["possibleDiseases"]
    })
}

#[must_use]
pub fn medication_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "medicationSuggestions": { "type": "string" },
            "disclaimer": { "type": "string" }
        },
        "required": ["medicationSuggestions", "disclaimer"]
    })
}

#[must_use]
pub fn diet_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "dietChart": { "type": "string" }
        },
        "required": ["dietChart"]
    })
}

/// `valid_symptoms` is empty when no dataset is available.
#[must_use]
pub fn fallback_messages(
    symptoms: &[String],
    valid_symptoms: &str,
    max_diseases: usize,
) -> Vec<ChatMessage> {
    let mut user = String::new();
    if !valid_symptoms.is_empty() {
        user.push_str("First map the user's symptoms onto the closest entries of this list:\n");
        user.push_str("Valid Symptoms: ");
        user.push_str(valid_symptoms);
        user.push_str("\n\n");
    }
    user.push_str(&format!(
        "List at most {max_diseases} plausible conditions, most likely first.\nSymptoms: {}",
        symptoms.join(", ")
    ));

    vec![ChatMessage::system(FALLBACK_SYSTEM_PROMPT), ChatMessage::user(user)]
}

#[must_use]
pub fn medication_messages(
    disease: &str,
    symptoms: &[String],
    profile: &HealthProfile,
    guideline: Option<&ConditionInfo>,
) -> Vec<ChatMessage> {
    let reference = guideline.map_or_else(
        || "No knowledge-base entry exists for this condition; suggest commonly used over-the-counter options.".to_string(),
        |info| {
            format!(
                "Knowledge-base entry for {}:\n- Description: {}\n- Medication: {}\nList exactly the medications given in the Medication field.",
                info.disease, info.description, info.medication
            )
        },
    );

    let user = format!(
        "Predicted Disease: {disease}\nSymptoms: {}\nPatient Profile: {}\n\n{reference}\n\nInclude this disclaimer: \"{}\"",
        symptoms.join(", "),
        profile.summary(),
        medrec_core::STANDARD_DISCLAIMER
    );

    vec![ChatMessage::system(MEDICATION_SYSTEM_PROMPT), ChatMessage::user(user)]
}

#[must_use]
pub fn diet_messages(
    disease: &str,
    symptoms: &[String],
    profile: &HealthProfile,
    guideline: Option<&ConditionInfo>,
) -> Vec<ChatMessage> {
    let reference = guideline.map_or_else(
        || "No knowledge-base entry exists for this condition; use general healthy-eating guidance.".to_string(),
        |info| {
            format!(
                "Generic guideline from the knowledge base:\n- Diets: {}\n- Workout: {}\n- Precautions: {}",
                info.diets, info.workout, info.precaution
            )
        },
    );

    let user = format!(
        "Predicted Condition: {disease}\nSymptoms: {}\nAge: {} years\nGender: {}\nWeight: {} kg\nHeight: {} cm\nActivity Level: {}\nDietary Restrictions: {}\n\n{reference}\n\n\
         Create a 7-day diet chart (breakfast, lunch, dinner, snacks) adjusted to this profile and strictly respecting the dietary restrictions. \
         Add a personalized workout routine and precautions. Use the headings \"Diet Plan\", \"Workout Routine\" and \"Precautions\", \
         and bold each meal bullet.",
        symptoms.join(", "),
        profile.age,
        profile.gender,
        profile.weight_kg,
        profile.height_cm,
        profile.activity_level,
        profile.restrictions(),
    );

    vec![ChatMessage::system(DIET_SYSTEM_PROMPT), ChatMessage::user(user)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use medrec_core::{ActivityLevel, Gender};

    fn profile() -> HealthProfile {
        HealthProfile {
            age: 40,
            gender: Gender::Male,
            weight_kg: 80.0,
            height_cm: 180.0,
            activity_level: ActivityLevel::VeryActive,
            dietary_restrictions: Some("vegetarian".to_string()),
        }
    }

    #[test]
    fn fallback_lists_vocabulary_when_present() {
        let symptoms = vec!["bleeding with cough".to_string()];
        let with_vocab = fallback_messages(&symptoms, "blood_in_sputum, cough", 3);
        assert!(with_vocab[1].content.contains("Valid Symptoms: blood_in_sputum, cough"));
        assert!(with_vocab[1].content.contains("at most 3"));

        let without = fallback_messages(&symptoms, "", 3);
        assert!(!without[1].content.contains("Valid Symptoms"));
    }

    #[test]
    fn medication_prompt_carries_guideline() {
        let info = ConditionInfo {
            disease: "Flu".to_string(),
            description: "Viral".to_string(),
            medication: "['Oseltamivir']".to_string(),
            diets: String::new(),
            workout: String::new(),
            precaution: String::new(),
        };
        let messages = medication_messages("Flu", &["fever".to_string()], &profile(), Some(&info));
        assert!(messages[1].content.contains("Oseltamivir"));
        assert!(messages[1].content.contains("Activity Level: very active"));
    }

    #[test]
    fn diet_prompt_includes_restrictions() {
        let messages = diet_messages("Flu", &[], &profile(), None);
        assert!(messages[1].content.contains("Dietary Restrictions: vegetarian"));
        assert!(messages[1].content.contains("general healthy-eating"));
    }
}
