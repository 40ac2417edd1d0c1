//! Integration tests for loading, caching and matching against a dataset
//! file on disk.

use medrec_dataset::{ConditionStore, SymptomMatcher, SymptomVocabulary, search_conditions};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

const DATASET: &str = "\
Disease,Description,Medication,Diets,Workout,Precautions,Symptoms
Flu,\"Viral infection of the nose, throat and lungs\",\"['Antiviral drugs', 'Rest']\",\"['Soup', 'Fluids']\",Light stretching,\"['Rest', 'Hydrate']\",\"fever,cough,fatigue\"
Common Cold,Mild upper respiratory infection,\"['Decongestants']\",\"['Vitamin C']\",Walking,\"['Wash hands']\",\"cough,sneezing,runny_nose\"
Migraine,Recurrent headache,\"['Analgesics']\",\"['Magnesium rich foods']\",Yoga,\"['Avoid triggers']\",\"headache,nausea,blurred_and_distorted_vision\"
Malaria,Mosquito-borne disease,\"['Antimalarials']\",\"['Fluids']\",Rest,\"['Use nets']\",\"chills,high_fever,sweating,headache\"
";

fn write_dataset(contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("medrec_ds_{}", Uuid::now_v7()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dataset.csv");
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_store_memoizes_first_successful_load() {
    let path = write_dataset(DATASET);
    let store = ConditionStore::new(&path);
    assert!(!store.is_loaded());

    let first = store.dataset();
    assert_eq!(first.len(), 4);
    assert!(store.is_loaded());

    // Removing the file must not affect the cached table.
    std::fs::remove_file(&path).unwrap();
    let second = store.dataset();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_failed_load_is_retried() {
    let dir = std::env::temp_dir().join(format!("medrec_ds_{}", Uuid::now_v7()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("dataset.csv");

    let store = ConditionStore::new(&path);
    assert!(store.dataset().is_empty());
    assert!(!store.is_loaded());

    std::fs::write(&path, DATASET).unwrap();
    assert_eq!(store.dataset().len(), 4);
}

#[test]
fn test_bad_header_degrades_to_empty() {
    let path = write_dataset("name,symptoms\nFlu,fever\n");
    let store = ConditionStore::new(&path);
    assert!(store.dataset().is_empty());
    assert!(store.try_dataset().is_err());
    assert!(SymptomMatcher::default().rank(&store.dataset(), &["fever"]).is_empty());
}

#[test]
fn test_store_shared_across_threads() {
    let path = write_dataset(DATASET);
    let store = Arc::new(ConditionStore::new(&path));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            std::thread::spawn(move || store.dataset().len())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4);
    }
}

#[test]
fn test_every_verbatim_symptom_finds_its_disease() {
    let path = write_dataset(DATASET);
    let store = ConditionStore::new(&path);
    let dataset = store.dataset();
    let matcher = SymptomMatcher::new(dataset.len());

    for record in dataset.records() {
        for token in record.symptom_tokens() {
            let results = matcher.rank(&dataset, &[token.as_str()]);
            assert!(
                results.iter().any(|m| m.disease() == record.disease),
                "{} should match {token}",
                record.disease
            );
        }
    }
}

#[test]
fn test_ranking_prefers_broader_overlap() {
    let path = write_dataset(DATASET);
    let dataset = ConditionStore::new(&path).dataset();

    let results = SymptomMatcher::default().rank(&dataset, &["Headache", "chills", "fever"]);
    assert_eq!(results[0].disease(), "Malaria");
    assert_eq!(results[0].score, 3);
    assert!(results.len() <= 5);

    let diseases: Vec<_> = results.iter().map(|m| m.disease()).collect();
    assert!(diseases.contains(&"Migraine"));
    assert!(diseases.contains(&"Flu"));
}

#[test]
fn test_search_and_vocabulary_over_file() {
    let path = write_dataset(DATASET);
    let dataset = ConditionStore::new(&path).dataset();

    let hits = search_conditions(&dataset, &["cough"]);
    let names: Vec<_> = hits.iter().map(|h| h.disease.as_str()).collect();
    assert_eq!(names, vec!["Flu", "Common Cold"]);
    assert_eq!(hits[0].medication, "['Antiviral drugs', 'Rest']");

    let vocabulary = SymptomVocabulary::from_dataset(&dataset);
    assert!(vocabulary.contains("runny nose"));
    assert_eq!(vocabulary.suggest("fever"), vec!["fever", "high_fever"]);
}
