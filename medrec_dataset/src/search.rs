//! Exact-token knowledge-base lookup.

use medrec_core::{ConditionInfo, normalize_symptom};

use crate::loader::Dataset;

/// Every record whose symptom set contains one of `symptoms` exactly
/// (case-insensitive), in dataset order.
#[must_use]
pub fn search_conditions<S: AsRef<str>>(dataset: &Dataset, symptoms: &[S]) -> Vec<ConditionInfo> {
    let wanted: Vec<String> = symptoms
        .iter()
        .map(|s| normalize_symptom(s.as_ref()))
        .filter(|s| !s.is_empty())
        .collect();
    if wanted.is_empty() {
        return Vec::new();
    }

    dataset
        .records()
        .iter()
        .filter(|record| {
            record
                .symptom_tokens()
                .iter()
                .any(|token| wanted.contains(token))
        })
        .map(ConditionInfo::from)
        .collect()
}
