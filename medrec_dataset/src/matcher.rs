//! Symptom-overlap ranking over the condition table.

use medrec_core::{ConditionRecord, MatchResult, normalize_symptom};
use std::collections::HashMap;
use tracing::debug;

use crate::loader::Dataset;

/// Number of diseases returned when no explicit bound is configured.
pub const DEFAULT_TOP_K: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomMatcher {
    top_k: usize,
}

impl Default for SymptomMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_K)
    }
}

struct Candidate<'a> {
    record: &'a ConditionRecord,
    /// Indexed by query position.
    matched: Vec<bool>,
}

impl SymptomMatcher {
    #[must_use]
    pub const fn new(top_k: usize) -> Self {
        Self { top_k }
    }

    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Rank diseases by the number of distinct query symptoms they match.
    ///
    /// A query symptom matches a record when either string contains the
    /// other (after normalization). Diseases spread over several rows are
    /// merged into one result. Ties keep dataset order. An empty result
    /// means nothing matched.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn rank<S: AsRef<str>>(&self, dataset: &Dataset, query: &[S]) -> Vec<MatchResult> {
        let query = normalize_query(query);
        if query.is_empty() || dataset.is_empty() || self.top_k == 0 {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate<'_>> = Vec::new();
        let mut by_disease: HashMap<String, usize> = HashMap::new();

        for record in dataset.records() {
            let tokens = record.symptom_tokens();
            let hits: Vec<bool> = query
                .iter()
                .map(|q| tokens.iter().any(|t| symptoms_overlap(q, t)))
                .collect();
            if !hits.contains(&true) {
                continue;
            }

            let slot = *by_disease.entry(record.disease_key()).or_insert_with(|| {
                candidates.push(Candidate {
                    record,
                    matched: vec![false; query.len()],
                });
                candidates.len() - 1
            });

            for (seen, hit) in candidates[slot].matched.iter_mut().zip(hits) {
                *seen |= hit;
            }
        }

        let total = query.len() as f64;
        let mut results: Vec<MatchResult> = candidates
            .into_iter()
            .map(|candidate| {
                let matched_symptoms: Vec<String> = query
                    .iter()
                    .zip(&candidate.matched)
                    .filter(|(_, hit)| **hit)
                    .map(|(q, _)| q.clone())
                    .collect();
                let score = matched_symptoms.len();
                MatchResult {
                    record: candidate.record.clone(),
                    matched_symptoms,
                    score,
                    confidence: (score as f64 / total * 100.0).min(100.0),
                }
            })
            .collect();

        // Stable, so equal scores stay in dataset order.
        results.sort_by(|a, b| b.score.cmp(&a.score));
        results.truncate(self.top_k);

        debug!(
            "Matched {} diseases for {} query symptoms",
            results.len(),
            query.len()
        );
        results
    }
}

/// Normalize, drop empties, and deduplicate while keeping first-seen order.
fn normalize_query<S: AsRef<str>>(query: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = Vec::with_capacity(query.len());
    for raw in query {
        let symptom = normalize_symptom(raw.as_ref());
        if !symptom.is_empty() && !normalized.contains(&symptom) {
            normalized.push(symptom);
        }
    }
    normalized
}

fn symptoms_overlap(query: &str, token: &str) -> bool {
    token.contains(query) || query.contains(token)
}
