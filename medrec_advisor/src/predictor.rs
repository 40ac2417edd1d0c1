use medrec_core::{LLMProvider, Prediction};
use medrec_dataset::{ConditionStore, SymptomMatcher, SymptomVocabulary};
use std::sync::Arc;
use tracing::info;

use crate::error::Result;
use crate::fallback::FallbackPredictor;

/// Dataset lookup with a model fallback for queries nothing matches.
pub struct DiseasePredictor<P: LLMProvider + ?Sized> {
    store: Arc<ConditionStore>,
    matcher: SymptomMatcher,
    fallback: FallbackPredictor<P>,
}

impl<P: LLMProvider + ?Sized> DiseasePredictor<P> {
    pub const fn new(
        store: Arc<ConditionStore>,
        matcher: SymptomMatcher,
        fallback: FallbackPredictor<P>,
    ) -> Self {
        Self {
            store,
            matcher,
            fallback,
        }
    }

    pub async fn predict(&self, symptoms: &[String]) -> Result<Prediction> {
        let dataset = self.store.dataset();
        let matches = self.matcher.rank(&dataset, symptoms);

        if !matches.is_empty() {
            info!("Dataset matched {} diseases", matches.len());
            return Ok(Prediction::DatabaseMatch { matches });
        }

        info!("No dataset match, falling back to model");
        let vocabulary = SymptomVocabulary::from_dataset(&dataset);
        let diseases = self
            .fallback
            .predict(symptoms, &vocabulary.joined())
            .await?;
        Ok(Prediction::AiFallback { diseases })
    }
}
