#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Condition knowledge base: CSV loading, the memoized store, and the
//! symptom matcher that ranks diseases against a query.

mod error;
mod loader;
pub mod matcher;
pub mod search;
mod store;
pub mod vocabulary;

pub use error::{DatasetError, Result};
pub use loader::{Dataset, load_dataset, parse_dataset};
pub use matcher::{DEFAULT_TOP_K, SymptomMatcher};
pub use search::search_conditions;
pub use store::ConditionStore;
pub use vocabulary::SymptomVocabulary;
