use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::error::Result;
use crate::loader::{Dataset, load_dataset};

/// Lazily loaded, write-once condition table shared by every request.
///
/// The first successful load is kept for the lifetime of the store. A
/// failed load degrades to an empty dataset and is retried on the next
/// call.
#[derive(Debug)]
pub struct ConditionStore {
    path: Option<PathBuf>,
    cell: OnceCell<Arc<Dataset>>,
}

impl ConditionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            cell: OnceCell::new(),
        }
    }

    /// Store pre-seeded with an in-memory dataset.
    #[must_use]
    pub fn from_dataset(dataset: Dataset) -> Self {
        Self {
            path: None,
            cell: OnceCell::with_value(Arc::new(dataset)),
        }
    }

    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }

    /// Load on first use and return the cached table.
    pub fn try_dataset(&self) -> Result<Arc<Dataset>> {
        let dataset = self.cell.get_or_try_init(|| -> Result<Arc<Dataset>> {
            let Some(path) = self.path.as_deref() else {
                return Ok(Arc::new(Dataset::default()));
            };
            let dataset = load_dataset(path)?;
            info!("Cached {} condition records", dataset.len());
            Ok(Arc::new(dataset))
        })?;
        Ok(Arc::clone(dataset))
    }

    /// Like [`Self::try_dataset`], but read or parse failures yield an
    /// empty dataset.
    #[must_use]
    pub fn dataset(&self) -> Arc<Dataset> {
        match self.try_dataset() {
            Ok(dataset) => {
                if dataset.is_empty() {
                    warn!("Condition dataset is empty");
                }
                dataset
            }
            Err(e) => {
                error!("Failed to read or parse the dataset file: {e}");
                Arc::new(Dataset::default())
            }
        }
    }
}
