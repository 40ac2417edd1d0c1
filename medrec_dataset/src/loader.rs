use medrec_core::ConditionRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::error::{DatasetError, Result};

/// Immutable in-memory condition table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    records: Vec<ConditionRecord>,
}

impl Dataset {
    #[must_use]
    pub const fn new(records: Vec<ConditionRecord>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[ConditionRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First row whose disease equals `name`, ignoring case and
    /// surrounding whitespace.
    #[must_use]
    pub fn find_by_disease(&self, name: &str) -> Option<&ConditionRecord> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return None;
        }
        self.records.iter().find(|r| r.disease_key() == key)
    }
}

/// Read and parse the dataset file at `path`.
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    info!("Loading condition dataset from {}", path.display());
    let file = File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_dataset(file)
}

/// Parse CSV content with the fixed condition header.
///
/// Quoted fields may contain commas. Rows that fail to parse, or that have
/// no disease name, are skipped with a warning.
pub fn parse_dataset<R: Read>(reader: R) -> Result<Dataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?;
    if !headers.iter().eq(ConditionRecord::COLUMNS) {
        return Err(DatasetError::MissingColumns {
            found: headers.iter().collect::<Vec<_>>().join(","),
            expected: ConditionRecord::COLUMNS.join(","),
        });
    }

    let mut records = Vec::new();
    let mut skipped = 0_usize;
    for row in csv_reader.deserialize::<ConditionRecord>() {
        match row {
            Ok(record) if record.disease.is_empty() => {
                skipped += 1;
                warn!("Skipping dataset row without a disease name");
            }
            Ok(record) => records.push(record),
            Err(e) => {
                skipped += 1;
                let line = e.position().map_or(0, csv::Position::line);
                warn!("Skipping malformed dataset row at line {line}: {e}");
            }
        }
    }

    debug!("Parsed {} dataset rows, skipped {skipped}", records.len());
    Ok(Dataset::new(records))
}
