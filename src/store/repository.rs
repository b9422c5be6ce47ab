//! Politician record store
//!
//! Loads the dataset once and answers id and location lookups. The store is
//! read-only after construction and is shared between request handlers
//! through an `Arc`.

use super::location::LocationIndex;
use super::records::PoliticianRecord;
use crate::error::{AppError, LoadError};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct PoliticianStore {
    records: Vec<PoliticianRecord>,
    by_id: HashMap<u32, usize>,
}

impl PoliticianStore {
    /// Load and validate the data file at `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self::from_json_str(&data)?;
        if store.is_empty() {
            warn!("Data file {} contains no politicians", path.display());
        }
        info!(
            "Loaded {} politicians from {}",
            store.len(),
            path.display()
        );
        Ok(store)
    }

    /// Parse a JSON array of records
    pub fn from_json_str(data: &str) -> Result<Self, LoadError> {
        let records: Vec<PoliticianRecord> = serde_json::from_str(data)?;
        Self::from_records(records)
    }

    /// Build a store from already-parsed records, enforcing id uniqueness
    pub fn from_records(records: Vec<PoliticianRecord>) -> Result<Self, LoadError> {
        let mut by_id = HashMap::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            record.validate().map_err(|reason| LoadError::Invalid {
                id: record.id,
                reason,
            })?;

            if by_id.insert(record.id, index).is_some() {
                return Err(LoadError::DuplicateId(record.id));
            }
        }

        debug!("Indexed {} politician ids", by_id.len());
        Ok(Self { records, by_id })
    }

    /// All records in file order
    pub fn all(&self) -> &[PoliticianRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&PoliticianRecord> {
        self.by_id.get(&id).map(|&index| &self.records[index])
    }

    /// Like [`get`](Self::get) but reports a miss as `NotFound`
    pub fn require(&self, id: u32) -> Result<&PoliticianRecord, AppError> {
        self.get(id).ok_or_else(|| AppError::politician_not_found(id))
    }

    /// Resolve every id, failing on the first one that is absent
    pub fn get_many(&self, ids: &[u32]) -> Result<Vec<&PoliticianRecord>, AppError> {
        ids.iter().map(|&id| self.require(id)).collect()
    }

    pub fn locations(&self) -> LocationIndex<'_> {
        LocationIndex::new(&self.records)
    }

    pub fn by_location(
        &self,
        lat: Option<f64>,
        lng: Option<f64>,
        state: Option<&str>,
    ) -> Vec<&PoliticianRecord> {
        self.locations().by_location(lat, lng, state)
    }

    pub fn national(&self) -> Vec<&PoliticianRecord> {
        self.locations().national()
    }
}
