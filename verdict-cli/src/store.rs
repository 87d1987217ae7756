//! JSON record store used by the `lookup` command

use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use verdict_core::{Fault, FaultKind, Intercept, Outcome, StructuredError};

/// Group tag for faults raised while opening the store
pub const STORE_GROUP: &str = "store";

/// A single stored record
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Record {
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.tags.is_empty() {
            write!(f, " [{}]", self.tags.join(", "))?;
        }
        Ok(())
    }
}

/// Records keyed by id, loaded from a JSON object
#[derive(Debug)]
pub struct RecordStore {
    records: HashMap<String, Record>,
}

impl RecordStore {
    /// Load the store from a JSON file
    pub fn open(path: &Path) -> Result<Self, Fault> {
        let text = std::fs::read_to_string(path)?;
        let records: HashMap<String, Record> = serde_json::from_str(&text)?;
        tracing::debug!(path = %path.display(), records = records.len(), "record store opened");
        Ok(Self { records })
    }

    /// Get a record by key; a missing key is a `NotFound` fault
    pub fn get(&self, key: &str) -> Result<Record, Fault> {
        self.records
            .get(key)
            .cloned()
            .ok_or_else(|| Fault::not_found(format!("no record with key '{}'", key)))
    }
}

/// Classifier for lookups: a missing key is reported as a missing record
pub fn lookup_intercept() -> Intercept {
    Intercept::classified(|fault, _trace| match fault.kind() {
        FaultKind::NotFound => Some(StructuredError::new("missing record").with_source("db")),
        _ => None,
    })
}

/// Open the store and look up `key`
pub fn lookup(path: &Path, key: &str) -> Outcome<Record> {
    Outcome::from_computation_with(|| RecordStore::open(path), &Intercept::grouped(STORE_GROUP))
        .map_with(|store| store.get(key), &lookup_intercept())
}
