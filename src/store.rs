use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use seahash::SeaHasher;

use crate::error::{Result, SieveError};
use crate::predicate::Predicate;
use crate::properties::{self, PropertySet};

pub type ValueHasher = BuildHasherDefault<SeaHasher>;

/// A stored string. The value is unique across a store and is never changed
/// after creation; `id` is the SHA-256 digest of the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringRecord {
    pub id: String,
    pub value: String,
    pub properties: PropertySet,
    pub created_at: DateTime<Utc>,
}

impl StringRecord {
    pub fn new(value: String) -> Self {
        Self::with_timestamp(value, Utc::now())
    }
    pub fn with_timestamp(value: String, created_at: DateTime<Utc>) -> Self {
        let properties = properties::compute(&value);
        Self { id: properties.sha256_hash.clone(), value, properties, created_at }
    }
}

/// What the engine needs from whatever keeps the records.
pub trait StringStore: Send + Sync {
    /// Fails with [`SieveError::Duplicate`] when the value is already kept.
    fn insert(&self, record: StringRecord) -> Result<StringRecord>;
    fn get(&self, value: &str) -> Result<Option<StringRecord>>;
    /// Matching records in insertion order.
    fn list(&self, predicate: &Predicate) -> Result<Vec<StringRecord>>;
    /// Returns whether a record was removed.
    fn delete(&self, value: &str) -> Result<bool>;
    fn len(&self) -> Result<usize>;
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

#[derive(Debug, Default)]
struct Kept {
    sequence: u64,
    // value -> (insertion sequence, record)
    records: HashMap<String, (u64, StringRecord), ValueHasher>,
}

/// Keeps records in memory only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    kept: Mutex<Kept>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Kept>> {
        self.kept.lock().map_err(|e| SieveError::Lock(e.to_string()))
    }
}

impl StringStore for MemoryStore {
    fn insert(&self, record: StringRecord) -> Result<StringRecord> {
        let mut kept = self.lock()?;
        if kept.records.contains_key(&record.value) {
            return Err(SieveError::Duplicate(record.value));
        }
        kept.sequence += 1;
        let sequence = kept.sequence;
        kept.records.insert(record.value.clone(), (sequence, record.clone()));
        Ok(record)
    }

    fn get(&self, value: &str) -> Result<Option<StringRecord>> {
        Ok(self.lock()?.records.get(value).map(|(_, record)| record.clone()))
    }

    fn list(&self, predicate: &Predicate) -> Result<Vec<StringRecord>> {
        let kept = self.lock()?;
        let mut matching: Vec<&(u64, StringRecord)> = kept
            .records
            .values()
            .filter(|(_, record)| predicate.matches(&record.properties))
            .collect();
        matching.sort_by_key(|(sequence, _)| *sequence);
        Ok(matching.into_iter().map(|(_, record)| record.clone()).collect())
    }

    fn delete(&self, value: &str) -> Result<bool> {
        Ok(self.lock()?.records.remove(value).is_some())
    }

    fn len(&self) -> Result<usize> {
        Ok(self.lock()?.records.len())
    }
}
