// used for persistence
use rusqlite::{params, Connection, Error, OptionalExtension};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

use crate::error::{Result, SieveError};
use crate::predicate::Predicate;
use crate::properties::PropertySet;
use crate::store::{MemoryStore, StringRecord, StringStore};

/// Where records are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceMode {
    /// Nothing survives a restart.
    InMemory,
    /// A SQLite database file.
    File(String),
}

pub fn open_store(mode: &PersistenceMode) -> Result<Arc<dyn StringStore>> {
    match mode {
        PersistenceMode::InMemory => Ok(Arc::new(MemoryStore::new())),
        PersistenceMode::File(path) => {
            let store = SqliteStore::new(Connection::open(path)?)?;
            info!(path = %path, records = store.len()?, "opened string store");
            Ok(Arc::new(store))
        }
    }
}

// ------------- Persistence -------------
pub struct SqliteStore {
    connection: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new(connection: Connection) -> Result<Self> {
        // the sequence keeps insertion order, the unique value constraint rejects duplicates
        connection.execute_batch(
            "
            create table if not exists StringRecord (
                StringRecord_Sequence integer primary key autoincrement,
                StringRecord_Identity text not null,
                Value text not null,
                Properties text not null,
                CreatedAt text not null,
                constraint unique_Value unique (
                    Value
                )
            );
            ",
        )?;
        Ok(Self { connection: Mutex::new(connection) })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::new(Connection::open_in_memory()?)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection.lock().map_err(|e| SieveError::Lock(e.to_string()))
    }
}

fn restore(value: String, identity: String, properties: String, created_at: DateTime<Utc>) -> Result<StringRecord> {
    let properties: PropertySet = serde_json::from_str(&properties)?;
    Ok(StringRecord { id: identity, value, properties, created_at })
}

impl StringStore for SqliteStore {
    fn insert(&self, record: StringRecord) -> Result<StringRecord> {
        let connection = self.lock()?;
        let properties = serde_json::to_string(&record.properties)?;
        let inserted = connection
            .prepare_cached(
                "
                insert into StringRecord (
                    StringRecord_Identity,
                    Value,
                    Properties,
                    CreatedAt
                ) values (?, ?, ?, ?)
            ",
            )?
            .execute(params![&record.id, &record.value, &properties, &record.created_at]);
        match inserted {
            Ok(_) => Ok(record),
            Err(Error::SqliteFailure(failure, _)) if failure.code == rusqlite::ErrorCode::ConstraintViolation => {
                Err(SieveError::Duplicate(record.value))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get(&self, value: &str) -> Result<Option<StringRecord>> {
        let connection = self.lock()?;
        let row = connection
            .prepare_cached(
                "
                select StringRecord_Identity, Properties, CreatedAt
                    from StringRecord
                    where Value = ?
            ",
            )?
            .query_row(params![value], |r| {
                Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?, r.get::<_, DateTime<Utc>>(2)?))
            })
            .optional()?;
        row.map(|(identity, properties, created_at)| restore(value.to_string(), identity, properties, created_at))
            .transpose()
    }

    fn list(&self, predicate: &Predicate) -> Result<Vec<StringRecord>> {
        let connection = self.lock()?;
        let mut statement = connection.prepare_cached(
            "
            select Value, StringRecord_Identity, Properties, CreatedAt
                from StringRecord
                order by StringRecord_Sequence
        ",
        )?;
        let rows = statement.query_map([], |r| {
            Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?, r.get::<_, String>(2)?, r.get::<_, DateTime<Utc>>(3)?))
        })?;
        let mut records = Vec::new();
        for row in rows {
            let (value, identity, properties, created_at) = row?;
            let record = restore(value, identity, properties, created_at)?;
            if predicate.matches(&record.properties) {
                records.push(record);
            }
        }
        Ok(records)
    }

    fn delete(&self, value: &str) -> Result<bool> {
        let connection = self.lock()?;
        let removed = connection
            .prepare_cached("delete from StringRecord where Value = ?")?
            .execute(params![value])?;
        Ok(removed > 0)
    }

    fn len(&self) -> Result<usize> {
        let connection = self.lock()?;
        let count: i64 = connection.query_row("select count(*) from StringRecord", [], |r| r.get(0))?;
        usize::try_from(count).map_err(|e| SieveError::Persistence(e.to_string()))
    }
}
