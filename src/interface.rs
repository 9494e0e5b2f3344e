//! The service surface combining the property calculator, a store, the
//! matcher and the natural-language parser.
//!
//! An [`Analyzer`] is cheap to clone and safe to share between threads: it
//! holds the store behind an `Arc` and the parser, which is built once at
//! startup and never changed afterwards, behind another.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Result, SieveError};
use crate::language::QueryParser;
use crate::predicate::{FilterParams, Predicate};
use crate::store::{StringRecord, StringStore};

/// Result of a structured filter, echoing the predicate that was applied.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOutcome {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub filters_applied: Predicate,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterpretedQuery {
    pub original: String,
    pub parsed_filters: Predicate,
}

/// Result of a natural-language filter.
#[derive(Debug, Clone, Serialize)]
pub struct NaturalOutcome {
    pub data: Vec<StringRecord>,
    pub count: usize,
    pub interpreted_query: InterpretedQuery,
}

#[derive(Clone)]
pub struct Analyzer {
    store: Arc<dyn StringStore>,
    parser: Arc<QueryParser>,
}

impl Analyzer {
    pub fn new(store: Arc<dyn StringStore>, parser: Arc<QueryParser>) -> Self {
        Self { store, parser }
    }

    /// Computes the properties of `value` and keeps it.
    pub fn create(&self, value: &str) -> Result<StringRecord> {
        let record = self.store.insert(StringRecord::new(value.to_string()))?;
        info!(id = %record.id, length = record.properties.length, "string created");
        Ok(record)
    }

    pub fn get(&self, value: &str) -> Result<StringRecord> {
        self.store.get(value)?.ok_or_else(|| SieveError::NotFound(value.to_string()))
    }

    pub fn filter(&self, params: &FilterParams) -> Result<FilterOutcome> {
        let predicate = params.to_predicate()?;
        let data = self.store.list(&predicate)?;
        debug!(criteria = predicate.len(), count = data.len(), "structured filter");
        Ok(FilterOutcome { count: data.len(), data, filters_applied: predicate })
    }

    pub fn filter_natural(&self, query: &str) -> Result<NaturalOutcome> {
        let predicate = self.parser.parse(query)?;
        let data = self.store.list(&predicate)?;
        debug!(query, criteria = predicate.len(), count = data.len(), "natural language filter");
        Ok(NaturalOutcome {
            count: data.len(),
            data,
            interpreted_query: InterpretedQuery { original: query.to_string(), parsed_filters: predicate },
        })
    }

    pub fn delete(&self, value: &str) -> Result<()> {
        if self.store.delete(value)? {
            info!(value, "string deleted");
            Ok(())
        } else {
            Err(SieveError::NotFound(value.to_string()))
        }
    }
}
