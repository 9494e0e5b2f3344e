//! Stringsieve – stores short strings and filters them by computed properties.
//!
//! Every stored string carries a [`properties::PropertySet`]: its length,
//! whether it is a palindrome, its number of distinct characters, its word
//! count, its SHA-256 digest and a per character frequency map. Stored strings
//! can be filtered either with structured parameters or with a free text query
//! such as "all single word palindromic strings longer than 5 characters".
//!
//! ## Modules
//! * [`properties`] – The property calculator, a pure function of the string.
//! * [`predicate`] – Criteria, their conjunction ([`predicate::Predicate`]) and
//!   the matcher, plus validation of structured query parameters.
//! * [`language`] – The rule based natural-language parser producing predicates.
//! * [`store`] – The [`store::StringStore`] trait and an in-memory store.
//! * [`persist`] – A SQLite backed store.
//! * [`interface`] – The [`interface::Analyzer`] service tying the above together.
//! * [`server`] – HTTP routes on top of the analyzer.
//!
//! ## Policies
//! Palindromes are judged on exact characters: case and whitespace count, so
//! "Madam" is not a palindrome. A free text query is lowercased before rules
//! are applied, which means "containing the letter Z" looks for `z`, while the
//! structured `contains_character` parameter keeps the case it was given.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use stringsieve::{interface::Analyzer, language::QueryParser, store::MemoryStore};
//! let analyzer = Analyzer::new(Arc::new(MemoryStore::new()), Arc::new(QueryParser::default()));
//! analyzer.create("racecar").unwrap();
//! analyzer.create("hello world").unwrap();
//! let outcome = analyzer.filter_natural("single word palindromes").unwrap();
//! assert_eq!(outcome.count, 1);
//! ```

pub mod config;
pub mod error;
pub mod interface;
pub mod language;
pub mod persist;
pub mod predicate;
pub mod properties;
pub mod server;
pub mod store;

pub use error::{ParseError, ParseErrorKind, Result, SieveError};
