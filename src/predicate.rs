//! Structured filter criteria and their evaluation against property sets.
//!
//! A [`Predicate`] is a conjunction of [`Criterion`] values, at most one per
//! [`CriterionKind`]. Inserting the same criterion twice is a no-op, while
//! inserting a different value of an already present kind is reported as a
//! [`Conflict`] instead of silently replacing the earlier one. A predicate
//! whose minimum length exceeds its maximum length is likewise a conflict,
//! detected by [`Predicate::ensure_satisfiable`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SieveError};
use crate::properties::PropertySet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CriterionKind {
    IsPalindrome,
    MinLength,
    MaxLength,
    WordCount,
    ContainsCharacter,
}

impl CriterionKind {
    /// The name used for this kind in query parameters and predicate echoes.
    pub fn parameter(&self) -> &'static str {
        match self {
            CriterionKind::IsPalindrome => "is_palindrome",
            CriterionKind::MinLength => "min_length",
            CriterionKind::MaxLength => "max_length",
            CriterionKind::WordCount => "word_count",
            CriterionKind::ContainsCharacter => "contains_character",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    IsPalindrome(bool),
    MinLength(usize),
    MaxLength(usize),
    WordCount(usize),
    ContainsCharacter(char),
}

impl Criterion {
    pub fn kind(&self) -> CriterionKind {
        match self {
            Criterion::IsPalindrome(_) => CriterionKind::IsPalindrome,
            Criterion::MinLength(_) => CriterionKind::MinLength,
            Criterion::MaxLength(_) => CriterionKind::MaxLength,
            Criterion::WordCount(_) => CriterionKind::WordCount,
            Criterion::ContainsCharacter(_) => CriterionKind::ContainsCharacter,
        }
    }
    pub fn holds(&self, props: &PropertySet) -> bool {
        match *self {
            Criterion::IsPalindrome(expected) => props.is_palindrome == expected,
            Criterion::MinLength(min) => props.length >= min,
            Criterion::MaxLength(max) => props.length <= max,
            Criterion::WordCount(count) => props.word_count == count,
            Criterion::ContainsCharacter(c) => props.contains_character(c),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().parameter();
        match self {
            Criterion::IsPalindrome(b) => write!(f, "{name}={b}"),
            Criterion::MinLength(n) | Criterion::MaxLength(n) | Criterion::WordCount(n) => {
                write!(f, "{name}={n}")
            }
            Criterion::ContainsCharacter(c) => write!(f, "{name}={c:?}"),
        }
    }
}

/// Two criteria that cannot hold at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Conflict {
    pub existing: Criterion,
    pub incoming: Criterion,
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is incompatible with {}", self.incoming, self.existing)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Predicate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    is_palindrome: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    word_count: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contains_character: Option<char>,
}

impl Predicate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a predicate from criteria, failing on the first conflict.
    pub fn from_criteria<I>(criteria: I) -> std::result::Result<Self, Conflict>
    where
        I: IntoIterator<Item = Criterion>,
    {
        let mut predicate = Self::new();
        for criterion in criteria {
            predicate.insert(criterion)?;
        }
        predicate.ensure_satisfiable()?;
        Ok(predicate)
    }

    /// Adds a criterion. Returns `Ok(false)` when the very same criterion was
    /// already present and `Err` when a different value of its kind was.
    pub fn insert(&mut self, criterion: Criterion) -> std::result::Result<bool, Conflict> {
        if let Some(existing) = self.get(criterion.kind()) {
            return if existing == criterion {
                Ok(false)
            } else {
                Err(Conflict { existing, incoming: criterion })
            };
        }
        match criterion {
            Criterion::IsPalindrome(b) => self.is_palindrome = Some(b),
            Criterion::MinLength(n) => self.min_length = Some(n),
            Criterion::MaxLength(n) => self.max_length = Some(n),
            Criterion::WordCount(n) => self.word_count = Some(n),
            Criterion::ContainsCharacter(c) => self.contains_character = Some(c),
        }
        Ok(true)
    }

    pub fn get(&self, kind: CriterionKind) -> Option<Criterion> {
        match kind {
            CriterionKind::IsPalindrome => self.is_palindrome.map(Criterion::IsPalindrome),
            CriterionKind::MinLength => self.min_length.map(Criterion::MinLength),
            CriterionKind::MaxLength => self.max_length.map(Criterion::MaxLength),
            CriterionKind::WordCount => self.word_count.map(Criterion::WordCount),
            CriterionKind::ContainsCharacter => self.contains_character.map(Criterion::ContainsCharacter),
        }
    }

    /// Rejects an empty length range.
    pub fn ensure_satisfiable(&self) -> std::result::Result<(), Conflict> {
        match (self.min_length, self.max_length) {
            (Some(min), Some(max)) if min > max => Err(Conflict {
                existing: Criterion::MinLength(min),
                incoming: Criterion::MaxLength(max),
            }),
            _ => Ok(()),
        }
    }

    /// The criteria in a fixed kind order.
    pub fn criteria(&self) -> Vec<Criterion> {
        [
            CriterionKind::IsPalindrome,
            CriterionKind::MinLength,
            CriterionKind::MaxLength,
            CriterionKind::WordCount,
            CriterionKind::ContainsCharacter,
        ]
        .into_iter()
        .filter_map(|kind| self.get(kind))
        .collect()
    }

    pub fn len(&self) -> usize {
        self.criteria().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn matches(&self, props: &PropertySet) -> bool {
        self.criteria().iter().all(|criterion| criterion.holds(props))
    }
}

/// True iff every criterion of `predicate` holds for `props`.
pub fn matches(props: &PropertySet, predicate: &Predicate) -> bool {
    predicate.matches(props)
}

/// Raw structured filter parameters as they arrive from a query string.
///
/// Every field is kept as text so that type errors surface as
/// [`SieveError::InvalidParameter`] rather than as a transport rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
    pub is_palindrome: Option<String>,
    pub min_length: Option<String>,
    pub max_length: Option<String>,
    pub word_count: Option<String>,
    pub contains_character: Option<String>,
}

impl FilterParams {
    pub fn to_predicate(&self) -> Result<Predicate> {
        let mut criteria = Vec::new();
        if let Some(raw) = &self.is_palindrome {
            criteria.push(Criterion::IsPalindrome(parse_bool("is_palindrome", raw)?));
        }
        if let Some(raw) = &self.min_length {
            criteria.push(Criterion::MinLength(parse_count("min_length", raw)?));
        }
        if let Some(raw) = &self.max_length {
            criteria.push(Criterion::MaxLength(parse_count("max_length", raw)?));
        }
        if let Some(raw) = &self.word_count {
            criteria.push(Criterion::WordCount(parse_count("word_count", raw)?));
        }
        if let Some(raw) = &self.contains_character {
            criteria.push(Criterion::ContainsCharacter(parse_character("contains_character", raw)?));
        }
        // one criterion per kind, so only the range check can fail here
        Predicate::from_criteria(criteria).map_err(|conflict| {
            SieveError::invalid_parameter("min_length", format!("must not exceed max_length ({conflict})"))
        })
    }
}

fn parse_bool(name: &str, raw: &str) -> Result<bool> {
    match raw.trim() {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(SieveError::invalid_parameter(name, format!("expected true or false, got '{other}'"))),
    }
}

fn parse_count(name: &str, raw: &str) -> Result<usize> {
    let raw = raw.trim();
    if raw.starts_with('-') && raw[1..].chars().all(|c| c.is_ascii_digit()) && raw.len() > 1 {
        return Err(SieveError::invalid_parameter(name, format!("must be non-negative, got {raw}")));
    }
    let invalid = || SieveError::invalid_parameter(name, format!("expected a non-negative integer, got '{raw}'"));
    // plain decimal digits only, no sign
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid());
    }
    raw.parse::<usize>().map_err(|_| invalid())
}

fn parse_character(name: &str, raw: &str) -> Result<char> {
    let mut chars = raw.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        (None, _) => Err(SieveError::invalid_parameter(name, "must be exactly one character, got nothing")),
        (Some(_), Some(_)) => Err(SieveError::invalid_parameter(
            name,
            format!("must be exactly one character, got '{raw}'"),
        )),
    }
}
