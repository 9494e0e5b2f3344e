// used for the digest of every value
use sha2::{Digest, Sha256};

// ordered so that two computations of the same value serialize identically
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Properties derived from a string value.
///
/// A `PropertySet` is a pure function of the value it was computed from:
/// computing it twice yields equal sets, and it is never mutated afterwards.
/// Characters are Unicode scalar values (`char`), and no case folding or
/// whitespace normalization is applied anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySet {
    pub length: usize,
    pub is_palindrome: bool,
    pub unique_characters: usize,
    pub word_count: usize,
    pub sha256_hash: String,
    pub character_frequency_map: BTreeMap<char, usize>,
}

impl PropertySet {
    pub fn contains_character(&self, c: char) -> bool {
        self.character_frequency_map.get(&c).is_some_and(|n| *n > 0)
    }
}

/// Computes the property set of `value`. Total over all strings.
pub fn compute(value: &str) -> PropertySet {
    let mut character_frequency_map = BTreeMap::new();
    let mut length = 0;
    for c in value.chars() {
        *character_frequency_map.entry(c).or_insert(0) += 1;
        length += 1;
    }
    PropertySet {
        length,
        is_palindrome: is_palindrome(value),
        unique_characters: character_frequency_map.len(),
        word_count: value.split_whitespace().count(),
        sha256_hash: sha256_hex(value),
        character_frequency_map,
    }
}

// exact comparison, "Madam" is not a palindrome but "madam" is
pub fn is_palindrome(value: &str) -> bool {
    value.chars().eq(value.chars().rev())
}

pub fn sha256_hex(value: &str) -> String {
    format!("{:x}", Sha256::digest(value.as_bytes()))
}

