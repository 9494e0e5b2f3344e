//! Rule based translation of free text queries into a [`Predicate`].
//!
//! A query is first normalized (lowercased, trimmed, whitespace collapsed)
//! and then scanned by every [`Rule`] of a [`RuleCatalog`], in catalog order.
//! Each rule pairs a regular expression with a builder that turns its
//! captures into criteria. A rule claims the text it matched, and later rules
//! skip matches overlapping a claimed span; this is what keeps
//! "non-palindromic" from also reading as "palindromic", and "one word" from
//! being picked up a second time by the generic "N words" rule.
//!
//! The criteria of all matches are merged into one conjunction. Text that no
//! rule recognizes is ignored, but a query where nothing at all is recognized
//! fails with [`ParseError::Unrecognized`], and contradicting criteria fail
//! with [`ParseError::Conflict`].
//!
//! Some phrases are understood but have no criterion to express them, such
//! as word count ranges ("more than 2 words") or excluded letters ("without
//! the letter a"). Unsupported rules claim these ahead of the rules that
//! would misread them, and the query fails with [`ParseError::Unsupported`].

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::{Captures, Regex};
use tracing::debug;

use crate::error::ParseError;
use crate::predicate::{Criterion, CriterionKind, Predicate};

// Unit words accepted after a length.
const UNIT: &str = r"(?:characters?|chars?|letters?)";

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
    static ref WORD_RANGE: Regex = Regex::new(
        r"\b(?:(?:longer|more|greater|larger|fewer|less|shorter|smaller)\s+than\s+\w+|at\s+(?:least|most)\s+\w+|(?:over|under|up\s+to)\s+\w+|between\s+\w+\s+and\s+\w+|\w+\s+or\s+(?:more|fewer|less))[\s-]words?\b"
    )
    .unwrap();
    static ref NOT_LETTER: Regex = Regex::new(
        r#"\b(?:(?:not|never|doesn't|don't|does\s+not|do\s+not)\s+(?:contain(?:s|ing)?|ha(?:ve|ving|s)|include[sd]?|including)|without|lacking)\s+(?:the\s+first\s+vowel\b|(?:the\s+|an?\s+)?(?:letter|character|char)\s+['"]?[^\s'"]['"]?(?:[\s.,;!?]|$))"#
    )
    .unwrap();
    static ref NOT_PALINDROME: Regex =
        Regex::new(r"\b(?:not|non|isn't|aren't)(?:\s+|-)?(?:an?\s+)?palindrom(?:es?|ic)\b").unwrap();
    static ref PALINDROME: Regex = Regex::new(r"\bpalindrom(?:es?|ic)\b").unwrap();
    static ref LENGTH_GREATER: Regex =
        Regex::new(r"\blength\s+(?:is\s+)?(?:greater|more|longer|larger)\s+than\s+(\w+)").unwrap();
    static ref LENGTH_LESS: Regex =
        Regex::new(r"\blength\s+(?:is\s+)?(?:less|fewer|shorter|smaller)\s+than\s+(\w+)").unwrap();
    static ref LONGER_THAN: Regex =
        Regex::new(r"\blonger\s+than\s+(\w+)(?:[\s-]+(characters?|chars?|letters?|words?))?\b").unwrap();
    static ref MORE_THAN: Regex = Regex::new(&format!(r"\bmore\s+than\s+(\w+)\s+{UNIT}\b")).unwrap();
    static ref SHORTER_THAN: Regex =
        Regex::new(r"\bshorter\s+than\s+(\w+)(?:[\s-]+(characters?|chars?|letters?|words?))?\b").unwrap();
    static ref FEWER_THAN: Regex = Regex::new(&format!(r"\b(?:fewer|less)\s+than\s+(\w+)\s+{UNIT}\b")).unwrap();
    static ref AT_LEAST: Regex = Regex::new(&format!(r"\bat\s+least\s+(\w+)\s+{UNIT}\b")).unwrap();
    static ref AT_MOST: Regex = Regex::new(&format!(r"\bat\s+most\s+(\w+)\s+{UNIT}\b")).unwrap();
    static ref EXACTLY: Regex = Regex::new(&format!(r"\bexactly\s+(\w+)\s+{UNIT}\b")).unwrap();
    static ref BETWEEN: Regex = Regex::new(&format!(r"\bbetween\s+(\w+)\s+and\s+(\w+)\s+{UNIT}\b")).unwrap();
    static ref SINGLE_WORD: Regex = Regex::new(r"\b(?:single|one)[\s-]word\b").unwrap();
    static ref N_WORDS: Regex = Regex::new(r"\b(\w+)[\s-]words?\b").unwrap();
    static ref FIRST_VOWEL: Regex = Regex::new(r"\bcontain(?:s|ing)?\s+the\s+first\s+vowel\b").unwrap();
    static ref LETTER: Regex = Regex::new(
        r#"\b(?:contain(?:s|ing)?|with|having|has|include[sd]?|including)\s+(?:the\s+|an?\s+)?(?:letter|character|char)\s+['"]?([^\s'"])['"]?(?:[\s.,;!?]|$)"#
    )
    .unwrap();
}

const SPELLED_NUMBERS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten", "eleven", "twelve",
    "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen", "nineteen", "twenty",
];

/// Lowercases, trims and collapses runs of whitespace to single spaces.
pub fn normalize(query: &str) -> String {
    WHITESPACE.replace_all(query.trim(), " ").to_lowercase()
}

/// Digits or a spelled out number up to twenty.
pub fn parse_number(token: &str) -> Option<usize> {
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.parse().ok();
    }
    SPELLED_NUMBERS.iter().position(|word| *word == token)
}

fn number(captures: &Captures, group: usize) -> Option<usize> {
    parse_number(captures.get(group)?.as_str())
}

type Builder = fn(&Captures) -> Option<Vec<Criterion>>;

/// One recognized phrase pattern and the criteria it yields.
///
/// A builder returning `None` means the phrase looked right but its number
/// did not parse, in which case the match is ignored. An empty list marks a
/// phrase that is understood but cannot be expressed as a criterion.
#[derive(Debug, Clone)]
pub struct Rule {
    name: &'static str,
    pattern: Regex,
    build: Builder,
}

impl Rule {
    pub fn new(name: &'static str, pattern: Regex, build: Builder) -> Self {
        Self { name, pattern, build }
    }
    /// A rule claiming phrases that no criterion can express.
    pub fn unsupported(name: &'static str, pattern: Regex) -> Self {
        Self::new(name, pattern, |_| Some(Vec::new()))
    }
    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// An ordered, immutable list of rules. Earlier rules take precedence over
/// later ones where their matches overlap.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    rules: Vec<Rule>,
}

impl RuleCatalog {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn standard() -> Self {
        let rules = vec![
            Rule::new("not palindrome", NOT_PALINDROME.clone(), |_| Some(vec![Criterion::IsPalindrome(false)])),
            Rule::new("palindrome", PALINDROME.clone(), |_| Some(vec![Criterion::IsPalindrome(true)])),
            Rule::unsupported("word count range", WORD_RANGE.clone()),
            Rule::new("length greater than", LENGTH_GREATER.clone(), longer),
            Rule::new("length less than", LENGTH_LESS.clone(), shorter),
            Rule::new("longer than", LONGER_THAN.clone(), longer),
            Rule::new("more than", MORE_THAN.clone(), longer),
            Rule::new("shorter than", SHORTER_THAN.clone(), shorter),
            Rule::new("fewer than", FEWER_THAN.clone(), shorter),
            Rule::new("at least", AT_LEAST.clone(), |c| Some(vec![Criterion::MinLength(number(c, 1)?)])),
            Rule::new("at most", AT_MOST.clone(), |c| Some(vec![Criterion::MaxLength(number(c, 1)?)])),
            Rule::new("exactly", EXACTLY.clone(), |c| {
                let n = number(c, 1)?;
                Some(vec![Criterion::MinLength(n), Criterion::MaxLength(n)])
            }),
            Rule::new("between", BETWEEN.clone(), |c| {
                Some(vec![Criterion::MinLength(number(c, 1)?), Criterion::MaxLength(number(c, 2)?)])
            }),
            Rule::new("single word", SINGLE_WORD.clone(), |_| Some(vec![Criterion::WordCount(1)])),
            Rule::new("words", N_WORDS.clone(), |c| Some(vec![Criterion::WordCount(number(c, 1)?)])),
            Rule::unsupported("excluded letter", NOT_LETTER.clone()),
            Rule::new("first vowel", FIRST_VOWEL.clone(), |_| Some(vec![Criterion::ContainsCharacter('a')])),
            Rule::new("letter", LETTER.clone(), |c| {
                let mut chars = c.get(1)?.as_str().chars();
                Some(vec![Criterion::ContainsCharacter(chars.next()?)])
            }),
        ];
        Self::new(rules)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

// "longer than 3 words" bounds words, not characters
fn counts_characters(c: &Captures) -> bool {
    c.get(2).is_none_or(|unit| !unit.as_str().starts_with("word"))
}

fn longer(c: &Captures) -> Option<Vec<Criterion>> {
    if !counts_characters(c) {
        return None;
    }
    Some(vec![Criterion::MinLength(number(c, 1)?.checked_add(1)?)])
}

// "shorter than 0" has no representable bound and is left unrecognized
fn shorter(c: &Captures) -> Option<Vec<Criterion>> {
    if !counts_characters(c) {
        return None;
    }
    Some(vec![Criterion::MaxLength(number(c, 1)?.checked_sub(1)?)])
}

/// A phrase recognized in a query together with what it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recognized {
    pub rule: &'static str,
    pub phrase: String,
    pub criteria: Vec<Criterion>,
}

impl Recognized {
    pub fn is_unsupported(&self) -> bool {
        self.criteria.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryParser {
    catalog: RuleCatalog,
}

impl QueryParser {
    pub fn new(catalog: RuleCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Every non-overlapping phrase the catalog recognizes in the normalized
    /// query, in catalog order.
    pub fn recognize(&self, normalized: &str) -> Vec<Recognized> {
        let mut claimed: Vec<(usize, usize)> = Vec::new();
        let mut recognized = Vec::new();
        for rule in self.catalog.iter() {
            for captures in rule.pattern.captures_iter(normalized) {
                let Some(whole) = captures.get(0) else { continue };
                let (start, end) = (whole.start(), whole.end());
                if claimed.iter().any(|&(s, e)| start < e && s < end) {
                    continue;
                }
                let Some(criteria) = (rule.build)(&captures) else {
                    debug!(rule = rule.name(), phrase = whole.as_str(), "phrase ignored");
                    continue;
                };
                claimed.push((start, end));
                recognized.push(Recognized { rule: rule.name(), phrase: whole.as_str().trim().to_string(), criteria });
            }
        }
        recognized
    }

    pub fn parse(&self, query: &str) -> Result<Predicate, ParseError> {
        let normalized = normalize(query);
        if normalized.is_empty() {
            return Err(ParseError::Empty);
        }
        let recognized = self.recognize(&normalized);
        if recognized.is_empty() {
            return Err(ParseError::Unrecognized { query: query.to_string() });
        }
        if let Some(found) = recognized.iter().find(|found| found.is_unsupported()) {
            return Err(ParseError::Unsupported { query: query.to_string(), phrase: found.phrase.clone() });
        }
        let mut predicate = Predicate::new();
        let mut sources: BTreeMap<CriterionKind, &str> = BTreeMap::new();
        for found in &recognized {
            debug!(rule = found.rule, phrase = %found.phrase, "phrase recognized");
            for criterion in &found.criteria {
                if let Err(conflict) = predicate.insert(*criterion) {
                    let first = sources.get(&conflict.existing.kind()).copied().unwrap_or_default();
                    return Err(ParseError::Conflict {
                        first: first.to_string(),
                        second: found.phrase.clone(),
                        detail: conflict.to_string(),
                    });
                }
                sources.entry(criterion.kind()).or_insert(found.phrase.as_str());
            }
        }
        if let Err(conflict) = predicate.ensure_satisfiable() {
            let phrase = |kind: CriterionKind| sources.get(&kind).copied().unwrap_or_default().to_string();
            return Err(ParseError::Conflict {
                first: phrase(CriterionKind::MinLength),
                second: phrase(CriterionKind::MaxLength),
                detail: conflict.to_string(),
            });
        }
        Ok(predicate)
    }
}
