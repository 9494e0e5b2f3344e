use stringsieve::SieveError;
use stringsieve::predicate::{Conflict, Criterion, CriterionKind, FilterParams, Predicate, matches};
use stringsieve::properties::compute;

fn params(pairs: &[(&str, &str)]) -> FilterParams {
    let mut p = FilterParams::default();
    for (name, value) in pairs {
        let value = Some(value.to_string());
        match *name {
            "is_palindrome" => p.is_palindrome = value,
            "min_length" => p.min_length = value,
            "max_length" => p.max_length = value,
            "word_count" => p.word_count = value,
            "contains_character" => p.contains_character = value,
            other => panic!("unknown parameter {other}"),
        }
    }
    p
}

fn invalid_parameter_name(err: SieveError) -> String {
    match err {
        SieveError::InvalidParameter { name, .. } => name,
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
}

#[test]
fn madam_examples() {
    let madam = compute("madam");
    let p = Predicate::from_criteria([Criterion::IsPalindrome(true), Criterion::WordCount(1)]).unwrap();
    assert!(matches(&madam, &p));
    let p = Predicate::from_criteria([Criterion::MinLength(10)]).unwrap();
    assert!(!matches(&madam, &p));
}

#[test]
fn empty_predicate_matches_everything() {
    let p = Predicate::new();
    assert!(p.is_empty());
    for s in ["", "a", "hello world"] {
        assert!(matches(&compute(s), &p));
    }
}

#[test]
fn length_bounds_are_inclusive() {
    let props = compute("hello");
    assert!(matches(&props, &Predicate::from_criteria([Criterion::MinLength(5)]).unwrap()));
    assert!(matches(&props, &Predicate::from_criteria([Criterion::MaxLength(5)]).unwrap()));
    assert!(!matches(&props, &Predicate::from_criteria([Criterion::MinLength(6)]).unwrap()));
    assert!(!matches(&props, &Predicate::from_criteria([Criterion::MaxLength(4)]).unwrap()));
}

#[test]
fn contains_character_is_case_sensitive() {
    let props = compute("Hello");
    assert!(matches(&props, &Predicate::from_criteria([Criterion::ContainsCharacter('H')]).unwrap()));
    assert!(!matches(&props, &Predicate::from_criteria([Criterion::ContainsCharacter('h')]).unwrap()));
    assert!(!matches(&props, &Predicate::from_criteria([Criterion::ContainsCharacter('z')]).unwrap()));
}

#[test]
fn same_criterion_twice_is_deduplicated() {
    let mut p = Predicate::new();
    assert_eq!(p.insert(Criterion::WordCount(2)), Ok(true));
    assert_eq!(p.insert(Criterion::WordCount(2)), Ok(false));
    assert_eq!(p.criteria(), vec![Criterion::WordCount(2)]);
}

#[test]
fn same_kind_different_value_conflicts() {
    let mut p = Predicate::new();
    p.insert(Criterion::MinLength(10)).unwrap();
    let conflict = p.insert(Criterion::MinLength(20)).unwrap_err();
    assert_eq!(conflict, Conflict { existing: Criterion::MinLength(10), incoming: Criterion::MinLength(20) });
    // the earlier value is kept
    assert_eq!(p.get(CriterionKind::MinLength), Some(Criterion::MinLength(10)));

    let mut p = Predicate::new();
    p.insert(Criterion::IsPalindrome(true)).unwrap();
    assert!(p.insert(Criterion::IsPalindrome(false)).is_err());
}

#[test]
fn empty_length_range_conflicts() {
    let err = Predicate::from_criteria([Criterion::MinLength(10), Criterion::MaxLength(5)]).unwrap_err();
    assert_eq!(err.existing, Criterion::MinLength(10));
    assert_eq!(err.incoming, Criterion::MaxLength(5));
    assert!(Predicate::from_criteria([Criterion::MinLength(5), Criterion::MaxLength(5)]).is_ok());
}

#[test]
fn criteria_come_out_in_kind_order() {
    let p = Predicate::from_criteria([
        Criterion::ContainsCharacter('a'),
        Criterion::WordCount(1),
        Criterion::IsPalindrome(true),
    ])
    .unwrap();
    assert_eq!(
        p.criteria(),
        vec![Criterion::IsPalindrome(true), Criterion::WordCount(1), Criterion::ContainsCharacter('a')]
    );
}

#[test]
fn predicate_echo_uses_parameter_names() {
    let p = Predicate::from_criteria([Criterion::MinLength(11), Criterion::ContainsCharacter('z')]).unwrap();
    let echo = serde_json::to_value(&p).unwrap();
    assert_eq!(echo, serde_json::json!({ "min_length": 11, "contains_character": "z" }));
}

#[test]
fn structured_parameters_build_predicate() {
    let p = params(&[
        ("is_palindrome", "true"),
        ("min_length", "3"),
        ("max_length", "10"),
        ("word_count", "1"),
        ("contains_character", "a"),
    ])
    .to_predicate()
    .unwrap();
    assert_eq!(p.len(), 5);
    assert!(p.matches(&compute("racecar")));
    assert!(!p.matches(&compute("level")));
    assert!(FilterParams::default().to_predicate().unwrap().is_empty());
}

#[test]
fn structured_parameters_reject_bad_input() {
    let cases = [
        ("is_palindrome", "yes"),
        ("is_palindrome", "True"),
        ("is_palindrome", "1"),
        ("min_length", "-1"),
        ("min_length", "+5"),
        ("max_length", ""),
        ("max_length", "ten"),
        ("word_count", "1.5"),
        ("contains_character", "ab"),
        ("contains_character", ""),
    ];
    for (name, value) in cases {
        let err = params(&[(name, value)]).to_predicate().unwrap_err();
        assert_eq!(invalid_parameter_name(err), name, "{name}={value}");
    }
}

#[test]
fn structured_counts_are_plain_digits() {
    let p = params(&[("min_length", "05"), ("word_count", "2")]).to_predicate().unwrap();
    assert_eq!(p.criteria(), vec![Criterion::MinLength(5), Criterion::WordCount(2)]);
}

#[test]
fn structured_parameters_reject_empty_range() {
    let err = params(&[("min_length", "10"), ("max_length", "5")]).to_predicate().unwrap_err();
    assert_eq!(invalid_parameter_name(err), "min_length");
}

#[test]
fn structured_contains_character_keeps_case_and_spaces() {
    let p = params(&[("contains_character", " ")]).to_predicate().unwrap();
    assert!(p.matches(&compute("two words")));
    assert!(!p.matches(&compute("one")));
    let p = params(&[("contains_character", "Z")]).to_predicate().unwrap();
    assert_eq!(p.criteria(), vec![Criterion::ContainsCharacter('Z')]);
}
