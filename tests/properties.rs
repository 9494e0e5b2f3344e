use stringsieve::properties::{compute, is_palindrome};

#[test]
fn empty_string() {
    let props = compute("");
    assert_eq!(props.length, 0);
    assert_eq!(props.word_count, 0);
    assert_eq!(props.unique_characters, 0);
    assert!(props.character_frequency_map.is_empty());
    assert!(props.is_palindrome, "the empty string reads the same both ways");
    // digest of the empty input
    assert_eq!(props.sha256_hash, "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855");
}

#[test]
fn length_and_frequencies_agree() {
    for s in ["a", "hello world", "  spaced  out  ", "ünïcödé ✓✓", "aaa bbb, ccc!"] {
        let props = compute(s);
        assert_eq!(props.length, s.chars().count(), "length of {s:?}");
        assert_eq!(props.character_frequency_map.values().sum::<usize>(), props.length, "frequencies of {s:?}");
        assert_eq!(props.unique_characters, props.character_frequency_map.len());
    }
}

#[test]
fn frequency_map_counts_every_character() {
    let props = compute("a b,a");
    assert_eq!(props.character_frequency_map.get(&'a'), Some(&2));
    assert_eq!(props.character_frequency_map.get(&' '), Some(&2));
    assert_eq!(props.character_frequency_map.get(&','), Some(&1));
    assert_eq!(props.character_frequency_map.get(&'b'), Some(&1));
    assert_eq!(props.unique_characters, 4);
}

#[test]
fn palindromes_are_exact() {
    assert!(compute("x").is_palindrome);
    assert!(compute("madam").is_palindrome);
    assert!(compute("never odd or even".replace(' ', "").as_str()).is_palindrome);
    assert!(compute("a man a").is_palindrome == is_palindrome("a man a"));
    // case and whitespace are significant
    assert!(!compute("Madam").is_palindrome);
    assert!(!compute("nurses run").is_palindrome);
    assert!(compute("ab ba").is_palindrome);
    for s in ["abc", "abba", "été", "ab  a"] {
        let reversed: String = s.chars().rev().collect();
        assert_eq!(compute(s).is_palindrome, reversed == s, "{s:?}");
    }
}

#[test]
fn word_count_splits_on_whitespace_runs() {
    assert_eq!(compute("hello").word_count, 1);
    assert_eq!(compute("hello world").word_count, 2);
    assert_eq!(compute("  hello \t\n world  again ").word_count, 3);
    assert_eq!(compute("   \t\n").word_count, 0);
}

#[test]
fn computation_is_deterministic() {
    let first = compute("the quick brown fox");
    let second = compute("the quick brown fox");
    assert_eq!(first, second);
    assert_eq!(first.sha256_hash, second.sha256_hash);
    assert_eq!(first.sha256_hash.len(), 64);
    assert_ne!(first.sha256_hash, compute("the quick brown fox.").sha256_hash);
}

#[test]
fn known_digest() {
    assert_eq!(compute("abc").sha256_hash, "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
}
