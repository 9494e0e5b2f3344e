use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use stringsieve::language::QueryParser;
use stringsieve::predicate::FilterParams;
use stringsieve::properties::compute;
use stringsieve::store::{MemoryStore, StringRecord, StringStore};

fn properties(c: &mut Criterion) {
    let sentence = "step on no pets ".repeat(64);
    c.bench_function("compute short", |b| b.iter(|| compute(black_box("racecar"))));
    c.bench_function("compute 1k", |b| b.iter(|| compute(black_box(&sentence))));
}

fn parsing(c: &mut Criterion) {
    let parser = QueryParser::default();
    c.bench_function("parse compositional", |b| {
        b.iter(|| {
            parser.parse(black_box(
                "all single word palindromic strings longer than 5 characters containing the letter a",
            ))
        })
    });
    c.bench_function("parse unrecognized", |b| b.iter(|| parser.parse(black_box("purple monkey dishwasher"))));
}

fn filtering(c: &mut Criterion) {
    let store = MemoryStore::new();
    for i in 0..10_000 {
        let value = if i % 3 == 0 { format!("{i}{}", i.to_string().chars().rev().collect::<String>()) } else { format!("value {i}") };
        let _ = store.insert(StringRecord::new(value));
    }
    let params = FilterParams { is_palindrome: Some("true".into()), min_length: Some("4".into()), ..Default::default() };
    let predicate = params.to_predicate().unwrap();
    c.bench_function("list 10k palindromes", |b| b.iter(|| store.list(black_box(&predicate))));
}

criterion_group!(benches, properties, parsing, filtering);
criterion_main!(benches);
