use criterion::{black_box, criterion_group, criterion_main, Criterion};
use phpup_semver::{Constraint, VersionCollection, VersionNumber};

fn bench_parse(c: &mut Criterion) {
    let inputs = [
        "8.3.2",
        "8.1",
        "PHP 8.2.0-dev",
        "PHP 7.4.33RC5-dev",
        "php@8.2",
        "7.0.33_1",
    ];

    c.bench_function("version_parse", |b| {
        b.iter(|| {
            for input in inputs {
                black_box(VersionNumber::parse(black_box(input)).ok());
            }
        })
    });
}

fn bench_constraint_parse(c: &mut Criterion) {
    let constraints = [
        "*",
        "7.4.*",
        "7.*",
        "8.1.2",
        "^7.2",
        "~7.2.1",
        ">=7.0",
        ">7.0",
        "<=8.0",
        "<8.0",
    ];

    c.bench_function("constraint_parse", |b| {
        b.iter(|| {
            for constraint in constraints {
                black_box(Constraint::parse(black_box(constraint)));
            }
        })
    });
}

fn bench_matching(c: &mut Criterion) {
    let collection = VersionCollection::parse([
        "8.3.2", "8.2.15", "8.1.27", "8.0.30", "7.4.33", "7.3.33", "7.2.34", "7.1.33", "7.0.33",
    ])
    .expect("parse versions");

    let constraints = ["^8.0", "~7.4.1", "7.4.*", ">=8.1", "*"];

    c.bench_function("collection_matching", |b| {
        b.iter(|| {
            for constraint in constraints {
                black_box(collection.matching(black_box(constraint), false));
            }
        })
    });

    c.bench_function("collection_matching_any", |b| {
        b.iter(|| {
            black_box(collection.matching_any(black_box("^7.3|^8.0"), true));
        })
    });
}

criterion_group!(benches, bench_parse, bench_constraint_parse, bench_matching);
criterion_main!(benches);
