//! Strict Equality Benchmark
//!
//! Compares the two-tier `strict_equal` against forced branding on wide and
//! deep object types. Every iteration starts from a fresh session so the
//! relation and brand caches are cold.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use typebrand::TypeSession;
use typebrand::solver::{TypeId, strict_equal, strict_equal_using_branding};

/// `{ p0: { a: number; b: string[] }; p1: ...; }` with `width` properties.
fn wide_object(width: usize, readonly: bool) -> String {
    let modifier = if readonly { "readonly " } else { "" };
    let mut source = String::from("{ ");
    for i in 0..width {
        source.push_str(&format!(
            "{modifier}p{i}: {{ a: number; b: string[]; c: [boolean, null] }}; "
        ));
    }
    source.push('}');
    source
}

/// Objects nested `depth` levels deep, with a leaf of type `leaf`.
fn deep_object(depth: usize, leaf: &str) -> String {
    let mut source = leaf.to_string();
    for i in 0..depth {
        source = format!("{{ level{i}: {source}; sibling{i}: number }}");
    }
    source
}

fn pair(left: &str, right: &str) -> (TypeSession, TypeId, TypeId) {
    let session = TypeSession::new();
    let (Ok(l), Ok(r)) = (session.lower(left), session.lower(right)) else {
        panic!("benchmark sources must lower");
    };
    (session, l, r)
}

fn bench_pair(c: &mut Criterion, group: &str, left: &str, right: &str) {
    let mut group = c.benchmark_group(group);
    group.bench_function("strict_equal", |b| {
        b.iter_batched(
            || pair(left, right),
            |(session, l, r)| black_box(strict_equal(session.solver(), l, r)),
            BatchSize::SmallInput,
        );
    });
    group.bench_function("branding_only", |b| {
        b.iter_batched(
            || pair(left, right),
            |(session, l, r)| black_box(strict_equal_using_branding(session.solver(), l, r)),
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

/// Plain structure: the fast path settles without branding.
fn bench_wide_plain(c: &mut Criterion) {
    let source = wide_object(200, false);
    let other = source.replace("p199: { a: number", "p199: { a: 1");
    bench_pair(c, "wide_plain_200", &source, &other);
}

/// Readonly markers force the fast path through to branding.
fn bench_wide_readonly(c: &mut Criterion) {
    let source = wide_object(200, true);
    bench_pair(c, "wide_readonly_200", &source, &wide_object(200, false));
}

fn bench_deep_any(c: &mut Criterion) {
    bench_pair(
        c,
        "deep_any_64",
        &deep_object(64, "any"),
        &deep_object(64, "unknown"),
    );
}

criterion_group!(benches, bench_wide_plain, bench_wide_readonly, bench_deep_any);
criterion_main!(benches);
