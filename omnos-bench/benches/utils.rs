//! omnos-utils Benchmark Suite
//!
//! Hot paths worth watching:
//!   memo_cache_hit ........ lock + clone of a resolved entry
//!   memo_key_derivation ... canonical JSON encoding of the argument list
//!   shuffle_10k ........... Fisher–Yates over 10 000 elements
//!   merge_values_objects .. shallow overlay of 8 JSON objects
//!   capitalize / paint .... string helpers

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde_json::json;

use omnos_utils::color::Style;
use omnos_utils::memo::cache_key;
use omnos_utils::{capitalize, memo, merge_values, shuffle_with};

/// Benchmark: a call served from a resolved memo entry.
fn bench_memo_hit(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("tokio runtime");
    let lookup = memo(|(user, page): (u64, u32)| async move {
        Ok::<_, String>(format!("user {user} page {page}"))
    });
    rt.block_on(lookup.call((42, 1))).expect("warm cache");

    c.bench_function("memo_cache_hit", |b| {
        b.iter(|| {
            let value = rt.block_on(lookup.call(black_box((42, 1))));
            black_box(value)
        });
    });
}

/// Benchmark: key derivation alone, for a struct-like argument.
fn bench_memo_key(c: &mut Criterion) {
    let args = json!({
        "table": "events",
        "filters": {"kind": "click", "region": "eu", "since": 1_700_000_000},
        "limit": 50,
    });
    c.bench_function("memo_key_derivation", |b| {
        b.iter(|| black_box(cache_key(black_box(&args))));
    });
}

/// Benchmark: shuffling 10k integers with a seeded RNG.
fn bench_shuffle(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(7);
    let items: Vec<u32> = (0..10_000).collect();
    c.bench_function("shuffle_10k", |b| {
        b.iter_batched_ref(
            || items.clone(),
            |v| {
                shuffle_with(v, &mut rng);
            },
            BatchSize::SmallInput,
        );
    });
}

/// Benchmark: overlaying 8 JSON objects of 16 fields each.
fn bench_merge(c: &mut Criterion) {
    let inputs: Vec<_> = (0..8)
        .map(|i| {
            let fields: serde_json::Map<_, _> = (0..16)
                .map(|k| (format!("field_{}", (k + i) % 20), json!(i * k)))
                .collect();
            serde_json::Value::Object(fields)
        })
        .collect();
    c.bench_function("merge_values_objects", |b| {
        b.iter(|| black_box(merge_values(black_box(&inputs))));
    });
}

fn bench_strings(c: &mut Criterion) {
    c.bench_function("capitalize", |b| {
        b.iter(|| black_box(capitalize(black_box("omnos utilities"))));
    });
    c.bench_function("paint_bright_red", |b| {
        b.iter(|| black_box(Style::BrightRed.paint(black_box("warning"))));
    });
}

criterion_group!(
    benches,
    bench_memo_hit,
    bench_memo_key,
    bench_shuffle,
    bench_merge,
    bench_strings,
);
criterion_main!(benches);
