use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::cmp::Reverse;
use std::collections::HashMap;

// Re-implement the ordering here since it lives in a binary crate
struct Entry {
    filename: String,
    mtime: f64,
}

struct Usage {
    count: u64,
    last_used: f64,
}

fn catalog(n: usize) -> (Vec<Entry>, HashMap<String, Usage>) {
    let entries: Vec<Entry> = (0..n)
        .map(|i| Entry {
            filename: format!("Wallpaper_{:05}.jpg", (i * 7919) % n),
            mtime: 1_700_000_000.0 + ((i * 104_729) % n) as f64,
        })
        .collect();
    let stats = entries
        .iter()
        .step_by(3)
        .enumerate()
        .map(|(i, e)| {
            (
                e.filename.clone(),
                Usage {
                    count: (i % 17) as u64,
                    last_used: 1_710_000_000.0 + i as f64,
                },
            )
        })
        .collect();
    (entries, stats)
}

fn sort_az(entries: &mut [Entry]) {
    entries.sort_by_cached_key(|e| e.filename.to_lowercase());
}

fn sort_newest(entries: &mut [Entry]) {
    entries.sort_by(|a, b| b.mtime.total_cmp(&a.mtime));
}

fn sort_most_used(entries: &mut [Entry], stats: &HashMap<String, Usage>) {
    entries.sort_by_cached_key(|e| Reverse(stats.get(&e.filename).map_or(0, |u| u.count)));
}

fn sort_recent(entries: &mut [Entry], stats: &HashMap<String, Usage>) {
    let last = |e: &Entry| stats.get(&e.filename).map_or(0.0, |u| u.last_used);
    entries.sort_by(|a, b| last(b).total_cmp(&last(a)));
}

fn bench_sort_modes(c: &mut Criterion) {
    let n = 2_000;

    c.bench_function("sort_az_2000", |b| {
        b.iter_batched(
            || catalog(n).0,
            |mut entries| sort_az(black_box(&mut entries)),
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("sort_newest_2000", |b| {
        b.iter_batched(
            || catalog(n).0,
            |mut entries| sort_newest(black_box(&mut entries)),
            criterion::BatchSize::SmallInput,
        )
    });

    let (_, stats) = catalog(n);
    c.bench_function("sort_most_used_2000", |b| {
        b.iter_batched(
            || catalog(n).0,
            |mut entries| sort_most_used(black_box(&mut entries), &stats),
            criterion::BatchSize::SmallInput,
        )
    });

    c.bench_function("sort_recent_2000", |b| {
        b.iter_batched(
            || catalog(n).0,
            |mut entries| sort_recent(black_box(&mut entries), &stats),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_sort_modes);
criterion_main!(benches);
