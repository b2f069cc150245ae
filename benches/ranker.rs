use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wordle_entropy::{EntropyRanker, Word, WordPool};

/// Deterministic pseudo-words so the benchmark needs no word list on disk.
fn synthetic_pool(count: usize, seed: u64) -> WordPool {
    let mut state = seed;
    (0..count)
        .map(|_| {
            let letters: String = (0..5)
                .map(|_| {
                    state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
                    (b'a' + ((state >> 33) % 26) as u8) as char
                })
                .collect();
            letters.parse::<Word>().unwrap()
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let guesses = synthetic_pool(2000, 1);
    let candidates = synthetic_pool(500, 2);

    let single = EntropyRanker::with_workers(1).unwrap();
    c.bench_function("rank 2000x500 single worker", |b| {
        b.iter(|| single.rank(black_box(&guesses), black_box(&candidates)))
    });

    let all = EntropyRanker::with_workers(num_workers()).unwrap();
    c.bench_function("rank 2000x500 all workers", |b| {
        b.iter(|| all.rank(black_box(&guesses), black_box(&candidates)))
    });
}

fn num_workers() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

criterion_group!(benches, bench_rank);
criterion_main!(benches);
