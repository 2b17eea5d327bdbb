use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use spansort::patterns;

#[inline(never)]
fn bench_sort(
    c: &mut Criterion,
    test_size: usize,
    pattern_name: &str,
    pattern_provider: &fn(usize) -> Vec<i32>,
    bench_name: &str,
    sort_func: impl Fn(&mut [i32]),
) {
    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(
        &format!("{bench_name}-{pattern_name}-{test_size}"),
        |b| {
            b.iter_batched(
                || pattern_provider(test_size),
                |mut test_data| sort_func(black_box(test_data.as_mut_slice())),
                batch_size,
            )
        },
    );
}

fn saw_mixed_log(size: usize) -> Vec<i32> {
    patterns::saw_mixed(size, ((size as f64).log2().round()) as usize)
}

fn random_dense(size: usize) -> Vec<i32> {
    if size > 3 {
        patterns::random_uniform(size, 0..=9)
    } else {
        patterns::random(size)
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    // Distinct values on every iteration, a fixed seed would benchmark one
    // specific input shape instance.
    patterns::disable_fixed_seed();

    let pattern_providers: Vec<(&str, fn(usize) -> Vec<i32>)> = vec![
        ("random", patterns::random),
        ("random_dense", random_dense),
        ("ascending", patterns::ascending),
        ("descending", patterns::descending),
        ("saw_mixed", saw_mixed_log),
    ];

    for test_size in [16usize, 256, 4_096, 65_536, 1_000_000] {
        for (pattern_name, pattern_provider) in &pattern_providers {
            bench_sort(
                c,
                test_size,
                pattern_name,
                pattern_provider,
                "spansort_stable",
                |v| spansort::sort(v),
            );

            bench_sort(
                c,
                test_size,
                pattern_name,
                pattern_provider,
                "spansort_unstable",
                |v| spansort::sort_unstable(v),
            );

            bench_sort(
                c,
                test_size,
                pattern_name,
                pattern_provider,
                "rust_std_stable",
                |v| v.sort(),
            );

            bench_sort(
                c,
                test_size,
                pattern_name,
                pattern_provider,
                "rust_std_unstable",
                |v| v.sort_unstable(),
            );
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
