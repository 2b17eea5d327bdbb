//! Input shapes for testing and benchmarking the sorts. Currently limited to
//! i32 values.

use std::env;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use once_cell::sync::OnceCell;
use rand::prelude::*;
use zipf::ZipfDistribution;

/// Fully random values.
pub fn random(len: usize) -> Vec<i32> {
    let mut rng = new_rng();

    (0..len).map(|_| rng.gen::<i32>()).collect()
}

/// Random values drawn uniformly from `range`. Narrow ranges yield inputs
/// with many duplicates.
pub fn random_uniform<R>(len: usize, range: R) -> Vec<i32>
where
    R: Into<rand::distributions::Uniform<i32>>,
{
    let mut rng = new_rng();
    let dist: rand::distributions::Uniform<i32> = range.into();

    (0..len).map(|_| dist.sample(&mut rng)).collect()
}

/// Random values following a zipfian distribution, few values make up most of
/// the input. https://en.wikipedia.org/wiki/Zipf's_law
pub fn random_zipf(len: usize, exponent: f64) -> Vec<i32> {
    let mut rng = new_rng();
    let dist = ZipfDistribution::new(len, exponent).unwrap();

    (0..len).map(|_| dist.sample(&mut rng) as i32).collect()
}

/// Random values where the first `sorted_percent` percent of the slice is
/// already sorted. Simulates appending new unsorted values to sorted data.
pub fn random_sorted(len: usize, sorted_percent: f64) -> Vec<i32> {
    let mut v = random(len);
    let sorted_len = ((len as f64) * (sorted_percent / 100.0)).round() as usize;

    v[0..sorted_len].sort_unstable();

    v
}

/// A single repeated value.
pub fn all_equal(len: usize) -> Vec<i32> {
    (0..len).map(|_| 66).collect::<Vec<_>>()
}

/// Already sorted.
pub fn ascending(len: usize) -> Vec<i32> {
    (0..len as i32).collect::<Vec<_>>()
}

/// Sorted in reverse.
pub fn descending(len: usize) -> Vec<i32> {
    (0..len as i32).rev().collect::<Vec<_>>()
}

/// `saw_count` consecutive ascending runs of random values.
pub fn ascending_saw(len: usize, saw_count: usize) -> Vec<i32> {
    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);

    for chunk in vals.chunks_mut(chunks_size) {
        chunk.sort_unstable();
    }

    vals
}

/// `saw_count` consecutive descending runs of random values.
pub fn descending_saw(len: usize, saw_count: usize) -> Vec<i32> {
    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);

    for chunk in vals.chunks_mut(chunks_size) {
        chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
    }

    vals
}

/// `saw_count` consecutive runs of random values, each randomly ascending or
/// descending.
pub fn saw_mixed(len: usize, saw_count: usize) -> Vec<i32> {
    if len == 0 {
        return Vec::new();
    }

    let mut vals = random(len);
    let chunks_size = len / saw_count.max(1);
    let saw_directions = random_uniform((len / chunks_size) + 1, 0..=1);

    for (i, chunk) in vals.chunks_mut(chunks_size).enumerate() {
        if saw_directions[i] == 0 {
            chunk.sort_unstable();
        } else {
            chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

/// Ascending first half, descending second half.
pub fn pipe_organ(len: usize) -> Vec<i32> {
    let mut vals = random(len);

    let first_half = &mut vals[0..(len / 2)];
    first_half.sort_unstable();

    let second_half = &mut vals[(len / 2)..len];
    second_half.sort_unstable_by_key(|&e| std::cmp::Reverse(e));

    vals
}

static USE_FIXED_SEED: AtomicBool = AtomicBool::new(true);

/// By default all patterns generated in one process derive from a single
/// seed, so a failure can be reproduced. Benchmarks call this to get fresh
/// values on every call instead.
pub fn disable_fixed_seed() {
    USE_FIXED_SEED.store(false, Ordering::Release);
}

/// The process-wide pattern seed. Set the OVERRIDE_SEED environment variable
/// to replay a previous run.
pub fn random_init_seed() -> u64 {
    if USE_FIXED_SEED.load(Ordering::Acquire) {
        static SEED: OnceCell<u64> = OnceCell::new();

        *SEED.get_or_init(|| {
            env::var("OVERRIDE_SEED")
                .ok()
                .map(|seed| u64::from_str(&seed).unwrap())
                .unwrap_or_else(|| thread_rng().gen())
        })
    } else {
        thread_rng().gen()
    }
}

fn new_rng() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}
