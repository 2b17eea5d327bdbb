//! Quicksort core: pseudo-median pivot selection and Hoare partitioning.

use std::ptr;

use crate::smallsort::insertion_sort_shift_left;
use crate::unstable::heapsort::heapsort;
use crate::unstable::MAX_INSERTION;

/// Once a slice is at least this long, the pivot is the median of three
/// medians-of-three instead of a plain median of three.
const PSEUDO_MEDIAN_THRESHOLD: usize = 128;

/// Sorts `v` recursively.
///
/// If the slice had a predecessor in the original array, it is specified as
/// `ancestor_pivot`.
///
/// `limit` is the number of allowed imbalanced partitions before switching to
/// `heapsort`. If zero, this function will immediately switch to heapsort.
pub fn quicksort<'a, T, F>(
    mut v: &'a mut [T],
    mut ancestor_pivot: Option<&'a T>,
    mut limit: u32,
    is_less: &mut F,
) where
    F: FnMut(&T, &T) -> bool,
{
    loop {
        if v.len() <= MAX_INSERTION {
            if v.len() >= 2 {
                insertion_sort_shift_left(v, 1, is_less);
            }
            return;
        }

        // If too many bad pivot choices were made, simply fall back to heapsort in order to
        // guarantee `O(n * log(n))` worst-case.
        if limit == 0 {
            heapsort(v, is_less);
            return;
        }

        limit -= 1;

        let pivot_pos = choose_pivot(v, is_less);

        // If the chosen pivot is equal to the predecessor, then it's the smallest element in the
        // slice. Partition the slice into elements equal to and elements greater than the pivot.
        // This case is usually hit when the slice contains many duplicate elements.
        if let Some(p) = ancestor_pivot {
            if !is_less(p, &v[pivot_pos]) {
                let num_lt = partition(v, pivot_pos, &mut |a, b| !is_less(b, a));

                // Continue sorting elements greater than the pivot. We know that `num_lt` holds
                // the pivot, so we can continue after it.
                v = &mut v[(num_lt + 1)..];
                ancestor_pivot = None;
                continue;
            }
        }

        let mid = partition(v, pivot_pos, is_less);

        // Split the slice into `left`, `pivot`, and `right`.
        let (left, right) = v.split_at_mut(mid);
        let (pivot, right) = right.split_at_mut(1);
        let pivot = &pivot[0];

        // Recurse into the left side. The recursion depth is bounded by `limit`.
        quicksort(left, ancestor_pivot, limit, is_less);

        // Continue with the right side.
        v = right;
        ancestor_pivot = Some(pivot);
    }
}

/// Moves the pivot to the front, partitions the remaining elements and places
/// the pivot between the two partitions. Returns the number of elements for
/// which `is_less(element, pivot)` held, which is also the final position of
/// the pivot.
fn partition<T, F>(v: &mut [T], pivot_pos: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    // Place the pivot at the beginning of the slice, out of the way of the scan.
    v.swap(0, pivot_pos);
    let (pivot_slice, v_without_pivot) = v.split_at_mut(1);
    let pivot = &pivot_slice[0];

    let num_lt = hoare_partition(v_without_pivot, pivot, is_less);

    // Place the pivot between the two partitions.
    v.swap(0, num_lt);

    num_lt
}

/// Partitions `v` into elements satisfying `is_less(element, pivot)` followed
/// by elements that don't. Returns the number of elements in the first group.
fn hoare_partition<T, F>(v: &mut [T], pivot: &T, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let mut l = 0;
    let mut r = v.len();

    loop {
        // SAFETY: The unsafety below involves indexing an array. For the first one: we already do
        // the bounds checking here with `l < r`. For the second one: we initially have `l == 0`
        // and `r == v.len()` and we checked that `l < r` at every indexing operation.
        unsafe {
            // Find the first element greater than the pivot.
            while l < r && is_less(v.get_unchecked(l), pivot) {
                l += 1;
            }

            // Find the last element lesser than the pivot.
            while l < r && !is_less(v.get_unchecked(r - 1), pivot) {
                r -= 1;
            }

            // Are we done?
            if l >= r {
                break;
            }

            // Swap the found pair of out-of-order elements.
            r -= 1;
            let ptr = v.as_mut_ptr();
            ptr::swap(ptr.add(l), ptr.add(r));
            l += 1;
        }
    }

    l
}

/// Selects a pivot from `v`. Algorithm taken from cpp pdqsort, a median of 3
/// for small slices and a pseudo-median of 9 above `PSEUDO_MEDIAN_THRESHOLD`.
fn choose_pivot<T, F>(v: &[T], is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    // It's a logic bug if this gets called on a slice that would be small-sorted.
    debug_assert!(len > MAX_INSERTION);

    let len_div_8 = len / 8;
    let a = 0;
    let b = len_div_8 * 4;
    let c = len_div_8 * 7;

    if len < PSEUDO_MEDIAN_THRESHOLD {
        median3(v, a, b, c, is_less)
    } else {
        let m_a = median3(v, a, a + 1, a + 2, is_less);
        let m_b = median3(v, b, b + 1, b + 2, is_less);
        let m_c = median3(v, c, c + 1, c + 2, is_less);

        median3(v, m_a, m_b, m_c, is_less)
    }
}

/// Returns the index of the median of `v[a]`, `v[b]` and `v[c]`, using two to
/// three comparisons.
fn median3<T, F>(v: &[T], a: usize, b: usize, c: usize, is_less: &mut F) -> usize
where
    F: FnMut(&T, &T) -> bool,
{
    let (lo, hi) = if is_less(&v[b], &v[a]) { (b, a) } else { (a, b) };

    if is_less(&v[hi], &v[c]) {
        hi
    } else if is_less(&v[c], &v[lo]) {
        lo
    } else {
        c
    }
}
