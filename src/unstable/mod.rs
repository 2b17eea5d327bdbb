//! Unstable driver: depth-limited quicksort with heapsort fallback.

mod heapsort;
mod quicksort;

use crate::find_streak;
use crate::smallsort::insertion_sort_shift_left;

/// Slices of up to this length get sorted by insertion alone, without any
/// pattern analysis or partitioning.
pub(crate) const MAX_INSERTION: usize = 20;

/// Sorts `v` in place without preserving the order of equal elements.
///
/// Worst-case *O*(*n* \* log(*n*)) comparisons, no heap allocation,
/// *O*(log(*n*)) stack.
pub fn sort<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    if len < 2 {
        // These inputs are always sorted.
        return;
    }

    // This path is critical for very small inputs. Always pick insertion sort for these inputs,
    // without any other analysis.
    if len <= MAX_INSERTION {
        insertion_sort_shift_left(v, 1, is_less);
        return;
    }

    // Already sorted or fully reversed inputs are common enough to deserve a
    // whole-slice check before any partitioning happens.
    let (streak_end, was_reversed) = find_streak(v, is_less);
    if streak_end == len {
        if was_reversed {
            v.reverse();
        }
        return;
    }

    // Limit the number of imbalanced partitions to `2 * floor(log2(len))`.
    // The binary OR by one is used to eliminate the zero-check in the logarithm.
    let limit = 2 * (len | 1).ilog2();

    quicksort::quicksort(v, None, limit, is_less);
}
