//! Stable and unstable sorting for contiguous sequences of memory.
//!
//! Both sorts come in a natural-order flavor for `T: Ord` and a `_by` flavor
//! that takes a caller-supplied comparison. The same four operations are also
//! exported per fixed-width integer type as C entry points, see [`ffi`].
//!
//! The engine owns no state between calls. A slice is borrowed exclusively
//! for the duration of one call and holds the same multiset of values
//! afterwards, only the arrangement changes.

use std::cmp::Ordering;
use std::mem;

pub mod ffi;
pub mod patterns;

mod smallsort;
mod stable;
mod unstable;

/// Sorts the slice, preserving the order of equal elements.
///
/// This sort is stable, *O*(*n* \* log(*n*)) worst-case, and allocates up to
/// half the slice length of auxiliary memory for the duration of the call.
///
/// The current implementation is a merge sort over detected ascending and
/// descending runs, with short runs extended by insertion sort.
#[inline]
pub fn sort<T>(v: &mut [T])
where
    T: Ord,
{
    stable_sort(v, |a, b| a.lt(b));
}

/// Sorts the slice with a comparator function, preserving the order of equal
/// elements.
///
/// The comparator must define a total order over the elements for the
/// duration of the call. If it does not, the resulting order is unspecified,
/// but the slice still holds every original element exactly once and the call
/// terminates within *O*(*n* \* log(*n*)) comparisons.
#[inline]
pub fn sort_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    stable_sort(v, |a, b| compare(a, b) == Ordering::Less);
}

/// Sorts the slice, but might not preserve the order of equal elements.
///
/// In-place (no heap allocation) and *O*(*n* \* log(*n*)) worst-case. The
/// current implementation is a depth-limited quicksort with a heapsort
/// fallback, insertion sort for short slices.
#[inline]
pub fn sort_unstable<T>(v: &mut [T])
where
    T: Ord,
{
    unstable_sort(v, |a, b| a.lt(b));
}

/// Sorts the slice with a comparator function, but might not preserve the
/// order of equal elements.
///
/// The comparator contract is the same as for [`sort_by`].
#[inline]
pub fn sort_unstable_by<T, F>(v: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    unstable_sort(v, |a, b| compare(a, b) == Ordering::Less);
}

// --- IMPL ---

#[inline]
pub(crate) fn stable_sort<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if mem::size_of::<T>() == 0 {
        // Sorting has no meaningful behavior on zero-sized types. Do nothing.
        return;
    }

    stable::sort(v, &mut is_less);
}

#[inline]
pub(crate) fn unstable_sort<T, F>(v: &mut [T], mut is_less: F)
where
    F: FnMut(&T, &T) -> bool,
{
    if mem::size_of::<T>() == 0 {
        // Sorting has no meaningful behavior on zero-sized types. Do nothing.
        return;
    }

    unstable::sort(v, &mut is_less);
}

/// Finds a streak of presorted elements starting at the beginning of the
/// slice. Returns the first value that is not part of said streak, and a bool
/// denoting whether the streak was reversed. Streaks can be increasing or
/// strictly decreasing.
pub(crate) fn find_streak<T, F>(v: &[T], is_less: &mut F) -> (usize, bool)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    if len < 2 {
        return (len, false);
    }

    let mut end = 2;

    // SAFETY: See below specific.
    unsafe {
        // SAFETY: We checked that len >= 2, so 0 and 1 are valid indices.
        let assume_reverse = is_less(v.get_unchecked(1), v.get_unchecked(0));

        // SAFETY: We know end >= 2 and check end < len.
        // From that follows that accessing v at end and end - 1 is safe.
        if assume_reverse {
            while end < len && is_less(v.get_unchecked(end), v.get_unchecked(end - 1)) {
                end += 1;
            }

            (end, true)
        } else {
            while end < len && !is_less(v.get_unchecked(end), v.get_unchecked(end - 1)) {
                end += 1;
            }
            (end, false)
        }
    }
}
