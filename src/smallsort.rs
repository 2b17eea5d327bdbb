//! Insertion sort, shared by the stable and unstable drivers for short
//! slices and short runs.

use std::mem::ManuallyDrop;
use std::ptr;

/// Sort `v` assuming `v[..offset]` is already sorted.
pub fn insertion_sort_shift_left<T, F>(v: &mut [T], offset: usize, is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    let len = v.len();

    // This would be a logic bug in other code.
    debug_assert!(offset != 0 && offset <= len);

    // Shift each element of the unsorted region v[i..] as far left as is needed to make v sorted.
    for i in offset..len {
        insert_tail(&mut v[..=i], is_less);
    }
}

/// Inserts `v[v.len() - 1]` into the sorted prefix `v[..v.len() - 1]`.
fn insert_tail<T, F>(v: &mut [T], is_less: &mut F)
where
    F: FnMut(&T, &T) -> bool,
{
    debug_assert!(v.len() >= 2);

    let v_base = v.as_mut_ptr();
    let i = v.len() - 1;

    // SAFETY: The caller guarantees `v.len()` is at least 2, so i and i - 1 are in bounds. The
    // gap guard below keeps every element of `v` alive exactly once, even if `is_less` panics.
    unsafe {
        let v_i = v_base.add(i);

        // It's important that we use v_i here. If this check is positive and we continue,
        // we want to make sure that no other copy of the value was seen by is_less.
        // Otherwise we would have to copy it back.
        if is_less(&*v_i, &*v_i.sub(1)) {
            // Intermediate state of the insertion process is always tracked by `gap`, which
            // serves two purposes:
            // 1. Protects integrity of `v` from panics in `is_less`.
            // 2. Fills the remaining gap in `v` in the end.
            //
            // If `is_less` panics at any point during the process, `gap` will get dropped and
            // fill the gap in `v` with the temporary, thus ensuring that `v` still holds every
            // object it initially held exactly once.
            let mut gap = GapGuard {
                pos: v_i.sub(1),
                value: ManuallyDrop::new(ptr::read(v_i)),
            };
            ptr::copy_nonoverlapping(gap.pos, v_i, 1);

            // SAFETY: We know i is at least 1.
            for j in (0..(i - 1)).rev() {
                let v_j = v_base.add(j);
                if !is_less(&*gap.value, &*v_j) {
                    break;
                }

                ptr::copy_nonoverlapping(v_j, gap.pos, 1);
                gap.pos = v_j;
            }
            // `gap` gets dropped and thus copies the temporary into the remaining gap in `v`.
        }
    }
}

/// When dropped, copies `value` into `pos`.
struct GapGuard<T> {
    pos: *mut T,
    value: ManuallyDrop<T>,
}

impl<T> Drop for GapGuard<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::copy_nonoverlapping(&*self.value, self.pos, 1);
        }
    }
}
