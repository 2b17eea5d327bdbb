//! C entry points for the sorts.
//!
//! Per supported element type there are four unmangled functions:
//! `sort_stable_<t>`, `sort_stable_<t>_by`, `sort_unstable_<t>` and
//! `sort_unstable_<t>_by`. The `_by` variants take a three-way-boolean
//! predicate `bool less(const T& a, const T& b, uint8_t* ctx)` plus an opaque
//! context pointer that is handed through unchanged on every comparison, so a
//! host can close over arbitrary state without this library knowing its
//! shape.
//!
//! The caller contract is not validated, in keeping with a zero-overhead
//! primitive: `data` must be valid for reads and writes of `len` elements and
//! not aliased by anything else for the duration of the call, the predicate
//! must encode a strict weak ordering and must not unwind. A null `data` is
//! tolerated only for `len == 0`, which is a no-op that never dereferences
//! the pointer. Nothing is returned and nothing is reported; on completion
//! the buffer holds a permutation of its former values satisfying the
//! requested ordering.

use std::slice;

/// Comparison predicate of the `_by` entry points. Returns true iff `a`
/// strictly precedes `b`. `ctx` is the pointer the host passed to the entry
/// point, forwarded verbatim.
pub type LessFn<T> = unsafe extern "C" fn(a: &T, b: &T, ctx: *mut u8) -> bool;

/// Binds a raw predicate and its opaque context into a single callable
/// conforming to the predicate shape the sort drivers expect. Both are
/// captured by value once per sort call; invoking the result performs no
/// allocation and no indirection beyond the predicate call itself.
#[inline]
fn adapt<T>(cmp_fn: LessFn<T>, ctx: *mut u8) -> impl FnMut(&T, &T) -> bool {
    move |a, b| unsafe { cmp_fn(a, b, ctx) }
}

/// Reconstitutes the caller's buffer as a slice borrowed for the current
/// call.
///
/// # Safety
///
/// `data` must be valid for reads and writes of `len` elements, initialized,
/// and free of concurrent aliasing for the duration of the borrow. Null is
/// accepted only together with `len == 0`.
#[inline]
unsafe fn raw_slice<'a, T>(data: *mut T, len: usize) -> &'a mut [T] {
    if len == 0 {
        return &mut [];
    }

    slice::from_raw_parts_mut(data, len)
}

macro_rules! ffi_sort_impl {
    ($t:ident) => {
        paste::paste! {
            #[doc = concat!("Natural-order stable sort of `data[0..len]`, `", stringify!($t), "` elements.")]
            #[no_mangle]
            pub unsafe extern "C" fn [<sort_stable_ $t>](data: *mut $t, len: usize) {
                crate::sort(raw_slice(data, len));
            }

            #[doc = concat!("Stable sort of `data[0..len]` ordered by `cmp_fn`, `", stringify!($t), "` elements.")]
            #[no_mangle]
            pub unsafe extern "C" fn [<sort_stable_ $t _by>](
                data: *mut $t,
                len: usize,
                cmp_fn: LessFn<$t>,
                ctx: *mut u8,
            ) {
                crate::stable_sort(raw_slice(data, len), adapt(cmp_fn, ctx));
            }

            #[doc = concat!("Natural-order unstable sort of `data[0..len]`, `", stringify!($t), "` elements.")]
            #[no_mangle]
            pub unsafe extern "C" fn [<sort_unstable_ $t>](data: *mut $t, len: usize) {
                crate::sort_unstable(raw_slice(data, len));
            }

            #[doc = concat!("Unstable sort of `data[0..len]` ordered by `cmp_fn`, `", stringify!($t), "` elements.")]
            #[no_mangle]
            pub unsafe extern "C" fn [<sort_unstable_ $t _by>](
                data: *mut $t,
                len: usize,
                cmp_fn: LessFn<$t>,
                ctx: *mut u8,
            ) {
                crate::unstable_sort(raw_slice(data, len), adapt(cmp_fn, ctx));
            }
        }
    };
}

ffi_sort_impl!(i32);
ffi_sort_impl!(u64);
