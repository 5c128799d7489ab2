//! Stack growth for walks over nested values.
//!
//! Arrays and maps nest without limit, so every recursive walk over a value
//! descends through [`ensure_sufficient_stack`]. On native targets the stack
//! is grown with `stacker` before it runs out; on WASM the closure runs
//! directly.

/// Remaining stack below which a walk switches to a fresh segment.
#[cfg(not(target_arch = "wasm32"))]
const RED_ZONE: usize = 96 * 1024;

/// Size of each freshly allocated segment.
#[cfg(not(target_arch = "wasm32"))]
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run one level of a nested-value walk with enough stack beneath it.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn ensure_sufficient_stack<R>(walk: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, walk)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub(crate) fn ensure_sufficient_stack<R>(walk: impl FnOnce() -> R) -> R {
    walk()
}
