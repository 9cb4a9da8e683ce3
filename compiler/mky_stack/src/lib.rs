//! Stack growth for the recursive phases.
//!
//! The parser descends once per nesting level and the evaluator once per
//! expression and per user-level call. Wrapping those recursion points in
//! [`ensure_sufficient_stack`] moves deep programs onto freshly allocated
//! stack segments instead of overflowing the thread stack. The evaluator's
//! call-depth limit bounds how far this can go.
//!
//! - **Red zone**: 128KB. Below this, the next call grows the stack.
//! - **Growth size**: 2MB per new segment.

/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if the red zone has been reached.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
