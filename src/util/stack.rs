/// Minimum stack space to keep available before recursing (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space allocated each time the stack has to grow (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensures sufficient stack space is available before executing `f`.
///
/// Scripts can recurse arbitrarily deep through user functions and nested
/// expressions. Wrapping the recursive entry points of the parser and the
/// evaluator in this function lets the stack grow on demand instead of
/// overflowing.
///
/// ## Example
/// ```
/// use mava::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u32) -> u32 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { 1 + depth(n - 1) })
/// }
///
/// assert_eq!(depth(10_000), 10_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}
