//! # Aggregate
//!
//! The "all" and "any" combinators every aggregate query is built from.

/// Check that every item satisfies `predicate`.
///
/// Stops at the first failure. An empty input is vacuously `true`.
///
/// # Example
///
/// ```
/// use acl_engine::aggregate::all_of;
///
/// assert!(all_of(["p1", "p2"], |p| p.starts_with('p')));
/// assert!(all_of(Vec::<&str>::new(), |_| false));
/// ```
pub fn all_of<I, F>(items: I, predicate: F) -> bool
where
    I: IntoIterator,
    F: FnMut(I::Item) -> bool,
{
    items.into_iter().all(predicate)
}

/// Check that at least one item satisfies `predicate`.
///
/// Stops at the first success. An empty input is `false`.
///
/// # Example
///
/// ```
/// use acl_engine::aggregate::any_of;
///
/// assert!(any_of(["p1", "p3"], |p| p == "p3"));
/// assert!(!any_of(Vec::<&str>::new(), |_| true));
/// ```
pub fn any_of<I, F>(items: I, predicate: F) -> bool
where
    I: IntoIterator,
    F: FnMut(I::Item) -> bool,
{
    items.into_iter().any(predicate)
}
