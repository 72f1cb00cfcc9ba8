//! Guard predicates for controlling state transitions.
//!
//! Guards are pure boolean functions over the pre-transition context and the
//! input that triggered the transition. They never observe the transition's
//! own side effects.

use std::fmt;
use std::sync::Arc;

/// Pure predicate that determines if a transition can execute.
///
/// # Example
///
/// ```rust
/// use tradewinds::core::Guard;
///
/// struct Purse {
///     coins: i64,
/// }
///
/// let can_pay = Guard::new(|purse: &Purse, price: &i64| purse.coins >= *price);
///
/// assert!(can_pay.check(&Purse { coins: 10 }, &8));
/// assert!(!can_pay.check(&Purse { coins: 10 }, &12));
/// ```
pub struct Guard<C, E> {
    predicate: Arc<dyn Fn(&C, &E) -> bool + Send + Sync>,
}

impl<C, E> Guard<C, E> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&C, &E) -> bool + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// Check if the guard allows the transition.
    pub fn check(&self, context: &C, input: &E) -> bool {
        (self.predicate)(context, input)
    }

    /// Guard that passes only when both guards pass.
    pub fn and(self, other: Guard<C, E>) -> Self
    where
        C: 'static,
        E: 'static,
    {
        Guard::new(move |c, e| self.check(c, e) && other.check(c, e))
    }

    /// Guard that passes exactly when this one fails.
    pub fn negate(self) -> Self
    where
        C: 'static,
        E: 'static,
    {
        Guard::new(move |c, e| !self.check(c, e))
    }
}

impl<C, E> Clone for Guard<C, E> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<C, E> fmt::Debug for Guard<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Guard(..)")
    }
}
