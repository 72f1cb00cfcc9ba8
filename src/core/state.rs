//! Core State trait for state machine states.
//!
//! States are addressed by dotted paths (`gameScreen.at_market.buyAction`).
//! A flat path lets a nested enum tree behave like a hierarchical statechart:
//! a transition declared on `gameScreen` applies to every state below it.

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Path of the implicit root that every state descends from.
pub const ROOT: &str = "";

/// Trait for state machine states.
///
/// All methods are pure. States are immutable values describing the current
/// position in a state machine.
///
/// # Example
///
/// ```rust
/// use tradewinds::core::State;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
/// enum Dock {
///     Moored,
///     Loading,
///     Departed,
/// }
///
/// impl State for Dock {
///     fn name(&self) -> &str {
///         match self {
///             Self::Moored => "moored",
///             Self::Loading => "loading",
///             Self::Departed => "departed",
///         }
///     }
///
///     fn is_final(&self) -> bool {
///         matches!(self, Self::Departed)
///     }
/// }
///
/// assert_eq!(Dock::Loading.path(), "loading");
/// ```
pub trait State:
    Clone + PartialEq + Debug + Serialize + for<'de> Deserialize<'de> + Send + Sync
{
    /// Name of the leaf state, for display and logging.
    fn name(&self) -> &str;

    /// Fully qualified dotted path of this state.
    ///
    /// Flat state enums default to their leaf name.
    fn path(&self) -> String {
        self.name().to_string()
    }

    /// Check if this is a final (terminal) state.
    ///
    /// Default implementation returns `false`.
    fn is_final(&self) -> bool {
        false
    }

    /// Check if this is an error state.
    ///
    /// Default implementation returns `false`.
    fn is_error(&self) -> bool {
        false
    }
}

/// Iterate a path and all of its ancestors, leaf first, ending at [`ROOT`].
///
/// ```rust
/// use tradewinds::core::ancestors;
///
/// let chain: Vec<_> = ancestors("a.b.c").collect();
/// assert_eq!(chain, vec!["a.b.c", "a.b", "a", ""]);
/// ```
pub fn ancestors(path: &str) -> impl Iterator<Item = &str> {
    let mut next = Some(path);
    std::iter::from_fn(move || {
        let current = next?;
        next = if current.is_empty() {
            None
        } else {
            Some(current.rfind('.').map_or(ROOT, |idx| &current[..idx]))
        };
        Some(current)
    })
}

/// Check whether `path` is `pattern` or lies underneath it.
pub fn in_state(path: &str, pattern: &str) -> bool {
    if pattern.is_empty() {
        return true;
    }
    path == pattern
        || (path.starts_with(pattern) && path.as_bytes().get(pattern.len()) == Some(&b'.'))
}
