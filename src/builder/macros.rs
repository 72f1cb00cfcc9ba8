//! Macros for ergonomic state machine construction.

/// Generate a flat state enum together with its `State` implementation.
///
/// Each variant's path is its own name, so transitions on these machines
/// use the variant name as the source path.
///
/// # Example
///
/// ```
/// use tradewinds::state_enum;
/// use tradewinds::core::State;
///
/// state_enum! {
///     pub enum Tide {
///         Low,
///         Rising,
///         High,
///     }
///     final: [High]
/// }
///
/// assert_eq!(Tide::Rising.path(), "Rising");
/// assert!(Tide::High.is_final());
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(final: [$($final:ident),* $(,)?])?
        $(error: [$($error:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn is_final(&self) -> bool {
                match self {
                    $($(Self::$final => true,)*)?
                    _ => false,
                }
            }

            fn is_error(&self) -> bool {
                match self {
                    $($(Self::$error => true,)*)?
                    _ => false,
                }
            }
        }
    };
}
