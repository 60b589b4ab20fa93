//! Macros for declaring state and event enums.

/// Generate a fieldless state enum and its `State` implementation.
///
/// The enum derives `Clone`, `Copy`, `Eq`, `Hash`, `Debug` and serde's
/// traits, and serializes its variants in `SCREAMING_SNAKE_CASE`.
///
/// # Example
///
/// ```
/// use flowstate::state_enum;
/// use flowstate::core::State;
///
/// state_enum! {
///     pub enum OrderState {
///         Draft,
///         Submitted,
///         Delivered,
///         Cancelled,
///     }
///     final: [Delivered, Cancelled]
///     error: [Cancelled]
/// }
///
/// assert_eq!(OrderState::Draft.name(), "Draft");
/// assert!(OrderState::Cancelled.is_error());
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
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
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

/// Generate a fieldless event enum and its `Event` implementation.
///
/// # Example
///
/// ```
/// use flowstate::event_enum;
/// use flowstate::core::Event;
///
/// event_enum! {
///     pub enum OrderEvent {
///         Submit,
///         Cancel,
///     }
/// }
///
/// assert_eq!(OrderEvent::Cancel.name(), "Cancel");
/// ```
#[macro_export]
macro_rules! event_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
