//! Macros for declaring state and command domains.

/// Declare an enum usable as a state or command domain.
///
/// Derives `Copy`, `Eq`, `Ord`, `Hash` and `Debug` and implements
/// `Enumeration` with the variants listed in declaration order, which is
/// also their `Ord` order.
///
/// # Example
///
/// ```
/// use passive_fsm::core::Enumeration;
/// use passive_fsm::fsm_enum;
///
/// fsm_enum! {
///     pub enum DoorState {
///         Open,
///         Closed,
///         Locked,
///     }
/// }
///
/// assert_eq!(DoorState::VARIANTS, &[DoorState::Open, DoorState::Closed, DoorState::Locked]);
/// assert_eq!(DoorState::Locked.name(), "Locked");
/// ```
#[macro_export]
macro_rules! fsm_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),+
        }

        impl $crate::core::Enumeration for $name {
            const VARIANTS: &'static [Self] = &[$(Self::$variant),+];

            fn name(&self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),+
                }
            }
        }
    };
}
