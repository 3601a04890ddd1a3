//! Closed enumeration domains for states and commands.
//!
//! Both the state domain and the command domain of a machine must be
//! closed, finite and totally ordered. The `Enumeration` trait expresses
//! that contract at the type level; `validate_domain` checks the parts the
//! type system cannot (that the declared variant list is non-empty, sorted
//! and duplicate-free).

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for the value domains of a state machine.
///
/// Implemented for both the state type and the command type. The
/// `fsm_enum!` macro derives it for plain enums; hand-written
/// implementations must list every value in `VARIANTS` in ascending
/// `Ord` order.
///
/// # Example
///
/// ```rust
/// use passive_fsm::core::Enumeration;
///
/// #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl Enumeration for Door {
///     const VARIANTS: &'static [Self] = &[Self::Open, Self::Closed];
///
///     fn name(&self) -> &'static str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::VARIANTS.len(), 2);
/// assert_eq!(Door::Closed.name(), "Closed");
/// ```
pub trait Enumeration: Copy + Eq + Ord + Hash + Debug + Send + Sync + 'static {
    /// Every value of the domain, in ascending order.
    const VARIANTS: &'static [Self];

    /// Display name used in errors and log fields.
    fn name(&self) -> &'static str;
}

/// Check that a domain is a closed, ordered enumeration.
///
/// Returns a human readable reason on failure; the caller decides which
/// error kind (state or command) to report.
pub(crate) fn validate_domain<E: Enumeration>() -> Result<(), String> {
    if E::VARIANTS.is_empty() {
        return Err(format!(
            "`{}` declares no variants",
            std::any::type_name::<E>()
        ));
    }

    if let Some(pair) = E::VARIANTS.windows(2).find(|pair| pair[0] >= pair[1]) {
        return Err(format!(
            "`{}` variants are not strictly ascending ({} before {})",
            std::any::type_name::<E>(),
            pair[0].name(),
            pair[1].name()
        ));
    }

    Ok(())
}
