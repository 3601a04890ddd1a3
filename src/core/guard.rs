//! Guard predicates for controlling command edges.
//!
//! Guards are pure boolean functions over a `TransitionContext` that decide
//! whether an edge is eligible. Each guard carries a `GuardId` registration
//! token used only to detect duplicate registrations.

use super::context::TransitionContext;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_GUARD_ID: AtomicU64 = AtomicU64::new(1);

/// Registration token of a guard.
///
/// Every `Guard::new` draws a fresh id; clones of a guard keep it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct GuardId(u64);

impl GuardId {
    fn next() -> Self {
        GuardId(NEXT_GUARD_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw token value.
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for GuardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "guard#{}", self.0)
    }
}

type Predicate<S, C, D> = Arc<dyn Fn(&TransitionContext<S, C, D>) -> bool + Send + Sync>;

/// Pure predicate that determines if a command edge can be taken.
///
/// # Example
///
/// ```rust
/// use passive_fsm::core::{Guard, TransitionContext};
///
/// let after_red = Guard::new(|ctx: &TransitionContext<u8, char>| ctx.previous_state() == Some(2));
/// let same = after_red.clone();
///
/// assert_eq!(after_red.id(), same.id());
/// assert_ne!(after_red.id(), Guard::new(|_: &TransitionContext<u8, char>| true).id());
/// ```
pub struct Guard<S, C, D = ()> {
    id: GuardId,
    predicate: Predicate<S, C, D>,
}

impl<S, C, D> Guard<S, C, D> {
    /// Create a guard from a pure predicate function.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&TransitionContext<S, C, D>) -> bool + Send + Sync + 'static,
    {
        Guard {
            id: GuardId::next(),
            predicate: Arc::new(predicate),
        }
    }

    /// The registration token of this guard.
    pub fn id(&self) -> GuardId {
        self.id
    }

    /// Evaluate the predicate against a context.
    pub fn check(&self, ctx: &TransitionContext<S, C, D>) -> bool {
        (self.predicate)(ctx)
    }
}

impl<S, C, D> Clone for Guard<S, C, D> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<S, C, D> fmt::Debug for Guard<S, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Guard").field(&self.id).finish()
    }
}
