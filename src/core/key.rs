//! Identity of a command registration.

use super::guard::GuardId;
use std::fmt;

/// Identity of a (command, guard) registration on one source state.
///
/// Two registrations of the same command with different guards have
/// different keys; an unguarded registration always maps to `guard: None`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct CommandKey<C> {
    pub command: C,
    pub guard: Option<GuardId>,
}

impl<C> CommandKey<C> {
    pub fn unguarded(command: C) -> Self {
        Self {
            command,
            guard: None,
        }
    }

    pub fn guarded(command: C, guard: GuardId) -> Self {
        Self {
            command,
            guard: Some(guard),
        }
    }

    pub fn is_guarded(&self) -> bool {
        self.guard.is_some()
    }
}

impl<C: fmt::Debug> fmt::Display for CommandKey<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.guard {
            Some(guard) => write!(f, "{:?} [{}]", self.command, guard),
            None => write!(f, "{:?}", self.command),
        }
    }
}
