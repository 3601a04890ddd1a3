//! Snapshot of machine state handed to guards and actions.

use std::fmt;
use std::sync::Arc;

/// Context for one transition attempt.
///
/// Every field is optional: there is no command and no previous state when
/// the initial state is entered by `start`, and no data until the caller
/// sets some.
pub struct TransitionContext<S, C, D = ()> {
    command: Option<C>,
    current_state: Option<S>,
    previous_state: Option<S>,
    data: Option<Arc<D>>,
}

impl<S: Copy, C: Copy, D> TransitionContext<S, C, D> {
    pub(crate) fn new(
        command: Option<C>,
        current_state: Option<S>,
        previous_state: Option<S>,
        data: Option<Arc<D>>,
    ) -> Self {
        Self {
            command,
            current_state,
            previous_state,
            data,
        }
    }

    /// The command being processed, absent while entering the initial state.
    pub fn command(&self) -> Option<C> {
        self.command
    }

    /// The state the machine is in for this step.
    ///
    /// While exiting this is the state being left; while entering it is the
    /// state being entered.
    pub fn current_state(&self) -> Option<S> {
        self.current_state
    }

    /// The state the machine was in before the current one.
    pub fn previous_state(&self) -> Option<S> {
        self.previous_state
    }

    /// User data attached to the machine with `set_data`.
    pub fn data(&self) -> Option<&D> {
        self.data.as_deref()
    }
}

impl<S: Clone, C: Clone, D> Clone for TransitionContext<S, C, D> {
    fn clone(&self) -> Self {
        Self {
            command: self.command.clone(),
            current_state: self.current_state.clone(),
            previous_state: self.previous_state.clone(),
            data: self.data.clone(),
        }
    }
}

impl<S: fmt::Debug, C: fmt::Debug, D> fmt::Debug for TransitionContext<S, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionContext")
            .field("command", &self.command)
            .field("current_state", &self.current_state)
            .field("previous_state", &self.previous_state)
            .field("has_data", &self.data.is_some())
            .finish()
    }
}
