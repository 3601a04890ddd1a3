//! Entry and exit side effects of a state.

use super::context::TransitionContext;
use std::fmt;
use std::sync::Arc;

/// Error returned by a failing enter or exit action.
pub type ActionError = Box<dyn std::error::Error + Send + Sync>;

/// Shared, context-taking side effect run when a state is entered or left.
pub type StateAction<S, C, D> =
    Arc<dyn Fn(&TransitionContext<S, C, D>) -> Result<(), ActionError> + Send + Sync>;

/// Which side of a transition an action belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ActionPhase {
    Enter,
    Exit,
}

impl fmt::Display for ActionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enter => f.write_str("entering"),
            Self::Exit => f.write_str("exiting"),
        }
    }
}
