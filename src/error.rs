//! Errors raised while configuring or driving a state machine.

use crate::core::{ActionError, ActionPhase};
use thiserror::Error;

/// Errors that can occur when building or running state machines.
#[derive(Debug, Error)]
pub enum FsmError {
    /// The state domain is not a closed, ordered enumeration.
    #[error("The state type should be a closed enumeration: {0}")]
    InvalidStateType(String),

    /// The command domain is not a closed, ordered enumeration.
    #[error("The command type should be a closed enumeration: {0}")]
    InvalidCommandType(String),

    #[error("Invalid state machine configuration: {0}")]
    InvalidFsmConfiguration(String),

    #[error("Command registration failed: {0}")]
    CommandRegistration(String),

    /// No enabled edge for the command leaves the current state.
    #[error("Command '{command}' is not supported in state '{state}'")]
    CommandNotSupported { state: String, command: String },

    /// Lifecycle misuse: double start, or use before start.
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    #[error("The {phase} action of state '{state}' failed: {source}")]
    ActionFailed {
        state: String,
        phase: ActionPhase,
        #[source]
        source: ActionError,
    },
}

impl FsmError {
    pub(crate) fn not_started() -> Self {
        FsmError::InvalidOperation("State machine has not been started.".to_string())
    }

    pub(crate) fn already_started() -> Self {
        FsmError::InvalidOperation("State machine has already been started.".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn command_not_supported_names_state_and_command() {
        let err = FsmError::CommandNotSupported {
            state: "Green".to_string(),
            command: "Reset".to_string(),
        };

        assert_eq!(
            err.to_string(),
            "Command 'Reset' is not supported in state 'Green'"
        );
    }

    #[test]
    fn action_failure_keeps_source() {
        let err = FsmError::ActionFailed {
            state: "Red".to_string(),
            phase: ActionPhase::Exit,
            source: "bulb burnt out".into(),
        };

        assert_eq!(
            err.to_string(),
            "The exiting action of state 'Red' failed: bulb burnt out"
        );
        assert_eq!(
            err.source().map(|s| s.to_string()).as_deref(),
            Some("bulb burnt out")
        );
    }

    #[test]
    fn lifecycle_errors_are_invalid_operations() {
        assert!(matches!(
            FsmError::not_started(),
            FsmError::InvalidOperation(_)
        ));
        assert!(matches!(
            FsmError::already_started(),
            FsmError::InvalidOperation(_)
        ));
    }
}
