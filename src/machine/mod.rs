//! Runtime side of the library.
//!
//! - **Graph**: the frozen, read-only `StateGraph` of `StateObject` nodes
//!   and `CommandObject` edges produced by the builder
//! - **Machines**: the `StateMachine` interface and the synchronous
//!   `SimplePassiveStateMachine` that walks a graph on each command

mod graph;
mod passive;

pub use graph::{CommandObject, StateGraph, StateId, StateObject};
pub use passive::SimplePassiveStateMachine;

use crate::error::FsmError;

/// Operations every state machine exposes to application code.
pub trait StateMachine<S, C, D = ()> {
    /// Enter the initial state. Fails if the machine was already started.
    fn start(&mut self) -> Result<(), FsmError>;

    /// Attach user data visible to all later guards and actions, replacing
    /// any previous value.
    fn set_data(&mut self, data: D);

    /// The current state. Fails if the machine has not been started.
    fn current_state(&self) -> Result<S, FsmError>;

    /// Exit the current state, take the first eligible edge for `command`
    /// and enter its target.
    ///
    /// The exit action runs before any guard is evaluated. When no edge is
    /// eligible the call fails with `CommandNotSupported` after the exit
    /// action has already run; nothing is rolled back.
    fn trigger_command(&mut self, command: C) -> Result<(), FsmError>;
}
