//! Passive FSM: declarative, command-driven finite-state machines
//!
//! A machine is declared in two phases. The builder accumulates a graph of
//! states and, per state, the commands that may be triggered from it, each
//! optionally guarded by a predicate and pointing at a target state. The
//! builder then freezes that graph, and a passive runtime engine walks it
//! on every triggered command, running exit actions, evaluating guards in
//! registration order and running enter actions.
//!
//! # Core Concepts
//!
//! - **Domains**: states and commands are closed enumerations (`Enumeration`,
//!   usually derived with `fsm_enum!`)
//! - **Guards**: pure predicates over a `TransitionContext`; each carries a
//!   `GuardId` registration token used to reject duplicate registrations
//! - **Builder**: `FsmBuilder` with fluent `StateConfiguration` /
//!   `CommandConfiguration` handles
//! - **Runtime**: an immutable `StateGraph` driven by
//!   `SimplePassiveStateMachine`
//!
//! The engine is synchronous and single-threaded: no operation blocks on
//! its own, and concurrent triggering must be serialized by the caller.
//!
//! # Example
//!
//! ```rust
//! use passive_fsm::{fsm_enum, FsmBuilder, FsmError, StateMachine};
//!
//! fsm_enum! {
//!     enum Door { Closed, Open }
//! }
//!
//! fsm_enum! {
//!     enum Action { Push, Pull }
//! }
//!
//! let mut builder: FsmBuilder<Door, Action> = FsmBuilder::new()?;
//! builder
//!     .from_state(Door::Closed)
//!     .as_initial_state()?
//!     .on_command(Action::Push)?
//!     .set_state(Door::Open);
//! builder
//!     .from_state(Door::Open)
//!     .on_command(Action::Pull)?
//!     .set_state(Door::Closed);
//!
//! let mut machine = builder.create_state_machine()?;
//! machine.start()?;
//! machine.trigger_command(Action::Push)?;
//! assert_eq!(machine.current_state()?, Door::Open);
//!
//! let err = machine.trigger_command(Action::Push).unwrap_err();
//! assert!(matches!(err, FsmError::CommandNotSupported { .. }));
//! # Ok::<(), FsmError>(())
//! ```

pub mod builder;
pub mod core;
pub mod error;
pub mod machine;

// Re-export commonly used types
pub use crate::builder::{CommandConfiguration, FsmBuilder, StateConfiguration};
pub use crate::core::{
    ActionError, ActionPhase, CommandKey, Enumeration, Guard, GuardId, TransitionContext,
};
pub use crate::error::FsmError;
pub use crate::machine::{
    CommandObject, SimplePassiveStateMachine, StateGraph, StateId, StateMachine, StateObject,
};
