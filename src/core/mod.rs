//! Core state machine types.
//!
//! This module contains the building blocks shared by the builder and the
//! runtime engine:
//! - State and command domains via the `Enumeration` trait
//! - Guard predicates and their registration tokens
//! - Registration identity (`CommandKey`)
//! - The `TransitionContext` snapshot passed to guards and actions
//!
//! Nothing in here mutates machine state.

mod action;
mod context;
mod enumeration;
mod guard;
mod key;

pub use action::{ActionError, ActionPhase, StateAction};
pub use context::TransitionContext;
pub use enumeration::Enumeration;
pub(crate) use enumeration::validate_domain;
pub use guard::{Guard, GuardId};
pub use key::CommandKey;
