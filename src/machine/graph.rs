//! Immutable runtime graph of states and command edges.

use crate::core::{
    ActionPhase, CommandKey, Enumeration, Guard, GuardId, StateAction, TransitionContext,
};
use crate::error::FsmError;
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Index of a state inside a `StateGraph` (and of its configuration inside
/// the builder that produced it).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct StateId(pub(crate) usize);

impl StateId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A frozen edge: command, optional guard and target state.
pub struct CommandObject<S, C, D = ()> {
    command: C,
    guard: Option<Guard<S, C, D>>,
    target: StateId,
    target_state: S,
}

impl<S: Enumeration, C: Enumeration, D> CommandObject<S, C, D> {
    pub(crate) fn new(
        command: C,
        guard: Option<Guard<S, C, D>>,
        target: StateId,
        target_state: S,
    ) -> Self {
        Self {
            command,
            guard,
            target,
            target_state,
        }
    }

    pub fn command(&self) -> C {
        self.command
    }

    pub fn target(&self) -> StateId {
        self.target
    }

    pub fn target_state(&self) -> S {
        self.target_state
    }

    pub fn guard_id(&self) -> Option<GuardId> {
        self.guard.as_ref().map(Guard::id)
    }

    /// Registration identity of this edge.
    pub fn key(&self) -> CommandKey<C> {
        CommandKey {
            command: self.command,
            guard: self.guard_id(),
        }
    }

    /// True when the edge has no guard or its guard accepts `ctx`.
    pub fn check_guard(&self, ctx: &TransitionContext<S, C, D>) -> bool {
        self.guard.as_ref().is_none_or(|guard| guard.check(ctx))
    }
}

impl<S: Clone, C: Clone, D> Clone for CommandObject<S, C, D> {
    fn clone(&self) -> Self {
        Self {
            command: self.command.clone(),
            guard: self.guard.clone(),
            target: self.target,
            target_state: self.target_state.clone(),
        }
    }
}

impl<S: fmt::Debug, C: fmt::Debug, D> fmt::Debug for CommandObject<S, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandObject")
            .field("command", &self.command)
            .field("guard", &self.guard)
            .field("target_state", &self.target_state)
            .finish()
    }
}

/// A frozen state: its value, enter/exit actions and outgoing edges in
/// registration order.
pub struct StateObject<S, C, D = ()> {
    state: S,
    on_enter: Option<StateAction<S, C, D>>,
    on_exit: Option<StateAction<S, C, D>>,
    commands: Vec<CommandObject<S, C, D>>,
}

impl<S: Enumeration, C: Enumeration, D> StateObject<S, C, D> {
    pub(crate) fn new(
        state: S,
        on_enter: Option<StateAction<S, C, D>>,
        on_exit: Option<StateAction<S, C, D>>,
        commands: Vec<CommandObject<S, C, D>>,
    ) -> Self {
        Self {
            state,
            on_enter,
            on_exit,
            commands,
        }
    }

    pub fn state(&self) -> S {
        self.state
    }

    /// Outgoing edges in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &CommandObject<S, C, D>> {
        self.commands.iter()
    }

    pub fn enter(&self, ctx: &TransitionContext<S, C, D>) -> Result<(), FsmError> {
        self.run(self.on_enter.as_ref(), ActionPhase::Enter, ctx)
    }

    pub fn exit(&self, ctx: &TransitionContext<S, C, D>) -> Result<(), FsmError> {
        self.run(self.on_exit.as_ref(), ActionPhase::Exit, ctx)
    }

    /// First edge, in registration order, for `command` whose guard accepts
    /// `ctx`.
    ///
    /// Guards of edges for other commands are never evaluated, and
    /// evaluation stops at the first accepting guard.
    pub fn find_command(
        &self,
        command: C,
        ctx: &TransitionContext<S, C, D>,
    ) -> Option<&CommandObject<S, C, D>> {
        self.commands
            .iter()
            .filter(|edge| edge.command == command)
            .find(|edge| {
                let eligible = edge.check_guard(ctx);
                trace!(
                    state = self.state.name(),
                    command = command.name(),
                    guard = ?edge.guard_id(),
                    eligible,
                    "evaluated command edge"
                );
                eligible
            })
    }

    fn run(
        &self,
        action: Option<&StateAction<S, C, D>>,
        phase: ActionPhase,
        ctx: &TransitionContext<S, C, D>,
    ) -> Result<(), FsmError> {
        let Some(action) = action else {
            return Ok(());
        };

        action(ctx).map_err(|source| FsmError::ActionFailed {
            state: self.state.name().to_string(),
            phase,
            source,
        })
    }
}

impl<S: fmt::Debug, C: fmt::Debug, D> fmt::Debug for StateObject<S, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateObject")
            .field("state", &self.state)
            .field("has_enter_action", &self.on_enter.is_some())
            .field("has_exit_action", &self.on_exit.is_some())
            .field("commands", &self.commands)
            .finish()
    }
}

/// The whole frozen machine definition, shared read-only by machines.
pub struct StateGraph<S, C, D = ()> {
    states: Vec<StateObject<S, C, D>>,
    index: HashMap<S, StateId>,
}

impl<S: Enumeration, C: Enumeration, D> StateGraph<S, C, D> {
    /// Assemble a graph from states laid out by `StateId`.
    pub(crate) fn new(states: Vec<StateObject<S, C, D>>) -> Self {
        let index = states
            .iter()
            .enumerate()
            .map(|(i, state)| (state.state, StateId(i)))
            .collect();
        Self { states, index }
    }

    pub fn id_of(&self, state: S) -> Option<StateId> {
        self.index.get(&state).copied()
    }

    pub fn get(&self, state: S) -> Option<&StateObject<S, C, D>> {
        self.id_of(state).map(|id| &self.states[id.0])
    }

    /// State by id; ids come from this graph, so lookups are infallible.
    pub fn state(&self, id: StateId) -> &StateObject<S, C, D> {
        &self.states[id.0]
    }

    pub fn states(&self) -> impl Iterator<Item = &StateObject<S, C, D>> {
        self.states.iter()
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

impl<S: fmt::Debug, C: fmt::Debug, D> fmt::Debug for StateGraph<S, C, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.states.iter()).finish()
    }
}
