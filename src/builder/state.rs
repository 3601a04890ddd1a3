//! Build-time configuration of a single state.

use crate::builder::machine::FsmBuilder;
use crate::builder::transition::{CommandConfig, CommandConfiguration};
use crate::core::{ActionError, CommandKey, Enumeration, Guard, StateAction, TransitionContext};
use crate::error::FsmError;
use crate::machine::{StateId, StateObject};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Arena entry holding everything registered for one state.
pub(crate) struct StateConfig<S, C, D> {
    state: S,
    on_enter: Option<StateAction<S, C, D>>,
    on_exit: Option<StateAction<S, C, D>>,
    commands: Vec<CommandConfig<S, C, D>>,
    keys: HashSet<CommandKey<C>>,
}

impl<S: Enumeration, C: Enumeration, D> StateConfig<S, C, D> {
    pub(crate) fn new(state: S) -> Self {
        Self {
            state,
            on_enter: None,
            on_exit: None,
            commands: Vec::new(),
            keys: HashSet::new(),
        }
    }

    pub(crate) fn state(&self) -> S {
        self.state
    }

    pub(crate) fn command(&self, slot: usize) -> &CommandConfig<S, C, D> {
        &self.commands[slot]
    }

    pub(crate) fn command_mut(&mut self, slot: usize) -> &mut CommandConfig<S, C, D> {
        &mut self.commands[slot]
    }

    /// Register an edge and return its slot.
    ///
    /// An unguarded registration must be the only one for its command. A
    /// guarded one may coexist with other guarded ones as long as its guard
    /// token differs.
    fn register(
        &mut self,
        command: C,
        guard: Option<Guard<S, C, D>>,
    ) -> Result<usize, FsmError> {
        let key = match &guard {
            None => {
                if self.keys.iter().any(|key| key.command == command) {
                    return Err(self.registration_error(command, "is already registered"));
                }
                CommandKey::unguarded(command)
            }
            Some(guard) => {
                if self.keys.contains(&CommandKey::unguarded(command)) {
                    return Err(self.registration_error(
                        command,
                        "is already registered without a guard condition",
                    ));
                }
                let key = CommandKey::guarded(command, guard.id());
                if self.keys.contains(&key) {
                    return Err(self.registration_error(
                        command,
                        "is already registered with the same guard condition",
                    ));
                }
                key
            }
        };

        debug!(state = self.state.name(), command = %key, "registering command");
        self.keys.insert(key);
        self.commands.push(CommandConfig::new(command, guard));
        Ok(self.commands.len() - 1)
    }

    fn registration_error(&self, command: C, reason: &str) -> FsmError {
        FsmError::CommandRegistration(format!(
            "Command '{}' {} for state '{}'.",
            command.name(),
            reason,
            self.state.name()
        ))
    }

    /// Freeze into a runtime node, edges kept in registration order.
    pub(crate) fn freeze(&self) -> Result<StateObject<S, C, D>, FsmError> {
        let commands = self
            .commands
            .iter()
            .map(|command| command.freeze(self.state))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StateObject::new(
            self.state,
            self.on_enter.clone(),
            self.on_exit.clone(),
            commands,
        ))
    }
}

/// Fluent handle on the configuration of one state.
///
/// Obtained from `FsmBuilder::from_state`; every method either returns the
/// handle again or a `CommandConfiguration` whose `set_state` leads back to
/// it.
pub struct StateConfiguration<'b, S, C, D = ()> {
    builder: &'b mut FsmBuilder<S, C, D>,
    id: StateId,
}

impl<'b, S: Enumeration, C: Enumeration, D> StateConfiguration<'b, S, C, D> {
    pub(crate) fn new(builder: &'b mut FsmBuilder<S, C, D>, id: StateId) -> Self {
        Self { builder, id }
    }

    pub fn state(&self) -> S {
        self.builder.config(self.id).state()
    }

    /// Arena slot of this configuration; equal ids mean the same
    /// configuration.
    pub fn id(&self) -> StateId {
        self.id
    }

    /// Mark this state as the machine's initial state.
    ///
    /// Fails with `InvalidFsmConfiguration` if an initial state was already
    /// designated on the builder.
    pub fn as_initial_state(self) -> Result<Self, FsmError> {
        self.builder.set_initial(self.id)?;
        Ok(self)
    }

    /// Set the action run when the state is entered, replacing any earlier
    /// one.
    pub fn with_entering_action<F>(self, action: F) -> Self
    where
        F: Fn(&TransitionContext<S, C, D>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.builder.config_mut(self.id).on_enter = Some(Arc::new(action));
        self
    }

    /// Set the action run when the state is left, replacing any earlier one.
    pub fn with_exiting_action<F>(self, action: F) -> Self
    where
        F: Fn(&TransitionContext<S, C, D>) -> Result<(), ActionError> + Send + Sync + 'static,
    {
        self.builder.config_mut(self.id).on_exit = Some(Arc::new(action));
        self
    }

    /// Register an unconditional edge for `command`.
    ///
    /// Fails with `CommandRegistration` if the command is already
    /// registered on this state, with or without a guard.
    pub fn on_command(self, command: C) -> Result<CommandConfiguration<'b, S, C, D>, FsmError> {
        let slot = self.builder.config_mut(self.id).register(command, None)?;
        Ok(CommandConfiguration::new(self.builder, self.id, slot))
    }

    /// Register an edge for `command` guarded by `guard`.
    ///
    /// Fails with `CommandRegistration` if the command has an unconditional
    /// edge on this state, or if this very guard (same `GuardId`) is
    /// already registered for it. Distinct guards coexist and are tried in
    /// registration order.
    pub fn on_command_when(
        self,
        command: C,
        guard: Guard<S, C, D>,
    ) -> Result<CommandConfiguration<'b, S, C, D>, FsmError> {
        let slot = self
            .builder
            .config_mut(self.id)
            .register(command, Some(guard))?;
        Ok(CommandConfiguration::new(self.builder, self.id, slot))
    }

    /// Shorthand for `on_command_when` with a freshly created guard.
    pub fn on_command_if<F>(
        self,
        command: C,
        predicate: F,
    ) -> Result<CommandConfiguration<'b, S, C, D>, FsmError>
    where
        F: Fn(&TransitionContext<S, C, D>) -> bool + Send + Sync + 'static,
    {
        self.on_command_when(command, Guard::new(predicate))
    }

    /// Freeze this configuration alone into a runtime node.
    ///
    /// Every registered command must have had `set_state` called.
    pub fn create_state(&self) -> Result<StateObject<S, C, D>, FsmError> {
        self.builder.config(self.id).freeze()
    }
}
