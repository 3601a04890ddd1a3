//! Build-time configuration of a command edge.

use crate::builder::machine::FsmBuilder;
use crate::builder::state::StateConfiguration;
use crate::core::{CommandKey, Enumeration, Guard, GuardId};
use crate::error::FsmError;
use crate::machine::{CommandObject, StateId};
use tracing::debug;

/// Arena entry for one registered edge of a source state.
pub(crate) struct CommandConfig<S, C, D> {
    command: C,
    guard: Option<Guard<S, C, D>>,
    target: Option<(StateId, S)>,
}

impl<S: Enumeration, C: Enumeration, D> CommandConfig<S, C, D> {
    pub(crate) fn new(command: C, guard: Option<Guard<S, C, D>>) -> Self {
        Self {
            command,
            guard,
            target: None,
        }
    }

    pub(crate) fn key(&self) -> CommandKey<C> {
        CommandKey {
            command: self.command,
            guard: self.guard.as_ref().map(Guard::id),
        }
    }

    fn set_target(&mut self, id: StateId, state: S) {
        self.target = Some((id, state));
    }

    /// Freeze into a runtime edge. The target must have been set.
    pub(crate) fn freeze(&self, source: S) -> Result<CommandObject<S, C, D>, FsmError> {
        let (target, target_state) = self.target.ok_or_else(|| {
            FsmError::InvalidFsmConfiguration(format!(
                "Command '{}' of state '{}' has no target state.",
                self.command.name(),
                source.name()
            ))
        })?;

        Ok(CommandObject::new(
            self.command,
            self.guard.clone(),
            target,
            target_state,
        ))
    }
}

/// Fluent handle on one registered edge, returned by `on_command`.
///
/// Call `set_state` to give the edge its target; that returns the handle of
/// the source state so more commands can be chained.
pub struct CommandConfiguration<'b, S, C, D = ()> {
    builder: &'b mut FsmBuilder<S, C, D>,
    source: StateId,
    slot: usize,
}

impl<'b, S: Enumeration, C: Enumeration, D> CommandConfiguration<'b, S, C, D> {
    pub(crate) fn new(builder: &'b mut FsmBuilder<S, C, D>, source: StateId, slot: usize) -> Self {
        Self {
            builder,
            source,
            slot,
        }
    }

    fn config(&self) -> &CommandConfig<S, C, D> {
        self.builder.config(self.source).command(self.slot)
    }

    pub fn command(&self) -> C {
        self.config().command
    }

    pub fn guard_id(&self) -> Option<GuardId> {
        self.config().guard.as_ref().map(Guard::id)
    }

    /// Registration identity of this edge.
    pub fn key(&self) -> CommandKey<C> {
        self.config().key()
    }

    /// Point the edge at `state` and return the source state's handle.
    ///
    /// The target configuration is created on the builder if it does not
    /// exist yet.
    pub fn set_state(self, state: S) -> StateConfiguration<'b, S, C, D> {
        let target = self.builder.resolve(state);
        let source = self.builder.config_mut(self.source);
        let from = source.state();
        let edge = source.command_mut(self.slot);
        edge.set_target(target, state);
        debug!(
            from = from.name(),
            to = state.name(),
            command = %edge.key(),
            "setting command target"
        );

        StateConfiguration::new(self.builder, self.source)
    }

    /// Freeze this edge alone into a runtime edge.
    ///
    /// Fails with `InvalidFsmConfiguration` before `set_state` was called.
    pub fn create_command_object(&self) -> Result<CommandObject<S, C, D>, FsmError> {
        let source = self.builder.config(self.source).state();
        self.config().freeze(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransitionContext;
    use crate::fsm_enum;

    fsm_enum! {
        enum Light {
            Green,
            Yellow,
            Red,
        }
    }

    fsm_enum! {
        enum Signal {
            SwitchNext,
            Reset,
        }
    }

    type Builder = FsmBuilder<Light, Signal>;

    #[test]
    fn set_state_returns_source_configuration() {
        let mut builder = Builder::new().unwrap();
        let green = builder.from_state(Light::Green).id();

        let config = builder
            .from_state(Light::Green)
            .on_command(Signal::SwitchNext)
            .unwrap()
            .set_state(Light::Yellow);

        assert_eq!(config.id(), green);
        assert_eq!(config.state(), Light::Green);
    }

    #[test]
    fn set_state_creates_target_configuration() {
        let mut builder = Builder::new().unwrap();

        builder
            .from_state(Light::Green)
            .on_command(Signal::Reset)
            .unwrap()
            .set_state(Light::Red);

        assert_eq!(
            builder.configured_states().collect::<Vec<_>>(),
            vec![Light::Green, Light::Red]
        );
    }

    #[test]
    fn command_object_requires_target() {
        let mut builder = Builder::new().unwrap();

        let command = builder
            .from_state(Light::Green)
            .on_command(Signal::SwitchNext)
            .unwrap();

        assert_eq!(command.command(), Signal::SwitchNext);
        assert!(command.guard_id().is_none());
        assert!(matches!(
            command.create_command_object(),
            Err(FsmError::InvalidFsmConfiguration(_))
        ));
    }

    #[test]
    fn command_object_carries_guard_and_target() {
        let mut builder = Builder::new().unwrap();
        let guard = Guard::new(|ctx: &TransitionContext<Light, Signal>| {
            ctx.previous_state().is_none()
        });
        let id = guard.id();

        builder
            .from_state(Light::Green)
            .on_command_when(Signal::SwitchNext, guard)
            .unwrap()
            .set_state(Light::Yellow);
        let state = builder.from_state(Light::Green).create_state().unwrap();
        let edge = state.commands().next().unwrap();

        assert_eq!(edge.command(), Signal::SwitchNext);
        assert_eq!(edge.target_state(), Light::Yellow);
        assert_eq!(edge.guard_id(), Some(id));
        assert_eq!(edge.key(), CommandKey::guarded(Signal::SwitchNext, id));
    }

    #[test]
    fn key_matches_registration() {
        let mut builder = Builder::new().unwrap();
        let guard = Guard::new(|_: &TransitionContext<Light, Signal>| true);
        let id = guard.id();

        let command = builder
            .from_state(Light::Red)
            .on_command_when(Signal::Reset, guard)
            .unwrap();

        assert_eq!(command.key(), CommandKey::guarded(Signal::Reset, id));
    }
}
