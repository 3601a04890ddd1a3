//! Builder for constructing state machines.

use crate::builder::state::{StateConfig, StateConfiguration};
use crate::core::{validate_domain, Enumeration};
use crate::error::FsmError;
use crate::machine::{SimplePassiveStateMachine, StateGraph, StateId, StateMachine};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Builder that accumulates the state/command graph of a machine.
///
/// Configurations live in an arena addressed by `StateId`; `from_state`
/// hands out a `StateConfiguration` for the requested state, creating it on
/// first use.
pub struct FsmBuilder<S, C, D = ()> {
    configurations: Vec<StateConfig<S, C, D>>,
    index: HashMap<S, StateId>,
    initial: Option<StateId>,
}

impl<S: Enumeration, C: Enumeration, D> FsmBuilder<S, C, D> {
    /// Create a builder.
    ///
    /// Fails with `InvalidStateType` or `InvalidCommandType` when either
    /// domain does not declare a non-empty, strictly ascending variant list.
    pub fn new() -> Result<Self, FsmError> {
        validate_domain::<S>().map_err(FsmError::InvalidStateType)?;
        validate_domain::<C>().map_err(FsmError::InvalidCommandType)?;

        Ok(Self {
            configurations: Vec::new(),
            index: HashMap::new(),
            initial: None,
        })
    }

    /// Configuration for `state`, created on first request.
    ///
    /// Repeated calls for the same state address the same configuration.
    pub fn from_state(&mut self, state: S) -> StateConfiguration<'_, S, C, D> {
        let id = self.resolve(state);
        StateConfiguration::new(self, id)
    }

    /// The state marked with `as_initial_state`, if any.
    pub fn initial_state(&self) -> Option<S> {
        self.initial.map(|id| self.configurations[id.0].state())
    }

    /// Configured states in the order they were first requested.
    pub fn configured_states(&self) -> impl Iterator<Item = S> + '_ {
        self.configurations.iter().map(StateConfig::state)
    }

    /// Freeze every configured state into an immutable graph.
    ///
    /// Fails with `InvalidFsmConfiguration` when no state was configured, no
    /// initial state was designated, or some command was never given a
    /// target state.
    pub fn freeze(&self) -> Result<Arc<StateGraph<S, C, D>>, FsmError> {
        self.freeze_with_initial().map(|(graph, _)| graph)
    }

    /// Build a machine over a freshly frozen graph. The machine is not
    /// started.
    pub fn create_state_machine(&self) -> Result<SimplePassiveStateMachine<S, C, D>, FsmError> {
        let (graph, initial) = self.freeze_with_initial()?;
        Ok(SimplePassiveStateMachine::from_parts(graph, initial))
    }

    /// Like `create_state_machine`, additionally starting the machine when
    /// `start_immediately` is set.
    pub fn create_state_machine_with_start(
        &self,
        start_immediately: bool,
    ) -> Result<SimplePassiveStateMachine<S, C, D>, FsmError> {
        let mut machine = self.create_state_machine()?;
        if start_immediately {
            machine.start()?;
        }
        Ok(machine)
    }

    pub(crate) fn resolve(&mut self, state: S) -> StateId {
        if let Some(id) = self.index.get(&state) {
            return *id;
        }

        let id = StateId(self.configurations.len());
        self.configurations.push(StateConfig::new(state));
        self.index.insert(state, id);
        debug!(state = state.name(), "configuring state");
        id
    }

    pub(crate) fn config(&self, id: StateId) -> &StateConfig<S, C, D> {
        &self.configurations[id.0]
    }

    pub(crate) fn config_mut(&mut self, id: StateId) -> &mut StateConfig<S, C, D> {
        &mut self.configurations[id.0]
    }

    pub(crate) fn set_initial(&mut self, id: StateId) -> Result<(), FsmError> {
        if let Some(existing) = self.initial {
            return Err(FsmError::InvalidFsmConfiguration(format!(
                "Initial state has already been set to '{}'.",
                self.config(existing).state().name()
            )));
        }

        self.initial = Some(id);
        Ok(())
    }

    fn freeze_with_initial(&self) -> Result<(Arc<StateGraph<S, C, D>>, StateId), FsmError> {
        if self.configurations.is_empty() {
            return Err(FsmError::InvalidFsmConfiguration(
                "There are no states configured.".to_string(),
            ));
        }
        let initial = self.initial.ok_or_else(|| {
            FsmError::InvalidFsmConfiguration("Initial state was not configured.".to_string())
        })?;

        let states = self
            .configurations
            .iter()
            .map(StateConfig::freeze)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            states = states.len(),
            initial = self.config(initial).state().name(),
            "froze state graph"
        );

        Ok((Arc::new(StateGraph::new(states)), initial))
    }
}
