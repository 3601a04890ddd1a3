//! Passive state machine driven by synchronous `trigger_command` calls.

use crate::core::{Enumeration, TransitionContext};
use crate::error::FsmError;
use crate::machine::graph::{StateGraph, StateId};
use crate::machine::StateMachine;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Lifecycle of the engine itself.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Phase {
    NotStarted,
    Started {
        current: StateId,
        previous: Option<StateId>,
    },
}

/// State machine with no thread or event loop of its own.
///
/// It walks a frozen `StateGraph` on each `trigger_command`: the current
/// state is exited, the first eligible edge for the command is looked up,
/// and the target state is entered.
///
/// # Example
///
/// ```rust
/// use passive_fsm::{fsm_enum, FsmBuilder, StateMachine};
///
/// fsm_enum! {
///     enum Light { Green, Yellow, Red }
/// }
///
/// fsm_enum! {
///     enum Signal { SwitchNext }
/// }
///
/// let mut builder: FsmBuilder<Light, Signal> = FsmBuilder::new()?;
/// builder
///     .from_state(Light::Green)
///     .as_initial_state()?
///     .on_command(Signal::SwitchNext)?
///     .set_state(Light::Yellow);
///
/// let mut machine = builder.create_state_machine_with_start(true)?;
/// machine.trigger_command(Signal::SwitchNext)?;
///
/// assert_eq!(machine.current_state()?, Light::Yellow);
/// assert_eq!(machine.previous_state(), Some(Light::Green));
/// # Ok::<(), passive_fsm::FsmError>(())
/// ```
pub struct SimplePassiveStateMachine<S, C, D = ()> {
    graph: Arc<StateGraph<S, C, D>>,
    initial: StateId,
    phase: Phase,
    data: Option<Arc<D>>,
}

impl<S: Enumeration, C: Enumeration, D> SimplePassiveStateMachine<S, C, D> {
    /// Create a machine over a frozen graph, starting in `initial`.
    ///
    /// Fails with `InvalidOperation` when `initial` is not part of the graph.
    pub fn new(graph: Arc<StateGraph<S, C, D>>, initial: S) -> Result<Self, FsmError> {
        let initial = graph.id_of(initial).ok_or_else(|| {
            FsmError::InvalidOperation(format!(
                "Initial state '{}' must be present in the state graph.",
                initial.name()
            ))
        })?;
        Ok(Self::from_parts(graph, initial))
    }

    pub(crate) fn from_parts(graph: Arc<StateGraph<S, C, D>>, initial: StateId) -> Self {
        Self {
            graph,
            initial,
            phase: Phase::NotStarted,
            data: None,
        }
    }

    pub fn is_started(&self) -> bool {
        matches!(self.phase, Phase::Started { .. })
    }

    /// The state left by the last successful transition.
    ///
    /// `None` before start and right after entering the initial state.
    pub fn previous_state(&self) -> Option<S> {
        match self.phase {
            Phase::Started {
                previous: Some(previous),
                ..
            } => Some(self.graph.state(previous).state()),
            _ => None,
        }
    }

    pub fn initial_state(&self) -> S {
        self.graph.state(self.initial).state()
    }

    pub fn graph(&self) -> &Arc<StateGraph<S, C, D>> {
        &self.graph
    }

    pub fn data(&self) -> Option<&D> {
        self.data.as_deref()
    }

    /// Remove any data set with `set_data`.
    pub fn clear_data(&mut self) {
        self.data = None;
    }

    fn context(
        &self,
        command: Option<C>,
        current: StateId,
        previous: Option<StateId>,
    ) -> TransitionContext<S, C, D> {
        TransitionContext::new(
            command,
            Some(self.graph.state(current).state()),
            previous.map(|id| self.graph.state(id).state()),
            self.data.clone(),
        )
    }
}

impl<S: Enumeration, C: Enumeration, D> StateMachine<S, C, D>
    for SimplePassiveStateMachine<S, C, D>
{
    fn start(&mut self) -> Result<(), FsmError> {
        if self.is_started() {
            return Err(FsmError::already_started());
        }

        let initial = self.initial;
        self.phase = Phase::Started {
            current: initial,
            previous: None,
        };
        debug!(state = self.initial_state().name(), "starting state machine");

        let ctx = self.context(None, initial, None);
        self.graph.state(initial).enter(&ctx)
    }

    fn set_data(&mut self, data: D) {
        self.data = Some(Arc::new(data));
    }

    fn current_state(&self) -> Result<S, FsmError> {
        match self.phase {
            Phase::Started { current, .. } => Ok(self.graph.state(current).state()),
            Phase::NotStarted => Err(FsmError::not_started()),
        }
    }

    fn trigger_command(&mut self, command: C) -> Result<(), FsmError> {
        let Phase::Started { current, previous } = self.phase else {
            return Err(FsmError::not_started());
        };
        let graph = Arc::clone(&self.graph);
        let source = graph.state(current);

        let ctx = self.context(Some(command), current, previous);
        source.exit(&ctx)?;

        let Some(edge) = source.find_command(command, &ctx) else {
            debug!(
                state = source.state().name(),
                command = command.name(),
                "command not supported in current state"
            );
            return Err(FsmError::CommandNotSupported {
                state: source.state().name().to_string(),
                command: command.name().to_string(),
            });
        };

        let target = edge.target();
        self.phase = Phase::Started {
            current: target,
            previous: Some(current),
        };
        debug!(
            from = source.state().name(),
            to = edge.target_state().name(),
            command = command.name(),
            "transition"
        );

        let ctx = self.context(Some(command), target, Some(current));
        graph.state(target).enter(&ctx)
    }
}

impl<S: fmt::Debug + Enumeration, C: fmt::Debug + Enumeration, D> fmt::Debug
    for SimplePassiveStateMachine<S, C, D>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimplePassiveStateMachine")
            .field("initial", &self.initial_state())
            .field("current", &self.current_state().ok())
            .field("previous", &self.previous_state())
            .field("has_data", &self.data.is_some())
            .finish()
    }
}
