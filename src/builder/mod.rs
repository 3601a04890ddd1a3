//! Builder API for declaring state machines.
//!
//! `FsmBuilder` owns one configuration per state. The fluent handles it
//! hands out (`StateConfiguration`, `CommandConfiguration`) accumulate
//! actions, guarded command edges and targets, enforcing the registration
//! rules as they go. `FsmBuilder::create_state_machine` freezes the result
//! into an immutable graph and wraps it in a runtime machine.
//!
//! # Example
//!
//! ```
//! use passive_fsm::{fsm_enum, FsmBuilder, FsmError, StateMachine, TransitionContext};
//!
//! fsm_enum! {
//!     enum Light { Green, Yellow, Red }
//! }
//!
//! fsm_enum! {
//!     enum Signal { SwitchNext }
//! }
//!
//! type Ctx = TransitionContext<Light, Signal>;
//!
//! let mut builder: FsmBuilder<Light, Signal> = FsmBuilder::new()?;
//! builder
//!     .from_state(Light::Green)
//!     .as_initial_state()?
//!     .on_command(Signal::SwitchNext)?
//!     .set_state(Light::Yellow);
//! builder
//!     .from_state(Light::Yellow)
//!     .on_command_if(Signal::SwitchNext, |ctx: &Ctx| ctx.previous_state() == Some(Light::Green))?
//!     .set_state(Light::Red)
//!     .on_command_if(Signal::SwitchNext, |ctx: &Ctx| ctx.previous_state() == Some(Light::Red))?
//!     .set_state(Light::Green);
//! builder
//!     .from_state(Light::Red)
//!     .on_command(Signal::SwitchNext)?
//!     .set_state(Light::Yellow);
//!
//! let mut machine = builder.create_state_machine_with_start(true)?;
//! let mut seen = vec![machine.current_state()?];
//! for _ in 0..4 {
//!     machine.trigger_command(Signal::SwitchNext)?;
//!     seen.push(machine.current_state()?);
//! }
//!
//! assert_eq!(
//!     seen,
//!     vec![Light::Green, Light::Yellow, Light::Red, Light::Yellow, Light::Green]
//! );
//! # Ok::<(), FsmError>(())
//! ```

pub mod machine;
pub mod macros;
pub mod state;
pub mod transition;

pub use machine::FsmBuilder;
pub use state::StateConfiguration;
pub use transition::CommandConfiguration;
