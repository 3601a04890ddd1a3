//! Traffic light driven by a passive state machine.
//!
//! Yellow has two guarded edges for `SwitchNext`; the one taken depends on
//! the state Yellow was entered from.
//!
//! ```bash
//! RUST_LOG=passive_fsm=debug cargo run --example traffic_light
//! ```

use passive_fsm::{fsm_enum, FsmBuilder, FsmError, StateMachine, TransitionContext};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

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

type Ctx = TransitionContext<Light, Signal>;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();
}

fn build() -> Result<FsmBuilder<Light, Signal>, FsmError> {
    let mut builder: FsmBuilder<Light, Signal> = FsmBuilder::new()?;
    for light in [Light::Green, Light::Yellow, Light::Red] {
        builder.from_state(light).with_entering_action(|ctx: &Ctx| {
            info!(
                light = ?ctx.current_state(),
                from = ?ctx.previous_state(),
                "light on"
            );
            Ok(())
        });
    }

    builder
        .from_state(Light::Green)
        .as_initial_state()?
        .on_command(Signal::SwitchNext)?
        .set_state(Light::Yellow);
    builder
        .from_state(Light::Yellow)
        .on_command_if(Signal::SwitchNext, |ctx: &Ctx| {
            ctx.previous_state() == Some(Light::Green)
        })?
        .set_state(Light::Red)
        .on_command_if(Signal::SwitchNext, |ctx: &Ctx| {
            ctx.previous_state() == Some(Light::Red)
        })?
        .set_state(Light::Green);
    builder
        .from_state(Light::Red)
        .on_command(Signal::SwitchNext)?
        .set_state(Light::Yellow)
        .on_command(Signal::Reset)?
        .set_state(Light::Green);

    Ok(builder)
}

fn main() -> Result<(), FsmError> {
    init_logging();

    let mut machine = build()?.create_state_machine_with_start(true)?;
    let script = [
        Signal::SwitchNext,
        Signal::SwitchNext,
        Signal::Reset,
        Signal::SwitchNext,
        Signal::SwitchNext,
        Signal::Reset,
    ];

    for signal in script {
        match machine.trigger_command(signal) {
            Ok(()) => println!("{:?} -> {:?}", signal, machine.current_state()?),
            Err(err @ FsmError::CommandNotSupported { .. }) => warn!(%err, "ignored"),
            Err(err) => return Err(err),
        }
    }

    Ok(())
}
