//! Blocking playback runner
//!
//! Plays the active session to the end, sleeping inline between steps.
//! Nothing else can run meanwhile, so this is only suitable for callers
//! that have no timer or event loop.

use embedded_hal::delay::DelayNs;

use super::engine::{Playback, Tick};
use crate::state::InputMachine;
use crate::traits::HapticActuator;

/// Run playback until it stops holding
///
/// Returns the final tick: [`Tick::Completed`], [`Tick::Idle`] or
/// [`Tick::Aborted`].
pub fn run_blocking<A, D>(machine: &mut InputMachine, actuator: &mut A, delay: &mut D) -> Tick
where
    A: HapticActuator,
    D: DelayNs,
{
    let mut playback = Playback::new();
    loop {
        match playback.poll(machine, actuator) {
            Tick::Hold(ms) => delay.delay_ms(ms),
            done => return done,
        }
    }
}
