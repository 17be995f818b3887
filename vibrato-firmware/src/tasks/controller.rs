//! Main controller task
//!
//! Owns the input state machine, the playback cursor and the DA7280.
//! Wakes on input commands, on the boot retry deadline and on playback
//! step deadlines; everything else is idle time.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Timer};

use vibrato_core::config::HapticConfig;
use vibrato_core::playback::{Playback, Tick};
use vibrato_core::state::{BootStatus, Input, InputMachine};
use vibrato_protocol::Response;

use crate::channels::{INPUT_CHANNEL, RESPONSE_CHANNEL};
use crate::HapticDriver;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(mut driver: HapticDriver, config: HapticConfig) {
    info!("Controller task started");

    let mut machine = InputMachine::default();
    let mut playback = Playback::new();

    let retry = Duration::from_millis(u64::from(config.boot.retry_ms));
    let mut next_boot = Some(Instant::now());
    let mut next_tick: Option<Instant> = None;

    loop {
        let deadline = earliest(next_boot, next_tick);

        match select(INPUT_CHANNEL.receive(), wait_until(deadline)).await {
            Either::First(command) => {
                let input = Input::from(command);
                debug!("Input: {:?} in {:?}", input, machine.phase());

                if let Some(response) = machine.handle(input) {
                    if let Response::ActivityStarted { seconds } = response {
                        info!("Activity started for {} s", seconds);
                        playback.restart();
                        next_tick = Some(Instant::now());
                    }
                    send(response);
                }
            }

            Either::Second(()) => {
                let now = Instant::now();

                if next_boot.is_some_and(|at| at <= now) {
                    next_boot = boot(&mut driver, &mut machine, &config).then(|| now + retry);
                }

                if let Some(at) = next_tick.filter(|at| *at <= now) {
                    next_tick = step(&mut driver, &mut machine, &mut playback, at);
                }
            }
        }
    }
}

/// Run the boot sequence; returns true if it should be retried
fn boot(driver: &mut HapticDriver, machine: &mut InputMachine, config: &HapticConfig) -> bool {
    match driver.boot(config) {
        Ok(()) => {
            info!("DA7280 ready ({:?})", config.boot.operation_mode);
            machine.set_boot_status(BootStatus::Ready);
            false
        }
        Err(e) => {
            error!("DA7280 boot failed: {:?}, retrying in {} ms", e, config.boot.retry_ms);
            machine.set_boot_status(BootStatus::Failed);
            true
        }
    }
}

/// Advance playback by one step; returns the next step deadline
fn step(
    driver: &mut HapticDriver,
    machine: &mut InputMachine,
    playback: &mut Playback,
    scheduled: Instant,
) -> Option<Instant> {
    match playback.poll(machine, driver) {
        Tick::Hold(ms) => {
            trace!("Hold {} ms", ms);
            Some(scheduled + Duration::from_millis(u64::from(ms)))
        }
        Tick::Idle => None,
        Tick::Completed => {
            info!("Activity completed");
            finish(driver, machine, playback);
            None
        }
        Tick::Aborted(reason) => {
            warn!("Activity aborted: {:?}", reason);
            finish(driver, machine, playback);
            None
        }
    }
}

/// Notify completion and check the driver for latched faults
fn finish(driver: &mut HapticDriver, machine: &mut InputMachine, playback: &Playback) {
    if machine.take_activity_completed() {
        send(Response::ActivityEnded);
    }

    if playback.faults() > 0 {
        warn!("{} actuator commands failed so far", playback.faults());
    }

    match driver.irq_events() {
        Ok(events) if !events.is_empty() => {
            if events.has_fault() {
                warn!("DA7280 fault events: {:?}", events);
            } else {
                debug!("DA7280 events: {:?}", events);
            }
            if let Err(e) = driver.clear_irq(events) {
                warn!("Failed to clear DA7280 events: {:?}", e);
            }
        }
        Ok(_) => {}
        Err(e) => warn!("Failed to read DA7280 events: {:?}", e),
    }
}

/// Queue a response for the transmit task, dropping it if the queue is full
fn send(response: Response) {
    if RESPONSE_CHANNEL.try_send(response).is_err() {
        warn!("Response channel full, dropping response");
    }
}

fn earliest(a: Option<Instant>, b: Option<Instant>) -> Option<Instant> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, None) => a,
        (None, b) => b,
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(at) => Timer::at(at).await,
        None => core::future::pending().await,
    }
}
