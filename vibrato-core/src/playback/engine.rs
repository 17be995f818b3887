//! Timer-driven playback

use crate::catalog::PatternEntry;
use crate::state::{InputMachine, Phase};
use crate::traits::HapticActuator;

/// Pause between passes; also the smallest budget worth another pass
pub const FLOOR_MS: u32 = 500;

/// Why playback gave up on the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Abort {
    /// Selected pattern has no steps
    EmptyPattern,
    /// Selected pattern is not in the catalog
    UnknownPattern,
}

/// Result of one [`Playback::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Poll again after this many milliseconds
    Hold(u32),
    /// Nothing to play
    Idle,
    /// Budget exhausted; the session is back in Idle with the completion
    /// flag raised
    Completed,
    /// Session reset without playing
    Aborted(Abort),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Next poll begins a pass
    Start,
    /// Step `n` is being held
    Step(usize),
}

/// Playback cursor over the active session
#[derive(Debug, Clone)]
pub struct Playback {
    cursor: Cursor,
    faults: u32,
}

impl Default for Playback {
    fn default() -> Self {
        Self::new()
    }
}

impl Playback {
    pub fn new() -> Self {
        Self {
            cursor: Cursor::Start,
            faults: 0,
        }
    }

    /// Forget any pass in progress; the next poll starts from the first step
    pub fn restart(&mut self) {
        self.cursor = Cursor::Start;
    }

    /// Actuator commands that failed since construction
    pub fn faults(&self) -> u32 {
        self.faults
    }

    /// Advance playback by one step
    ///
    /// Each step's duration is charged to the session budget when the step
    /// starts, capped at what is left. After the last step the actuator is
    /// stopped; a budget below [`FLOOR_MS`] completes the session, otherwise
    /// the floor is charged and held before the next pass. A pass that would
    /// start with nothing left completes instead.
    pub fn poll<A: HapticActuator>(&mut self, machine: &mut InputMachine, actuator: &mut A) -> Tick {
        if machine.phase() != Phase::Active {
            self.cursor = Cursor::Start;
            return Tick::Idle;
        }

        let entry = match machine
            .session()
            .selected_pattern()
            .and_then(|id| machine.catalog().get(id))
        {
            Some(entry) => entry,
            None => return self.abort(machine, actuator, Abort::UnknownPattern),
        };
        if entry.steps.is_empty() {
            return self.abort(machine, actuator, Abort::EmptyPattern);
        }

        match self.cursor {
            Cursor::Start => {
                // The floor hold used up the budget
                if machine.session().remaining_activity_ms() == 0 {
                    self.command(actuator, 0);
                    machine.session_mut().complete();
                    return Tick::Completed;
                }
                self.play_step(machine, actuator, entry, 0)
            }
            Cursor::Step(n) => {
                let next = n + 1;
                if machine.session().remaining_activity_ms() == 0 || next >= entry.steps.len() {
                    self.end_pass(machine, actuator)
                } else {
                    self.play_step(machine, actuator, entry, next)
                }
            }
        }
    }

    fn play_step<A: HapticActuator>(
        &mut self,
        machine: &mut InputMachine,
        actuator: &mut A,
        entry: &PatternEntry,
        n: usize,
    ) -> Tick {
        let step = entry.steps[n];
        self.command(actuator, step.intensity_percent);
        let held = machine.session_mut().consume(u32::from(step.duration_ms));
        self.cursor = Cursor::Step(n);
        Tick::Hold(held)
    }

    fn end_pass<A: HapticActuator>(&mut self, machine: &mut InputMachine, actuator: &mut A) -> Tick {
        self.command(actuator, 0);
        self.cursor = Cursor::Start;

        let session = machine.session_mut();
        if session.remaining_activity_ms() < FLOOR_MS {
            session.complete();
            Tick::Completed
        } else {
            Tick::Hold(session.consume(FLOOR_MS))
        }
    }

    fn abort<A: HapticActuator>(
        &mut self,
        machine: &mut InputMachine,
        actuator: &mut A,
        reason: Abort,
    ) -> Tick {
        self.command(actuator, 0);
        self.cursor = Cursor::Start;
        machine.session_mut().complete();
        Tick::Aborted(reason)
    }

    fn command<A: HapticActuator>(&mut self, actuator: &mut A, percent: u8) {
        let result = if percent == 0 {
            actuator.stop()
        } else {
            actuator.set_intensity(percent)
        };
        if result.is_err() {
            self.faults = self.faults.saturating_add(1);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::catalog::{Catalog, PatternStep};
    use crate::state::{BootStatus, Input};
    use proptest::prelude::*;

    /// Records every intensity command; optionally fails them all
    #[derive(Default)]
    pub(crate) struct MockActuator {
        pub commands: std::vec::Vec<u8>,
        pub fail: bool,
    }

    impl HapticActuator for MockActuator {
        type Error = ();

        fn set_intensity(&mut self, percent: u8) -> Result<(), ()> {
            self.commands.push(percent);
            if self.fail {
                Err(())
            } else {
                Ok(())
            }
        }
    }

    static SHORT: [PatternStep; 1] = [PatternStep::new(80, 500)];
    static DOUBLE: [PatternStep; 2] = [PatternStep::new(50, 300), PatternStep::new(50, 300)];
    static LONG: [PatternStep; 2] = [PatternStep::new(100, 2000), PatternStep::new(30, 100)];
    static TABLE: [PatternEntry; 5] = [
        PatternEntry {
            weight_class: 60,
            steps: &SHORT,
        },
        PatternEntry {
            weight_class: 10,
            steps: &[],
        },
        PatternEntry {
            weight_class: 60,
            steps: &DOUBLE,
        },
        PatternEntry {
            weight_class: 20,
            steps: &LONG,
        },
        PatternEntry {
            weight_class: 30,
            steps: &DOUBLE,
        },
    ];

    pub(crate) fn armed(weight: u8, pattern: u8, seconds: u8) -> InputMachine {
        let mut m = InputMachine::new(Catalog::new(&TABLE));
        m.set_boot_status(BootStatus::Ready);
        m.handle(Input::Weight(weight));
        m.handle(Input::Pattern(pattern));
        m.handle(Input::Duration(seconds));
        m
    }

    #[test]
    fn test_one_second_double_tap_completes_in_one_pass() {
        let mut m = armed(60, 2, 1);
        let mut act = MockActuator::default();
        let mut pb = Playback::new();

        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(300));
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(300));
        assert_eq!(m.session().remaining_activity_ms(), 400);
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Completed);

        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.session().candidate_patterns().is_empty());
        assert_eq!(m.session().selected_pattern(), None);
        assert!(m.take_activity_completed());
        assert_eq!(act.commands, [50, 50, 0]);
    }

    #[test]
    fn test_floor_hold_between_passes() {
        let mut m = armed(60, 0, 2);
        let mut act = MockActuator::default();
        let mut pb = Playback::new();

        // 2000 -> 1500 after the step, -> 1000 after the floor
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(500));
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(FLOOR_MS));
        assert_eq!(m.session().remaining_activity_ms(), 1000);
        assert_eq!(m.phase(), Phase::Active);

        // 1000 -> 500 -> 0, then the next tick completes
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(500));
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(FLOOR_MS));
        assert_eq!(m.session().remaining_activity_ms(), 0);
        assert_eq!(m.phase(), Phase::Active);
        assert!(!m.session().activity_completed());

        assert_eq!(pb.poll(&mut m, &mut act), Tick::Completed);
        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.session().candidate_patterns().is_empty());
        assert!(m.take_activity_completed());
        assert_eq!(act.commands.last(), Some(&0));
    }

    #[test]
    fn test_long_step_truncated_to_budget() {
        let mut m = armed(20, 3, 1);
        let mut act = MockActuator::default();
        let mut pb = Playback::new();

        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(1000));
        assert_eq!(m.session().remaining_activity_ms(), 0);
        // Remaining steps are skipped once the budget is gone
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Completed);
        assert_eq!(act.commands, [100, 0]);
    }

    #[test]
    fn test_empty_pattern_aborts() {
        let mut m = armed(10, 1, 5);
        assert_eq!(m.phase(), Phase::Active);
        let mut act = MockActuator::default();
        let mut pb = Playback::new();

        assert_eq!(pb.poll(&mut m, &mut act), Tick::Aborted(Abort::EmptyPattern));
        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.take_activity_completed());
        assert_eq!(act.commands, [0]);
    }

    #[test]
    fn test_idle_when_not_active() {
        let mut m = InputMachine::new(Catalog::new(&TABLE));
        let mut act = MockActuator::default();
        let mut pb = Playback::new();
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Idle);
        assert!(act.commands.is_empty());
    }

    #[test]
    fn test_faults_counted_timeline_continues() {
        let mut m = armed(60, 2, 1);
        let mut act = MockActuator {
            fail: true,
            ..Default::default()
        };
        let mut pb = Playback::new();

        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(300));
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(300));
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Completed);
        assert_eq!(pb.faults(), 3);
    }

    #[test]
    fn test_restart_after_external_reset() {
        let mut m = armed(60, 2, 3);
        let mut act = MockActuator::default();
        let mut pb = Playback::new();
        pb.poll(&mut m, &mut act);

        m.handle(Input::Reset);
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Idle);

        m.handle(Input::Weight(30));
        m.handle(Input::Pattern(4));
        m.handle(Input::Duration(1));
        pb.restart();
        assert_eq!(pb.poll(&mut m, &mut act), Tick::Hold(300));
        assert_eq!(m.session().selected_pattern(), Some(4));
    }

    proptest! {
        #[test]
        fn test_budget_monotonic_until_idle(
            (weight, pattern) in prop_oneof![
                Just((60u8, 0u8)),
                Just((60, 2)),
                Just((20, 3)),
                Just((30, 4)),
            ],
            seconds in 1u8..=30,
        ) {
            let mut m = armed(weight, pattern, seconds);
            let mut act = MockActuator::default();
            let mut pb = Playback::new();
            let mut last = m.session().remaining_activity_ms();
            prop_assert_eq!(last, u32::from(seconds) * 1000);

            let mut spent = 0u32;
            loop {
                let tick = pb.poll(&mut m, &mut act);
                let now = m.session().remaining_activity_ms();
                prop_assert!(now <= last);
                last = now;
                match tick {
                    Tick::Hold(ms) => spent += ms,
                    Tick::Completed => {
                        prop_assert!(m.session().activity_completed());
                        prop_assert_eq!(m.phase(), Phase::Idle);
                        prop_assert!(m.session().candidate_patterns().is_empty());
                        break;
                    }
                    Tick::Idle => prop_assert!(false, "idle before completion"),
                    Tick::Aborted(_) => prop_assert!(false, "unexpected abort"),
                }
            }
            prop_assert_eq!(last, 0);
            prop_assert!(spent <= u32::from(seconds) * 1000);
            prop_assert_eq!(act.commands.last(), Some(&0));
        }
    }
}
