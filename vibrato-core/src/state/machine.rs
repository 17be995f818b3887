//! Input interpretation
//!
//! | Phase           | Accepted input | Next phase                         |
//! |-----------------|----------------|------------------------------------|
//! | Idle            | Weight         | WeightReceived (if any pattern matches) |
//! | WeightReceived  | Pattern        | PatternReceived (if a candidate)   |
//! | PatternReceived | Duration > 0   | Active                             |
//! | Active          | Reset          | Idle                               |
//!
//! Any other input leaves the phase unchanged and is answered with
//! [`Response::Ignored`].

use heapless::Vec;
use vibrato_protocol::{Response, MAX_LISTED_PATTERNS};

use super::events::Input;
use super::session::{Phase, SessionState, MAX_CANDIDATES};
use crate::catalog::Catalog;

/// Actuator boot state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStatus {
    /// Boot sequence has not run yet
    #[default]
    Pending,
    /// Actuator configured, inputs are processed
    Ready,
    /// Last boot attempt failed; a retry may follow
    Failed,
}

impl BootStatus {
    pub fn is_ready(self) -> bool {
        self == BootStatus::Ready
    }
}

/// The input state machine and the session it owns
#[derive(Debug, Clone)]
pub struct InputMachine {
    catalog: Catalog,
    session: SessionState,
    boot: BootStatus,
}

impl Default for InputMachine {
    fn default() -> Self {
        Self::new(Catalog::DEFAULT)
    }
}

impl InputMachine {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            session: SessionState::new(),
            boot: BootStatus::Pending,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub(crate) fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    pub fn boot_status(&self) -> BootStatus {
        self.boot
    }

    pub fn set_boot_status(&mut self, status: BootStatus) {
        self.boot = status;
    }

    /// Observe and clear the completion flag
    pub fn take_activity_completed(&mut self) -> bool {
        self.session.take_activity_completed()
    }

    /// Process one input
    ///
    /// Returns the response to send back, or `None` for the internal reset
    /// signal which is never answered.
    pub fn handle(&mut self, input: Input) -> Option<Response> {
        if !self.boot.is_ready() {
            return input.is_external().then_some(Response::NotInitialized);
        }

        let phase = self.session.phase();
        let response = match (phase, input) {
            (Phase::Active, Input::Reset) => {
                self.session.reset();
                return None;
            }
            (_, Input::Reset) => return None,

            (Phase::Idle, Input::Weight(weight)) => self.accept_weight(weight),

            (Phase::WeightReceived, Input::Pattern(pattern)) => {
                if self.session.candidate_patterns().contains(&pattern) {
                    self.session.accept_pattern(pattern);
                    Response::PatternSelected { pattern }
                } else {
                    Response::PatternUnavailable { pattern }
                }
            }

            (Phase::PatternReceived, Input::Duration(0)) => Response::DurationRejected,
            (Phase::PatternReceived, Input::Duration(seconds)) => {
                self.session.arm(seconds);
                Response::ActivityStarted { seconds }
            }

            (phase, _) => Response::Ignored {
                state: phase.code(),
                expected: phase.expected(),
            },
        };
        Some(response)
    }

    /// The session keeps every match; the response lists at most
    /// [`MAX_LISTED_PATTERNS`] of them.
    fn accept_weight(&mut self, weight: u8) -> Response {
        // `matching` yields at most 256 identifiers, so this never overflows
        let candidates: Vec<u8, MAX_CANDIDATES> = self.catalog.matching(weight).collect();

        if candidates.is_empty() {
            return Response::NoPatterns { weight };
        }

        let patterns = candidates.iter().copied().take(MAX_LISTED_PATTERNS).collect();
        self.session.accept_weight(weight, candidates);
        Response::PatternsAvailable { patterns }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{PatternEntry, PatternStep};
    use proptest::prelude::*;
    use vibrato_protocol::Expected;

    static SHORT: [PatternStep; 1] = [PatternStep::new(80, 500)];
    static DOUBLE: [PatternStep; 2] = [PatternStep::new(50, 300), PatternStep::new(50, 300)];
    static TABLE: [PatternEntry; 3] = [
        PatternEntry {
            weight_class: 60,
            steps: &SHORT,
        },
        PatternEntry {
            weight_class: 40,
            steps: &SHORT,
        },
        PatternEntry {
            weight_class: 60,
            steps: &DOUBLE,
        },
    ];

    fn ready_machine() -> InputMachine {
        let mut m = InputMachine::new(Catalog::new(&TABLE));
        m.set_boot_status(BootStatus::Ready);
        m
    }

    fn ids(list: &[u8]) -> Vec<u8, 32> {
        Vec::from_slice(list).unwrap()
    }

    #[test]
    fn test_not_initialized() {
        let mut m = InputMachine::new(Catalog::new(&TABLE));
        assert_eq!(m.handle(Input::Weight(60)), Some(Response::NotInitialized));
        assert_eq!(m.handle(Input::Reset), None);
        assert_eq!(m.phase(), Phase::Idle);

        m.set_boot_status(BootStatus::Failed);
        assert_eq!(m.handle(Input::Duration(3)), Some(Response::NotInitialized));
        assert_eq!(m.phase(), Phase::Idle);
    }

    #[test]
    fn test_full_flow() {
        let mut m = ready_machine();

        assert_eq!(
            m.handle(Input::Weight(60)),
            Some(Response::PatternsAvailable {
                patterns: ids(&[0, 2])
            })
        );
        assert_eq!(m.phase(), Phase::WeightReceived);

        assert_eq!(
            m.handle(Input::Pattern(2)),
            Some(Response::PatternSelected { pattern: 2 })
        );
        assert_eq!(m.phase(), Phase::PatternReceived);

        assert_eq!(
            m.handle(Input::Duration(1)),
            Some(Response::ActivityStarted { seconds: 1 })
        );
        assert_eq!(m.phase(), Phase::Active);
        assert_eq!(m.session().remaining_activity_ms(), 1000);
    }

    #[test]
    fn test_no_patterns_stays_idle() {
        let mut m = ready_machine();
        assert_eq!(
            m.handle(Input::Weight(99)),
            Some(Response::NoPatterns { weight: 99 })
        );
        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.session().candidate_patterns().is_empty());
    }

    #[test]
    fn test_pattern_not_in_candidates() {
        let mut m = ready_machine();
        m.handle(Input::Weight(40));
        assert_eq!(
            m.handle(Input::Pattern(0)),
            Some(Response::PatternUnavailable { pattern: 0 })
        );
        assert_eq!(m.phase(), Phase::WeightReceived);
        assert_eq!(
            m.handle(Input::Pattern(1)),
            Some(Response::PatternSelected { pattern: 1 })
        );
    }

    #[test]
    fn test_membership_uses_latest_weight() {
        let mut m = ready_machine();
        m.handle(Input::Weight(60));
        m.handle(Input::Pattern(0));
        m.handle(Input::Duration(3));
        m.handle(Input::Reset);
        assert_eq!(m.phase(), Phase::Idle);

        m.handle(Input::Weight(40));
        assert_eq!(m.session().candidate_patterns(), &[1]);
        assert_eq!(
            m.handle(Input::Pattern(0)),
            Some(Response::PatternUnavailable { pattern: 0 })
        );
        assert_eq!(m.phase(), Phase::WeightReceived);
    }

    #[test]
    fn test_candidates_beyond_listed_limit() {
        static WIDE: [PatternEntry; 40] = [PatternEntry {
            weight_class: 5,
            steps: &SHORT,
        }; 40];
        let mut m = InputMachine::new(Catalog::new(&WIDE));
        m.set_boot_status(BootStatus::Ready);

        match m.handle(Input::Weight(5)) {
            Some(Response::PatternsAvailable { patterns }) => {
                assert_eq!(patterns.len(), MAX_LISTED_PATTERNS);
                assert_eq!(patterns[0], 0);
            }
            other => panic!("unexpected response {:?}", other),
        }
        assert_eq!(m.session().candidate_patterns().len(), 40);

        // Not listed, but still a valid choice
        assert_eq!(
            m.handle(Input::Pattern(39)),
            Some(Response::PatternSelected { pattern: 39 })
        );
    }

    #[test]
    fn test_zero_duration_rejected() {
        let mut m = ready_machine();
        m.handle(Input::Weight(60));
        m.handle(Input::Pattern(0));
        assert_eq!(m.handle(Input::Duration(0)), Some(Response::DurationRejected));
        assert_eq!(m.phase(), Phase::PatternReceived);
    }

    #[test]
    fn test_wrong_kind_ignored() {
        let mut m = ready_machine();
        assert_eq!(
            m.handle(Input::Pattern(0)),
            Some(Response::Ignored {
                state: 0,
                expected: Expected::Weight
            })
        );

        m.handle(Input::Weight(60));
        assert_eq!(
            m.handle(Input::Weight(60)),
            Some(Response::Ignored {
                state: 1,
                expected: Expected::Pattern
            })
        );

        m.handle(Input::Pattern(0));
        m.handle(Input::Duration(5));
        assert_eq!(
            m.handle(Input::Weight(60)),
            Some(Response::Ignored {
                state: 4,
                expected: Expected::Completion
            })
        );
        assert_eq!(m.phase(), Phase::Active);
    }

    #[test]
    fn test_reset_only_in_active() {
        let mut m = ready_machine();
        m.handle(Input::Weight(60));
        assert_eq!(m.handle(Input::Reset), None);
        assert_eq!(m.phase(), Phase::WeightReceived);

        m.handle(Input::Pattern(2));
        m.handle(Input::Duration(9));
        assert_eq!(m.handle(Input::Reset), None);
        assert_eq!(m.phase(), Phase::Idle);
        assert!(m.session().candidate_patterns().is_empty());
        assert_eq!(m.session().selected_pattern(), None);
        assert_eq!(m.session().remaining_activity_ms(), 0);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Weight(u8),
        Pattern(u8),
        Duration(u8),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            prop_oneof![Just(40u8), Just(60u8), any::<u8>()].prop_map(Op::Weight),
            (0u8..4).prop_map(Op::Pattern),
            any::<u8>().prop_map(Op::Duration),
        ]
    }

    fn apply(m: &mut InputMachine, op: &Op) -> Option<Response> {
        match *op {
            Op::Weight(v) => m.handle(Input::Weight(v)),
            Op::Pattern(v) => m.handle(Input::Pattern(v)),
            Op::Duration(v) => m.handle(Input::Duration(v)),
        }
    }

    proptest! {
        #[test]
        fn test_weight_lists_exact_matches(weight in any::<u8>()) {
            let mut m = ready_machine();
            let expected: std::vec::Vec<u8> = Catalog::new(&TABLE).matching(weight).collect();
            let response = m.handle(Input::Weight(weight));

            if expected.is_empty() {
                prop_assert_eq!(response, Some(Response::NoPatterns { weight }));
                prop_assert_eq!(m.phase(), Phase::Idle);
            } else {
                prop_assert_eq!(
                    response,
                    Some(Response::PatternsAvailable { patterns: ids(&expected) })
                );
                prop_assert_eq!(m.phase(), Phase::WeightReceived);
                prop_assert_eq!(m.session().candidate_patterns(), &expected[..]);
            }
        }

        #[test]
        fn test_candidates_never_populated_in_idle(ops in proptest::collection::vec(op(), 0..40)) {
            let mut m = ready_machine();
            for op in &ops {
                apply(&mut m, op);
                if m.phase() == Phase::Idle {
                    prop_assert!(m.session().candidate_patterns().is_empty());
                }
                if let Some(p) = m.session().selected_pattern() {
                    prop_assert!(m.session().candidate_patterns().contains(&p));
                }
            }
        }

        #[test]
        fn test_valid_sequence_reaches_active(
            noise in proptest::collection::vec(op(), 0..20),
            pick in 0usize..2,
            seconds in 1u8..=255,
        ) {
            let mut m = ready_machine();
            for op in &noise {
                apply(&mut m, op);
            }
            // Drop whatever the noise left behind
            m.handle(Input::Reset);
            if m.phase() != Phase::Idle {
                // Finish a half-entered session so it can be reset
                if m.phase() == Phase::WeightReceived {
                    let first = m.session().candidate_patterns()[0];
                    m.handle(Input::Pattern(first));
                }
                m.handle(Input::Duration(1));
                m.handle(Input::Reset);
            }
            prop_assert_eq!(m.phase(), Phase::Idle);

            let pattern = [0u8, 2][pick];
            m.handle(Input::Weight(60));
            m.handle(Input::Pattern(pattern));
            m.handle(Input::Duration(seconds));

            prop_assert_eq!(m.phase(), Phase::Active);
            prop_assert_eq!(m.session().selected_weight(), Some(60));
            prop_assert_eq!(m.session().selected_pattern(), Some(pattern));
            prop_assert_eq!(m.session().remaining_activity_ms(), u32::from(seconds) * 1000);
        }
    }
}
