//! Mutable session state
//!
//! Owned by the [`InputMachine`](super::InputMachine); the playback engine
//! mutates it through crate-private methods. Nothing outside this crate can
//! change it.

use heapless::Vec;
use vibrato_protocol::Expected;

/// Candidate set capacity; every addressable pattern identifier fits
pub const MAX_CANDIDATES: usize = 256;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Phase {
    /// Waiting for a weight
    #[default]
    Idle,
    /// Weight accepted, waiting for a pattern
    WeightReceived,
    /// Pattern accepted, waiting for a duration
    PatternReceived,
    /// Playback running
    Active,
}

impl Phase {
    /// Numeric code reported in "ignored" responses
    ///
    /// Code 3 is unused; the codes stay stable for existing clients.
    pub fn code(self) -> u8 {
        match self {
            Phase::Idle => 0,
            Phase::WeightReceived => 1,
            Phase::PatternReceived => 2,
            Phase::Active => 4,
        }
    }

    /// What the session is waiting for in this phase
    pub fn expected(self) -> Expected {
        match self {
            Phase::Idle => Expected::Weight,
            Phase::WeightReceived => Expected::Pattern,
            Phase::PatternReceived => Expected::Duration,
            Phase::Active => Expected::Completion,
        }
    }
}

/// Session state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SessionState {
    phase: Phase,
    selected_weight: Option<u8>,
    candidate_patterns: Vec<u8, MAX_CANDIDATES>,
    selected_pattern: Option<u8>,
    remaining_activity_ms: u32,
    activity_completed: bool,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn selected_weight(&self) -> Option<u8> {
        self.selected_weight
    }

    /// Patterns compatible with the latest accepted weight
    pub fn candidate_patterns(&self) -> &[u8] {
        &self.candidate_patterns
    }

    pub fn selected_pattern(&self) -> Option<u8> {
        self.selected_pattern
    }

    pub fn remaining_activity_ms(&self) -> u32 {
        self.remaining_activity_ms
    }

    /// Peek at the completion flag without clearing it
    pub fn activity_completed(&self) -> bool {
        self.activity_completed
    }

    /// Observe and clear the completion flag
    pub fn take_activity_completed(&mut self) -> bool {
        core::mem::take(&mut self.activity_completed)
    }

    /// Return to Idle, clearing everything except the completion flag
    pub(crate) fn reset(&mut self) {
        self.phase = Phase::Idle;
        self.selected_weight = None;
        self.candidate_patterns.clear();
        self.selected_pattern = None;
        self.remaining_activity_ms = 0;
    }

    /// Reset and raise the completion flag
    pub(crate) fn complete(&mut self) {
        self.reset();
        self.activity_completed = true;
    }

    pub(crate) fn accept_weight(&mut self, weight: u8, candidates: Vec<u8, MAX_CANDIDATES>) {
        self.phase = Phase::WeightReceived;
        self.selected_weight = Some(weight);
        self.candidate_patterns = candidates;
    }

    pub(crate) fn accept_pattern(&mut self, pattern: u8) {
        self.phase = Phase::PatternReceived;
        self.selected_pattern = Some(pattern);
    }

    pub(crate) fn arm(&mut self, seconds: u8) {
        self.phase = Phase::Active;
        self.remaining_activity_ms = u32::from(seconds) * 1000;
    }

    /// Take up to `ms` from the budget, returning how much was taken
    pub(crate) fn consume(&mut self, ms: u32) -> u32 {
        let taken = ms.min(self.remaining_activity_ms);
        self.remaining_activity_ms -= taken;
        taken
    }
}
