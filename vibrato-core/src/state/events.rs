//! Inputs that drive the session

use vibrato_protocol::{InputCommand, InputKind};

/// One input to the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Input {
    /// Actuator weight class
    Weight(u8),
    /// Pattern identifier
    Pattern(u8),
    /// Activity duration in seconds
    Duration(u8),
    /// Internal signal ending an active session
    Reset,
}

impl Input {
    /// Whether the input came from outside (transport) rather than playback
    pub fn is_external(&self) -> bool {
        !matches!(self, Input::Reset)
    }
}

impl From<InputCommand> for Input {
    fn from(cmd: InputCommand) -> Self {
        match cmd.kind {
            InputKind::Weight => Input::Weight(cmd.value),
            InputKind::Pattern => Input::Pattern(cmd.value),
            InputKind::Duration => Input::Duration(cmd.value),
        }
    }
}
