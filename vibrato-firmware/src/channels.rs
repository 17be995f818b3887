//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use vibrato_protocol::{InputCommand, Response};

/// Channel capacity for parsed input commands
const INPUT_CHANNEL_SIZE: usize = 8;

/// Channel capacity for outgoing responses
const RESPONSE_CHANNEL_SIZE: usize = 8;

/// Input commands parsed from the command link
pub static INPUT_CHANNEL: Channel<CriticalSectionRawMutex, InputCommand, INPUT_CHANNEL_SIZE> =
    Channel::new();

/// Responses and notifications to send back over the command link
pub static RESPONSE_CHANNEL: Channel<CriticalSectionRawMutex, Response, RESPONSE_CHANNEL_SIZE> =
    Channel::new();
