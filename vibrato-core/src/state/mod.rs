//! Input interpretation state machine
//!
//! Turns a stream of `(kind, value)` inputs into a validated playback plan.
//! The machine is explicit, finite and deterministic: every input produces
//! at most one [`Response`](vibrato_protocol::Response) and protocol
//! mismatches are answered, never raised as errors.

pub mod events;
pub mod machine;
pub mod session;

pub use events::Input;
pub use machine::{BootStatus, InputMachine};
pub use session::{Phase, SessionState, MAX_CANDIDATES};
