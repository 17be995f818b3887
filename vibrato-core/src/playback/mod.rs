//! Playback engine
//!
//! Steps through the selected pattern while the session is active. The
//! engine never sleeps: [`Playback::poll`] performs one step and returns
//! how long to wait before the next call. [`run_blocking`] drives it with a
//! delay provider for callers without a timer.

pub mod blocking;
pub mod engine;

pub use blocking::run_blocking;
pub use engine::{Abort, Playback, Tick, FLOOR_MS};
