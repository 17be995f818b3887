//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod controller;
pub mod input_rx;
pub mod notify_tx;

pub use controller::controller_task;
pub use input_rx::input_rx_task;
pub use notify_tx::notify_tx_task;
