//! Command link transmit task
//!
//! Renders responses and notifications as text lines.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::RESPONSE_CHANNEL;

/// Notify TX task - sends one line per response
#[embassy_executor::task]
pub async fn notify_tx_task(mut tx: BufferedUartTx) {
    info!("Notify TX task started");

    loop {
        let response = RESPONSE_CHANNEL.receive().await;
        let text = response.render();

        if let Err(e) = tx.write_all(text.as_bytes()).await {
            warn!("Failed to send response: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(b"\r\n").await {
            warn!("Failed to send line terminator: {:?}", e);
        } else {
            trace!("Response sent: {}", text.as_str());
        }
    }
}
