//! Command link receive task
//!
//! Splits UART bytes into lines and forwards well-formed inputs.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use vibrato_protocol::{LineParser, Response};

use crate::channels::{INPUT_CHANNEL, RESPONSE_CHANNEL};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Input RX task - receives and parses command lines
#[embassy_executor::task]
pub async fn input_rx_task(mut rx: BufferedUartRx) {
    info!("Input RX task started");

    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Some(Ok(command)) => {
                            debug!("Input: {:?}", command);
                            if INPUT_CHANNEL.try_send(command).is_err() {
                                warn!("Input channel full, dropping command");
                            }
                        }
                        Some(Err(e)) => {
                            warn!("Line parse error: {:?}", e);
                            if RESPONSE_CHANNEL.try_send(Response::InvalidValue).is_err() {
                                warn!("Response channel full, dropping response");
                            }
                        }
                        None => {
                            // Need more bytes
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
