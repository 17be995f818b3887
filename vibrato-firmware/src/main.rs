//! Vibrato - Haptic Controller Firmware
//!
//! Main firmware binary for RP2040 boards driving a DA7280 haptic driver.
//! Commands arrive as text lines on UART0; the actuator sits on I2C0.
//!
//! ```text
//! UART0 RX ──► input_rx ──► INPUT_CHANNEL ──► controller ──► DA7280 (I2C0)
//! UART0 TX ◄── notify_tx ◄── RESPONSE_CHANNEL ◄───┘
//! ```

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{Blocking, Config as I2cPeripheralConfig, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Duration, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use vibrato_drivers::da7280::Da7280;
use vibrato_hal::i2c::{EmbeddedHalI2c, I2cConfig};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

/// DA7280 on the blocking RP2040 I2C0 peripheral
pub type HapticDriver = Da7280<EmbeddedHalI2c<I2c<'static, I2C0, Blocking>>>;

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Vibrato firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Embedded configuration (validated by build.rs)
    let config = config::load();
    info!(
        "Actuator: {:?}, {} V nominal, {} Hz",
        config.actuator.motor_type,
        config.actuator.nominal_voltage,
        config.actuator.resonant_frequency_hz
    );

    // Setup I2C0 for the haptic driver
    // Pin assignment is board-specific (Pico: SDA=GPIO4, SCL=GPIO5)
    let mut i2c_config = I2cPeripheralConfig::default();
    i2c_config.frequency = I2cConfig::FAST.frequency;
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let driver: HapticDriver = Da7280::new(EmbeddedHalI2c::new(i2c));

    info!("I2C initialized for DA7280");

    // Setup UART for the command link
    let uart_config = UartConfig::default(); // 115200 baud default

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for command link");

    // Spawn tasks
    spawner.spawn(tasks::input_rx_task(rx)).unwrap();
    spawner.spawn(tasks::notify_tx_task(tx)).unwrap();
    spawner.spawn(tasks::controller_task(driver, config)).unwrap();

    info!("All tasks spawned");

    // Main loop - just keep alive
    let mut ticker = Ticker::every(Duration::from_secs(10));
    loop {
        ticker.next().await;
        trace!("Heartbeat");
    }
}
