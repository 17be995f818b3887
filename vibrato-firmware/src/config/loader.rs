//! Embedded configuration loader

use defmt::*;

use vibrato_core::config::{parse_config, HapticConfig};

/// Embedded configuration (compiled into firmware)
/// Edit haptic.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../../haptic.toml");

/// Parse the embedded configuration, falling back to defaults on error
pub fn load() -> HapticConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!("Loaded embedded configuration");
            config
        }
        Err(e) => {
            warn!(
                "haptic.toml line {}: {:?}, using defaults",
                e.line, e.kind
            );
            HapticConfig::default()
        }
    }
}
