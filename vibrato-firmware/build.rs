//! Build script for vibrato-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates haptic.toml at compile time

use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn main() {
    setup_linker();
    validate_config();
}

/// Set up linker search paths and scripts for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Validate haptic.toml at compile time
fn validate_config() {
    println!("cargo:rerun-if-changed=haptic.toml");

    let config_path = Path::new("haptic.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: haptic.toml not found!                                   ║\n\
            ║                                                                  ║\n\
            ║  The firmware embeds haptic.toml as its actuator configuration.  ║\n\
            ║  Please create one in the vibrato-firmware directory.            ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let config_content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read haptic.toml                               ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    // Parse and validate TOML syntax
    let config: toml::Value = match toml::from_str(&config_content) {
        Ok(value) => value,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid TOML syntax in haptic.toml                       ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    let mut errors = Vec::new();
    validate_sections(&config, &mut errors);
    validate_actuator(&config, &mut errors);
    validate_features(&config, &mut errors);
    validate_boot(&config, &mut errors);

    if !errors.is_empty() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Invalid haptic configuration                             ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            errors
                .iter()
                .map(|e| format!("║  • {:<62} ║", e))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    println!("cargo:warning=haptic.toml validated successfully");
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Only the known sections, and [actuator] is mandatory
fn validate_sections(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(root) = config.as_table() else {
        errors.push("haptic.toml must be a table".to_string());
        return;
    };

    if root.get("actuator").is_none() {
        errors.push("Missing [actuator] section".to_string());
    }

    for (name, value) in root {
        if !["actuator", "features", "boot"].contains(&name.as_str()) {
            errors.push(format!("Unknown section [{}]", name));
        } else if !value.is_table() {
            errors.push(format!("[{}] must be a table", name));
        }
    }
}

/// Numeric value, integers included
fn as_number(value: &toml::Value) -> Option<f64> {
    match value {
        toml::Value::Float(f) => Some(*f),
        toml::Value::Integer(i) => Some(*i as f64),
        _ => None,
    }
}

fn validate_actuator(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(actuator) = config.get("actuator").and_then(|a| a.as_table()) else {
        return;
    };

    // (key, min, max, min is exclusive)
    let ranges: [(&str, f64, f64, bool); 5] = [
        ("nominal_voltage", 0.0, 3.3, false),
        ("absolute_voltage", 0.0, 6.0, false),
        ("max_current_ma", 0.0, 300.0, false),
        ("impedance_ohm", 0.0, 50.0, false),
        ("resonant_frequency_hz", 0.0, 500.0, true),
    ];

    for (key, value) in actuator {
        if key == "motor_type" {
            match value.as_str() {
                Some("lra") | Some("erm") => {}
                _ => errors.push("[actuator] motor_type must be 'lra' or 'erm'".to_string()),
            }
            continue;
        }

        let Some(&(_, min, max, exclusive)) = ranges.iter().find(|(k, ..)| *k == key.as_str())
        else {
            errors.push(format!("[actuator] unknown key '{}'", key));
            continue;
        };

        match as_number(value) {
            Some(v) if v <= max && (v > min || (!exclusive && v == min)) => {}
            Some(_) => errors.push(format!("[actuator] {} must be {}-{}", key, min, max)),
            None => errors.push(format!("[actuator] {} must be a number", key)),
        }
    }
}

fn validate_features(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(features) = config.get("features").and_then(|f| f.as_table()) else {
        return;
    };

    for (key, value) in features {
        if !["frequency_tracking", "acceleration", "rapid_stop"].contains(&key.as_str()) {
            errors.push(format!("[features] unknown key '{}'", key));
        } else if !value.is_bool() {
            errors.push(format!("[features] {} must be true or false", key));
        }
    }
}

fn validate_boot(config: &toml::Value, errors: &mut Vec<String>) {
    let Some(boot) = config.get("boot").and_then(|b| b.as_table()) else {
        return;
    };

    for (key, value) in boot {
        match key.as_str() {
            "operation_mode" => {
                if !matches!(value.as_str(), Some("inactive" | "dro" | "pwm" | "rtwm")) {
                    errors.push(
                        "[boot] operation_mode must be 'inactive', 'dro', 'pwm' or 'rtwm'"
                            .to_string(),
                    );
                }
            }
            "retry_ms" => match value.as_integer() {
                Some(ms) if (1..=i64::from(u32::MAX)).contains(&ms) => {}
                _ => errors.push("[boot] retry_ms must be a positive integer".to_string()),
            },
            _ => errors.push(format!("[boot] unknown key '{}'", key)),
        }
    }
}
