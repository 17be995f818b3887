//! Minimal TOML parser for the haptic configuration
//!
//! Handles only the subset `haptic.toml` needs; arrays, inline tables and
//! multi-line strings are not supported.
//!
//! Supported features:
//! - `[actuator]`, `[features]` and `[boot]` section headers
//! - Key = value pairs (string, integer, float, boolean)
//! - Comments (`# ...`), including trailing comments
//!
//! Keys that are not recognised and lines that are not `key = value` are
//! errors, so typos in the file never silently fall back to defaults.

use super::types::{HapticConfig, MotorType, OperationMode};

/// What went wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseErrorKind {
    /// Section header is not one of the known sections
    UnknownSection,
    /// Key is not valid in the current section
    UnknownKey,
    /// Line is neither a header nor `key = value`
    Malformed,
    /// Value has the wrong type or an unknown name
    InvalidValue,
}

/// Parse error with the 1-based line it occurred on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ParseError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Root,
    Actuator,
    Features,
    Boot,
}

/// Parse TOML text into a [`HapticConfig`]
///
/// Missing sections and keys keep their defaults.
pub fn parse_config(input: &str) -> Result<HapticConfig, ParseError> {
    let mut config = HapticConfig::default();
    let mut section = Section::Root;

    for (index, line) in input.lines().enumerate() {
        let fail = |kind| ParseError {
            line: index + 1,
            kind,
        };
        let line = strip_comment(line).trim();

        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let name = header
                .strip_suffix(']')
                .ok_or(fail(ParseErrorKind::Malformed))?;
            section = parse_section_header(name).ok_or(fail(ParseErrorKind::UnknownSection))?;
            continue;
        }

        let (key, value) = parse_key_value(line).ok_or(fail(ParseErrorKind::Malformed))?;
        apply_value(section, key, value, &mut config).map_err(fail)?;
    }

    Ok(config)
}

fn parse_section_header(header: &str) -> Option<Section> {
    match header.trim() {
        "actuator" => Some(Section::Actuator),
        "features" => Some(Section::Features),
        "boot" => Some(Section::Boot),
        _ => None,
    }
}

/// Drop a trailing `# comment` unless the `#` is inside a string
fn strip_comment(line: &str) -> &str {
    let mut in_string = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_string = !in_string,
            '#' if !in_string => return &line[..i],
            _ => {}
        }
    }
    line
}

/// Parse "key = value" line
fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    let (key, value) = line.split_once('=')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() {
        return None;
    }

    Some((key, value))
}

fn apply_value(
    section: Section,
    key: &str,
    value: &str,
    config: &mut HapticConfig,
) -> Result<(), ParseErrorKind> {
    match section {
        Section::Root => return Err(ParseErrorKind::UnknownKey),
        Section::Actuator => {
            let a = &mut config.actuator;
            match key {
                "motor_type" => {
                    a.motor_type = MotorType::from_name(parse_string(value)?)
                        .ok_or(ParseErrorKind::InvalidValue)?
                }
                "nominal_voltage" => a.nominal_voltage = parse_float(value)?,
                "absolute_voltage" => a.absolute_voltage = parse_float(value)?,
                "max_current_ma" => a.max_current_ma = parse_float(value)?,
                "impedance_ohm" => a.impedance_ohm = parse_float(value)?,
                "resonant_frequency_hz" => a.resonant_frequency_hz = parse_float(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Features => {
            let f = &mut config.features;
            match key {
                "frequency_tracking" => f.frequency_tracking = parse_bool(value)?,
                "acceleration" => f.acceleration = parse_bool(value)?,
                "rapid_stop" => f.rapid_stop = parse_bool(value)?,
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
        Section::Boot => {
            let b = &mut config.boot;
            match key {
                // ETWM needs GPI wiring the boot sequence does not set up
                "operation_mode" => {
                    b.operation_mode = OperationMode::from_name(parse_string(value)?)
                        .filter(|mode| *mode != OperationMode::Etwm)
                        .ok_or(ParseErrorKind::InvalidValue)?
                }
                "retry_ms" => {
                    b.retry_ms = value
                        .parse::<u32>()
                        .ok()
                        .filter(|ms| *ms > 0)
                        .ok_or(ParseErrorKind::InvalidValue)?
                }
                _ => return Err(ParseErrorKind::UnknownKey),
            }
        }
    }
    Ok(())
}

/// Parse a quoted string value
fn parse_string(value: &str) -> Result<&str, ParseErrorKind> {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .ok_or(ParseErrorKind::InvalidValue)
}

/// Parse a float; integers are accepted too (`213` reads as `213.0`)
fn parse_float(value: &str) -> Result<f32, ParseErrorKind> {
    let v: f32 = value.parse().map_err(|_| ParseErrorKind::InvalidValue)?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ParseErrorKind::InvalidValue)
    }
}

fn parse_bool(value: &str) -> Result<bool, ParseErrorKind> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(ParseErrorKind::InvalidValue),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
# Bench actuator
[actuator]
motor_type = "erm"
nominal_voltage = 2.5   # V rms
absolute_voltage = 3.0
max_current_ma = 150
impedance_ohm = 12.5
resonant_frequency_hz = 170.0

[features]
acceleration = false

[boot]
operation_mode = "pwm"
retry_ms = 500
"#;

    #[test]
    fn test_parse_sample() {
        let config = parse_config(SAMPLE).unwrap();
        assert_eq!(config.actuator.motor_type, MotorType::Erm);
        assert_eq!(config.actuator.nominal_voltage, 2.5);
        assert_eq!(config.actuator.max_current_ma, 150.0);
        assert_eq!(config.actuator.resonant_frequency_hz, 170.0);
        assert!(!config.features.acceleration);
        // Untouched keys keep their defaults
        assert!(config.features.rapid_stop);
        assert_eq!(config.boot.operation_mode, OperationMode::Pwm);
        assert_eq!(config.boot.retry_ms, 500);
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(parse_config("").unwrap(), HapticConfig::default());
        assert_eq!(parse_config("# only a comment\n\n").unwrap(), HapticConfig::default());
    }

    #[test]
    fn test_unknown_key_reports_line() {
        let err = parse_config("[actuator]\nvoltage = 1.0\n").unwrap_err();
        assert_eq!(
            err,
            ParseError {
                line: 2,
                kind: ParseErrorKind::UnknownKey
            }
        );
    }

    #[test]
    fn test_unknown_section() {
        let err = parse_config("[motor]\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownSection);
        assert_eq!(err.line, 1);
    }

    #[test]
    fn test_key_outside_section() {
        let err = parse_config("retry_ms = 10\n").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnknownKey);
    }

    #[test]
    fn test_malformed_lines() {
        assert_eq!(
            parse_config("[boot]\nretry_ms\n").unwrap_err().kind,
            ParseErrorKind::Malformed
        );
        assert_eq!(
            parse_config("[boot\n").unwrap_err().kind,
            ParseErrorKind::Malformed
        );
    }

    #[test]
    fn test_invalid_values() {
        for text in [
            "[actuator]\nmotor_type = \"piezo\"",
            "[actuator]\nmotor_type = lra",
            "[actuator]\nnominal_voltage = high",
            "[actuator]\nnominal_voltage = inf",
            "[features]\nrapid_stop = yes",
            "[boot]\nretry_ms = -1",
            "[boot]\noperation_mode = \"turbo\"",
            "[boot]\noperation_mode = \"etwm\"",
            "[boot]\nretry_ms = 0",
        ] {
            assert_eq!(
                parse_config(text).unwrap_err().kind,
                ParseErrorKind::InvalidValue,
                "{}",
                text
            );
        }
    }

    #[test]
    fn test_hash_inside_string() {
        assert_eq!(strip_comment("a = \"x#y\" # c"), "a = \"x#y\" ");
    }
}
