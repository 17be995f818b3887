//! Line framing for the serial transport
//!
//! Stands in for the three write-only GATT characteristics: each line names
//! the characteristic and carries the value, e.g. `weight 60`.
//!
//! ```text
//! <keyword> <SP|TAB>+ <digits> [CR] LF
//! ```

use heapless::Vec;

use crate::input::{parse_value, InputCommand, InputKind, ValueError};

/// Maximum accepted line length, excluding the terminator
pub const MAX_LINE_LEN: usize = 32;

/// Errors that can occur while parsing a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// Keyword does not name an input characteristic
    UnknownKind,
    /// No separator between keyword and value
    Malformed,
    /// Line exceeded [`MAX_LINE_LEN`]
    TooLong,
    /// Value failed strict decimal parsing
    Value(ValueError),
}

impl From<ValueError> for LineError {
    fn from(e: ValueError) -> Self {
        LineError::Value(e)
    }
}

/// Parse one complete line (without terminator)
pub fn parse_line(line: &[u8]) -> Result<InputCommand, LineError> {
    let split = line
        .iter()
        .position(|&b| b == b' ' || b == b'\t')
        .ok_or(LineError::Malformed)?;

    let (keyword, rest) = line.split_at(split);
    let kind = InputKind::from_keyword(keyword).ok_or(LineError::UnknownKind)?;

    let value_start = rest
        .iter()
        .position(|&b| b != b' ' && b != b'\t')
        .unwrap_or(rest.len());
    let value = parse_value(&rest[value_start..])?;

    Ok(InputCommand { kind, value })
}

/// Incremental line parser fed one byte at a time from the UART
#[derive(Debug, Clone)]
pub struct LineParser {
    buffer: Vec<u8, MAX_LINE_LEN>,
    overflowed: bool,
}

impl Default for LineParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LineParser {
    /// Create a new line parser
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            overflowed: false,
        }
    }

    /// Reset parser state, discarding any partial line
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.overflowed = false;
    }

    /// Feed a byte to the parser
    ///
    /// Returns `Some` when a line terminator completes a non-empty line.
    /// Blank lines are skipped silently.
    pub fn feed(&mut self, byte: u8) -> Option<Result<InputCommand, LineError>> {
        match byte {
            b'\n' => {
                let result = if self.overflowed {
                    Some(Err(LineError::TooLong))
                } else {
                    let mut line: &[u8] = &self.buffer;
                    if let Some((&b'\r', head)) = line.split_last() {
                        line = head;
                    }
                    if line.is_empty() {
                        None
                    } else {
                        Some(parse_line(line))
                    }
                };
                self.reset();
                result
            }
            _ => {
                if self.buffer.push(byte).is_err() {
                    self.overflowed = true;
                }
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_all(parser: &mut LineParser, bytes: &[u8]) -> Option<Result<InputCommand, LineError>> {
        let mut last = None;
        for &b in bytes {
            if let Some(result) = parser.feed(b) {
                last = Some(result);
            }
        }
        last
    }

    #[test]
    fn test_parse_weight_line() {
        assert_eq!(
            parse_line(b"weight 60"),
            Ok(InputCommand {
                kind: InputKind::Weight,
                value: 60
            })
        );
    }

    #[test]
    fn test_parse_tab_and_extra_spaces() {
        assert_eq!(
            parse_line(b"duration\t  5"),
            Ok(InputCommand {
                kind: InputKind::Duration,
                value: 5
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_line(b"weight"), Err(LineError::Malformed));
        assert_eq!(parse_line(b"volume 3"), Err(LineError::UnknownKind));
        assert_eq!(
            parse_line(b"pattern 300"),
            Err(LineError::Value(ValueError::Overflow))
        );
        assert_eq!(
            parse_line(b"pattern 3 "),
            Err(LineError::Value(ValueError::InvalidDigit { byte: b' ' }))
        );
        assert_eq!(
            parse_line(b"pattern "),
            Err(LineError::Value(ValueError::Empty))
        );
    }

    #[test]
    fn test_parser_crlf() {
        let mut parser = LineParser::new();
        let result = feed_all(&mut parser, b"pattern 2\r\n");
        assert_eq!(
            result,
            Some(Ok(InputCommand {
                kind: InputKind::Pattern,
                value: 2
            }))
        );
    }

    #[test]
    fn test_parser_skips_blank_lines() {
        let mut parser = LineParser::new();
        assert_eq!(parser.feed(b'\n'), None);
        assert_eq!(feed_all(&mut parser, b"\r\n"), None);
    }

    #[test]
    fn test_parser_multiple_lines() {
        let mut parser = LineParser::new();
        let mut results = [None, None];
        let mut idx = 0;
        for &b in b"weight 60\nduration 1\n" {
            if let Some(r) = parser.feed(b) {
                results[idx] = Some(r);
                idx += 1;
            }
        }
        assert_eq!(idx, 2);
        assert_eq!(
            results[1],
            Some(Ok(InputCommand {
                kind: InputKind::Duration,
                value: 1
            }))
        );
    }

    #[test]
    fn test_parser_overflow_recovers() {
        let mut parser = LineParser::new();
        let long = [b'9'; MAX_LINE_LEN + 8];
        assert_eq!(feed_all(&mut parser, &long), None);
        assert_eq!(parser.feed(b'\n'), Some(Err(LineError::TooLong)));

        // Next line parses normally
        assert_eq!(
            feed_all(&mut parser, b"weight 1\n"),
            Some(Ok(InputCommand {
                kind: InputKind::Weight,
                value: 1
            }))
        );
    }
}
