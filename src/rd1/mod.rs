//! Codec for the CTT `rd1` register dump format: one header line naming the
//! device, then one `addr value` pair of 32-bit hex tokens per line.

pub mod error;

pub use error::{ParseError, ParseResult, WriteError};

use std::io::{BufRead, Write};

use smallvec::SmallVec;

/// Upper bound on the stored device name, in bytes.
pub const DEVICE_NAME_MAX: usize = 200;

/// One register to dump. Duplicate addresses are legal and are read
/// independently in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterEntry {
    pub address: u32,
    pub value: u32,
}

/// An rd1 file in memory: the device-name header plus the register list in
/// file order. The list length is the only terminator; an all-zero entry is
/// an ordinary register.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterSet {
    pub device_name: String,
    pub entries: Vec<RegisterEntry>,
}

impl RegisterSet {
    /// Parse an rd1 stream.
    ///
    /// The first line must yield exactly two whitespace-separated tokens,
    /// joined by one space into the device name. Every following non-blank
    /// line must be an `addr value` pair of hex tokens; blank lines are
    /// skipped. A stream with no register data at all is an error.
    pub fn parse(reader: impl BufRead) -> ParseResult<Self> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => return Err(ParseError::MissingHeader),
        };
        let tokens: SmallVec<[&str; 2]> = header.split_whitespace().collect();
        if tokens.len() != 2 {
            return Err(ParseError::MissingHeader);
        }
        let device_name = bound_device_name(format!("{} {}", tokens[0], tokens[1]));

        let mut entries = Vec::new();
        for (idx, line) in lines.enumerate() {
            let line = line?;
            let number = idx + 2;
            let tokens: SmallVec<[&str; 2]> = line.split_whitespace().collect();
            if tokens.is_empty() {
                continue;
            }
            if tokens.len() != 2 {
                return Err(ParseError::BadLine { line: number });
            }
            let address = parse_hex_u32(tokens[0]).ok_or_else(|| ParseError::BadHex {
                line: number,
                token: tokens[0].to_owned(),
            })?;
            let value = parse_hex_u32(tokens[1]).ok_or_else(|| ParseError::BadHex {
                line: number,
                token: tokens[1].to_owned(),
            })?;
            entries.push(RegisterEntry { address, value });
        }

        if entries.is_empty() {
            return Err(ParseError::NoEntries);
        }
        Ok(RegisterSet { device_name, entries })
    }

    /// Generate the rd1 text for this set: the device-name line verbatim,
    /// then each entry as zero-padded `0x`-prefixed 8-digit hex.
    pub fn serialize(&self, mut out: impl Write) -> Result<(), WriteError> {
        writeln!(out, "{}", self.device_name)?;
        for entry in &self.entries {
            writeln!(out, "0x{:08x} 0x{:08x}", entry.address, entry.value)?;
        }
        Ok(())
    }
}

/// Hex token with an optional `0x` prefix. The generated format is
/// `0x`-prefixed, so output must re-parse.
fn parse_hex_u32(token: &str) -> Option<u32> {
    let digits = token
        .strip_prefix("0x")
        .or_else(|| token.strip_prefix("0X"))
        .unwrap_or(token);
    if digits.is_empty() {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

fn bound_device_name(mut name: String) -> String {
    if name.len() > DEVICE_NAME_MAX {
        let mut end = DEVICE_NAME_MAX;
        while !name.is_char_boundary(end) {
            end -= 1;
        }
        name.truncate(end);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_str(input: &str) -> ParseResult<RegisterSet> {
        RegisterSet::parse(input.as_bytes())
    }

    #[test]
    fn parses_header_and_entries_in_order() {
        let set = parse_str("Board X\n1000 0\n2004 0\n").unwrap();
        assert_eq!(set.device_name, "Board X");
        let addresses: Vec<u32> = set.entries.iter().map(|e| e.address).collect();
        assert_eq!(addresses, vec![0x1000, 0x2004]);
    }

    #[test]
    fn empty_stream_is_missing_header() {
        assert!(matches!(parse_str(""), Err(ParseError::MissingHeader)));
    }

    #[test]
    fn one_token_header_is_missing_header() {
        assert!(matches!(
            parse_str("OnlyOne\n1000 0\n"),
            Err(ParseError::MissingHeader)
        ));
    }

    #[test]
    fn header_without_data_is_no_entries() {
        assert!(matches!(parse_str("Board X\n"), Err(ParseError::NoEntries)));
    }

    #[test]
    fn non_hex_token_reports_line_and_token() {
        match parse_str("Board X\nnot_hex 0x10\n") {
            Err(ParseError::BadHex { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "not_hex");
            }
            other => panic!("expected BadHex, got {other:?}"),
        }
    }

    #[test]
    fn wrong_token_count_reports_line() {
        assert!(matches!(
            parse_str("Board X\n1000 0\n2004\n"),
            Err(ParseError::BadLine { line: 3 })
        ));
        assert!(matches!(
            parse_str("Board X\n1000 0 extra\n"),
            Err(ParseError::BadLine { line: 2 })
        ));
    }

    #[test]
    fn accepts_prefixed_hex() {
        let set = parse_str("Board X\n0x44E10048 0xDEADBEEF\n").unwrap();
        assert_eq!(set.entries[0].address, 0x44e1_0048);
        assert_eq!(set.entries[0].value, 0xdead_beef);
    }

    #[test]
    fn skips_blank_lines() {
        let set = parse_str("Board X\n\n1000 0\n   \n").unwrap();
        assert_eq!(set.entries.len(), 1);
    }

    #[test]
    fn bounds_long_device_names() {
        let header = format!("{} {}\n1000 0\n", "a".repeat(150), "b".repeat(150));
        let set = parse_str(&header).unwrap();
        assert_eq!(set.device_name.len(), DEVICE_NAME_MAX);
    }

    #[test]
    fn serializes_zero_padded_lowercase() {
        let set = RegisterSet {
            device_name: "Board X".into(),
            entries: vec![RegisterEntry {
                address: 0xABC,
                value: 0xF,
            }],
        };
        let mut out = Vec::new();
        set.serialize(&mut out).unwrap();
        assert_eq!(out, b"Board X\n0x00000abc 0x0000000f\n");
    }

    #[test]
    fn round_trips_losslessly() {
        let set = RegisterSet {
            device_name: "MyDevice Rev1".into(),
            entries: vec![
                RegisterEntry {
                    address: 0x44e1_0048,
                    value: 0xdead_beef,
                },
                RegisterEntry {
                    address: 0x1000,
                    value: 0,
                },
            ],
        };
        let mut text = Vec::new();
        set.serialize(&mut text).unwrap();
        let reparsed = RegisterSet::parse(text.as_slice()).unwrap();
        assert_eq!(reparsed, set);
    }
}
