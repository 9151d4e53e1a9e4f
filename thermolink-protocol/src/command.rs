//! Command parsing
//!
//! The probe understands a single command. Matching is a case-sensitive
//! prefix match, so `T?` followed by anything (usually the terminator)
//! is a temperature request.

/// Prefix of the temperature request
pub const READ_TEMPERATURE: &[u8] = b"T?";

/// Commands from the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// `T?` - sample the sensor and report the temperature
    ReadTemperature,
    /// Anything else, including empty lines
    Unknown,
}

impl Command {
    /// Parse a received line (terminator included or not)
    pub fn parse(line: &[u8]) -> Self {
        if line.starts_with(READ_TEMPERATURE) {
            Command::ReadTemperature
        } else {
            Command::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read_temperature() {
        assert_eq!(Command::parse(b"T?\r\n"), Command::ReadTemperature);
        assert_eq!(Command::parse(b"T?"), Command::ReadTemperature);
    }

    #[test]
    fn test_trailing_bytes_are_ignored() {
        assert_eq!(Command::parse(b"T?xyz\r\n"), Command::ReadTemperature);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(Command::parse(b"t?\r\n"), Command::Unknown);
    }

    #[test]
    fn test_unknown_lines() {
        assert_eq!(Command::parse(b"X\r\n"), Command::Unknown);
        assert_eq!(Command::parse(b"\r\n"), Command::Unknown);
        assert_eq!(Command::parse(b""), Command::Unknown);
        assert_eq!(Command::parse(b"T\r\n"), Command::Unknown);
        assert_eq!(Command::parse(b" T?\r\n"), Command::Unknown);
    }
}
