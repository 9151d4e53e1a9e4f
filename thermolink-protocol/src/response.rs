//! Response formatting
//!
//! Responses are single lines of ASCII text. The terminator is not part of
//! the formatted text; the transmitter appends it.

use core::fmt::Write;

use heapless::String;

/// Transmit buffer capacity in bytes, terminator included
pub const TX_BUFFER_SIZE: usize = 64;

/// Outgoing line buffer
pub type TxBuffer = String<TX_BUFFER_SIZE>;

/// Errors from formatting a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ResponseError {
    /// The text does not fit in the buffer
    BufferTooSmall,
}

/// Responses from the probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Response {
    /// Reading in milli-degrees Celsius
    Temperature { milli_celsius: i32 },
    /// The line was not a known command
    InvalidCommand,
    /// The line did not fit in the receive buffer
    LineTooLong,
    /// The converter did not deliver a reading
    SensorFault,
}

impl Response {
    /// Fixed text of the non-temperature responses
    pub fn fixed_text(&self) -> Option<&'static str> {
        match self {
            Response::Temperature { .. } => None,
            Response::InvalidCommand => Some("Invalid Command"),
            Response::LineTooLong => Some("Line Too Long"),
            Response::SensorFault => Some("Sensor Fault"),
        }
    }

    /// Append the response text to `buf`
    ///
    /// Temperatures are printed as `Temperature: {int},{fff} C`: integer
    /// degrees, a comma and exactly three digits of milli-degrees. Negative
    /// readings carry a single leading minus sign (-500 prints as
    /// `-0,500`).
    pub fn write_to<const N: usize>(&self, buf: &mut String<N>) -> Result<(), ResponseError> {
        match self {
            Response::Temperature { milli_celsius } => {
                let sign = if *milli_celsius < 0 { "-" } else { "" };
                let magnitude = milli_celsius.unsigned_abs();
                write!(
                    buf,
                    "Temperature: {}{},{:03} C",
                    sign,
                    magnitude / 1000,
                    magnitude % 1000
                )
                .map_err(|_| ResponseError::BufferTooSmall)
            }
            _ => {
                let text = self.fixed_text().unwrap_or_default();
                buf.push_str(text)
                    .map_err(|_| ResponseError::BufferTooSmall)
            }
        }
    }
}
