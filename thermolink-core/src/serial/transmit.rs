//! Blocking line transmitter
//!
//! Writes one byte to the data register, then polls transmission complete
//! before the next byte. Each poll loop is bounded.

use heapless::String;
use thermolink_hal::{spin_until, SerialTx};

/// Terminator appended to outgoing lines
const TERMINATOR_TEXT: &str = "\r\n";

/// Errors from sending a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransmitError {
    /// No room to append the terminator; nothing was sent
    BufferFull,
    /// Transmission complete never set; the line was cut short
    Timeout,
}

/// Byte-at-a-time serial line sender
pub struct LineTransmitter<U> {
    uart: U,
    /// Polls per byte before giving up
    budget: u32,
}

impl<U: SerialTx> LineTransmitter<U> {
    /// Create a new transmitter
    pub fn new(uart: U, budget: u32) -> Self {
        Self { uart, budget }
    }

    /// Send `text`, optionally appending `\r\n` first
    ///
    /// The terminator is appended to the caller's buffer, so the buffer
    /// needs two spare bytes. Returns once the last byte has left the
    /// shift register.
    pub fn send<const N: usize>(
        &mut self,
        text: &mut String<N>,
        append_terminator: bool,
    ) -> Result<(), TransmitError> {
        if append_terminator {
            text.push_str(TERMINATOR_TEXT)
                .map_err(|_| TransmitError::BufferFull)?;
        }

        self.send_bytes(text.as_bytes())
    }

    /// Send raw bytes as they are
    pub fn send_bytes(&mut self, bytes: &[u8]) -> Result<(), TransmitError> {
        for &byte in bytes {
            self.uart.write_data(byte);
            spin_until(self.budget, || self.uart.is_transmission_complete())
                .map_err(|_| TransmitError::Timeout)?;
        }
        Ok(())
    }

    /// Access the underlying UART
    pub fn uart(&self) -> &U {
        &self.uart
    }
}
