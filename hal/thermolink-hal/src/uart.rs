//! UART serial communication abstractions
//!
//! The firmware drives the serial port one byte at a time: the receive
//! interrupt reads the data register once per byte and the transmitter
//! writes a byte and polls for transmission complete. The traits here
//! expose exactly those register operations.

/// UART receiver
///
/// Used from interrupt context. Reading the data register also clears the
/// hardware "data ready" condition, so implementations must not clear it
/// separately.
pub trait SerialRx {
    /// Check whether the receive data register holds an unread byte
    fn has_data(&self) -> bool;

    /// Read one byte from the receive data register
    fn read_data(&mut self) -> u8;
}

/// UART transmitter
pub trait SerialTx {
    /// Write one byte to the transmit data register
    fn write_data(&mut self, byte: u8);

    /// Check the transmission-complete status bit
    fn is_transmission_complete(&self) -> bool;
}

/// Errors from deriving the baud rate divisor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BaudError {
    /// A baud rate of zero was requested
    ZeroBaudrate,
    /// The bus clock cannot produce the requested baud rate
    DivisorOutOfRange,
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 57_600,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Create an 8N1 configuration at the given baud rate
    pub const fn with_baudrate(baudrate: u32) -> Self {
        Self {
            baudrate,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }

    /// Compute the baud rate register value for a 16x oversampling UART
    ///
    /// USARTDIV = pclk / (16 * baud), stored as a 12.4 fixed-point number,
    /// which is simply `pclk / baud` truncated. 32 MHz at 57600 baud gives
    /// 555 (0x22B).
    pub fn divisor(&self, pclk_hz: u32) -> Result<u16, BaudError> {
        if self.baudrate == 0 {
            return Err(BaudError::ZeroBaudrate);
        }

        let div = pclk_hz / self.baudrate;

        // Mantissa must be at least 1
        if div < 16 || div > u16::MAX as u32 {
            return Err(BaudError::DivisorOutOfRange);
        }

        Ok(div as u16)
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataBits {
    Eight,
    Nine,
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopBits {
    One,
    Two,
}
