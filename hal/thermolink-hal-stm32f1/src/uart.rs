//! USART2 driver for STM32F1
//!
//! Register-level transmit and receive halves used by the command line
//! protocol. Receiving is interrupt driven (RXNE), transmitting polls the
//! TC flag after every byte.

use embassy_stm32::pac;
use thermolink_hal::uart::{BaudError, DataBits, Parity, StopBits};
use thermolink_hal::{SerialRx, SerialTx, UartConfig};

/// Error from bringing up the UART
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartInitError {
    /// Baud rate cannot be derived from the bus clock
    Baud(BaudError),
    /// Only 8N1 framing is wired up
    UnsupportedFraming,
}

impl From<BaudError> for UartInitError {
    fn from(e: BaudError) -> Self {
        UartInitError::Baud(e)
    }
}

/// Receive half of USART2
///
/// Zero-sized; the registers are reached through `pac::USART2` on every
/// access, so the handle can live in a `static` shared with the interrupt.
pub struct Usart2Rx {
    _private: (),
}

/// Transmit half of USART2
pub struct Usart2Tx {
    _private: (),
}

/// Enable and configure USART2
///
/// Enables the peripheral clock, programs the baud rate divisor from the
/// APB1 clock, enables receiver, transmitter and the RXNE interrupt.
/// Pins must already be routed (see [`crate::gpio::route_usart2`]) and the
/// NVIC line is left for the caller to unmask.
pub fn init_usart2(
    config: &UartConfig,
    pclk1_hz: u32,
) -> Result<(Usart2Tx, Usart2Rx), UartInitError> {
    if config.data_bits != DataBits::Eight
        || config.parity != Parity::None
        || config.stop_bits != StopBits::One
    {
        return Err(UartInitError::UnsupportedFraming);
    }

    let brr = config.divisor(pclk1_hz)?;

    pac::RCC.apb1enr().modify(|w| w.set_usart2en(true));

    let regs = pac::USART2;
    regs.brr().write_value(pac::usart::regs::Brr(brr as u32));
    regs.cr1().modify(|w| {
        w.set_re(true);
        w.set_te(true);
        w.set_ue(true);
    });
    regs.cr1().modify(|w| w.set_rxneie(true));

    Ok((Usart2Tx { _private: () }, Usart2Rx { _private: () }))
}

impl SerialRx for Usart2Rx {
    fn has_data(&self) -> bool {
        pac::USART2.sr().read().rxne()
    }

    fn read_data(&mut self) -> u8 {
        // Reading DR clears RXNE
        pac::USART2.dr().read().dr() as u8
    }
}

impl SerialTx for Usart2Tx {
    fn write_data(&mut self, byte: u8) {
        pac::USART2.dr().write(|w| w.set_dr(byte as u16));
    }

    fn is_transmission_complete(&self) -> bool {
        pac::USART2.sr().read().tc()
    }
}
