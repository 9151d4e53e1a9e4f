//! GPIO pin multiplexing for STM32F1
//!
//! The F1 family has no per-pin alternate function number: a pin is routed
//! to its peripheral by configuring it as an alternate-function output
//! (TX) or a floating input (RX) in the port's CRL/CRH register.

use embassy_stm32::pac;
use embassy_stm32::pac::gpio::vals::{CnfIn, CnfOut, Mode};

/// USART2 TX pin on port A
pub const USART2_TX_PIN: usize = 2;

/// USART2 RX pin on port A
pub const USART2_RX_PIN: usize = 3;

/// Route USART2 to PA2 (TX) and PA3 (RX)
///
/// PA2: alternate function push-pull, 2 MHz.
/// PA3: floating input.
pub fn route_usart2() {
    pac::GPIOA.cr(0).modify(|w| {
        w.set_mode(USART2_TX_PIN, Mode::OUTPUT2MHZ);
        w.set_cnf_out(USART2_TX_PIN, CnfOut::ALT_PUSH_PULL);
        w.set_mode(USART2_RX_PIN, Mode::INPUT);
        w.set_cnf_in(USART2_RX_PIN, CnfIn::FLOATING);
    });
}
