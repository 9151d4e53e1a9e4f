//! STM32F1-specific HAL for the Thermolink firmware
//!
//! This crate implements the `thermolink-hal` register traits for STM32F1
//! series chips:
//!
//! - STM32F103RB (Nucleo-64)
//! - STM32F103C8 (Blue Pill)
//!
//! # Features
//!
//! - `stm32f103rb` - Enable support for STM32F103RB
//! - `stm32f103c8` - Enable support for STM32F103C8
//! - `defmt` - Enable debug formatting support
//!
//! # Usage
//!
//! Clock-tree setup is left to `embassy_stm32::init`, which also enables
//! the GPIO port clocks. The drivers here talk to the USART2 and ADC1
//! registers directly through `embassy_stm32::pac`, because the firmware
//! needs byte-level interrupt handling and polled conversions rather than
//! the async drivers.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod uart;

// Re-export shared traits from thermolink-hal
pub use thermolink_hal::{SerialRx, SerialTx, TemperatureAdc, UartConfig};
