//! Thermolink Hardware Abstraction Layer
//!
//! This crate defines register-level hardware traits that chip-specific HALs
//! implement. The application logic in `thermolink-core` only talks to these
//! traits, so the whole command cycle can be exercised on the host against
//! fake peripherals.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (thermolink-core/firmware) │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  thermolink-hal (this crate - traits)   │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!          ┌─────────────────────┐
//!          │ thermolink-hal-     │
//!          │     stm32f1         │
//!          └─────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::SerialRx`], [`uart::SerialTx`] - Byte-at-a-time serial registers
//! - [`adc::TemperatureAdc`] - Converter wired to the internal temperature sensor
//!
//! Every wait on a hardware status bit goes through [`wait::spin_until`],
//! which gives up after a fixed number of polls.

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod uart;
pub mod wait;

// Re-export key traits at crate root for convenience
pub use adc::{TemperatureAdc, ADC_MAX_CODE};
pub use uart::{SerialRx, SerialTx, UartConfig};
pub use wait::{spin_until, Timeout};
