//! Board-agnostic core logic for the temperature probe firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Temperature sensor driver (ADC bring-up, sampling, conversion)
//! - Line transmitter (byte-at-a-time serial output)
//! - Line handoff slot shared between the receive interrupt and the dispatcher
//! - Command dispatcher
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod dispatch;
pub mod sensor;
pub mod serial;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;
