//! Configuration types
//!
//! Board-agnostic configuration: sensor calibration constants, serial
//! settings and busy-wait limits.

pub mod calibration;
pub mod types;

pub use calibration::*;
pub use types::*;
