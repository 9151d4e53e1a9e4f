//! Temperature sensor drivers

pub mod internal;

pub use internal::InternalTempSensor;
