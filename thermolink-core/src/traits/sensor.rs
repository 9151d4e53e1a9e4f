//! Temperature sensor trait

/// Sensor errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SensorError {
    /// Sample requested before the converter was brought up
    NotInitialized,
    /// Bring-up requested twice
    AlreadyInitialized,
    /// Calibration reset or self-calibration never finished
    CalibrationTimeout,
    /// End of conversion never signalled
    ConversionTimeout,
}

/// Trait for temperature sensors
///
/// The dispatcher reads through this trait, so it can be driven by the
/// on-chip sensor or by a stand-in during tests.
pub trait TemperatureSensor {
    /// Read the current temperature in milli-degrees Celsius
    ///
    /// For example, 23.45 °C is returned as 23450.
    ///
    /// Takes `&mut self` because ADC reads require mutable access.
    fn read_milli_celsius(&mut self) -> Result<i32, SensorError>;

    /// Read the current temperature in whole degrees Celsius (truncated)
    fn read_celsius(&mut self) -> Result<i32, SensorError> {
        self.read_milli_celsius().map(|t| t / 1000)
    }
}
