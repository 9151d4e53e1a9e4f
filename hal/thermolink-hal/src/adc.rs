//! ADC abstractions for the on-chip temperature sensor
//!
//! The STM32F1 temperature sensor sits on ADC1 channel 16. Bringing it up
//! is a fixed register sequence: clock, power, settle, calibrate, sample
//! time, channel select. Each step is a separate trait method so the
//! driver in `thermolink-core` owns the ordering and the waits.

/// Largest code a 12-bit converter produces
pub const ADC_MAX_CODE: u16 = 4095;

/// Converter wired to the internal temperature sensor
pub trait TemperatureAdc {
    /// Enable the converter's peripheral clock
    fn enable_clock(&mut self);

    /// Power on the converter and the temperature sensor together
    fn power_on(&mut self);

    /// Busy-spin for the sensor start-up time (a couple of microseconds)
    ///
    /// Not a precise timer.
    fn settle(&mut self);

    /// Start resetting the calibration registers
    fn start_calibration_reset(&mut self);

    /// Check whether the calibration reset is still running
    fn is_calibration_reset_pending(&self) -> bool;

    /// Start the converter's self-calibration
    fn start_calibration(&mut self);

    /// Check whether self-calibration is still running
    fn is_calibrating(&self) -> bool;

    /// Set the sensor channel's sample time to the longest supported window
    fn set_max_sample_time(&mut self);

    /// Select the sensor channel as the single regular conversion
    fn select_sensor_channel(&mut self);

    /// Trigger one conversion
    fn start_conversion(&mut self);

    /// Check the end-of-conversion status bit
    fn is_conversion_complete(&self) -> bool;

    /// Read the conversion result
    fn read_data(&mut self) -> u16;
}
