//! On-chip temperature sensor
//!
//! Drives the converter through its bring-up sequence, takes single-shot
//! samples and converts them with the calibration constants. Every wait on
//! a status bit is bounded by the configured [`WaitBudgets`].

use thermolink_hal::{spin_until, TemperatureAdc, ADC_MAX_CODE};

use crate::config::{SensorCalibration, WaitBudgets};
use crate::traits::{SensorError, TemperatureSensor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SensorState {
    /// `initialize` has not completed
    Uninitialized,
    /// Calibrated and configured for the sensor channel
    Ready,
}

/// Internal temperature sensor read through a [`TemperatureAdc`]
pub struct InternalTempSensor<A> {
    adc: A,
    calibration: SensorCalibration,
    budgets: WaitBudgets,
    state: SensorState,
}

impl<A: TemperatureAdc> InternalTempSensor<A> {
    /// Create a new sensor driver
    ///
    /// The converter is not touched until [`initialize`](Self::initialize).
    pub fn new(adc: A, calibration: SensorCalibration, budgets: WaitBudgets) -> Self {
        Self {
            adc,
            calibration,
            budgets,
            state: SensorState::Uninitialized,
        }
    }

    /// Bring up the converter and the sensor
    ///
    /// Clock, power (converter and sensor together), settle delay,
    /// calibration reset, self-calibration, maximum sample time, channel
    /// select. Must succeed once before [`sample`](Self::sample). A failed
    /// bring-up can be retried; a successful one cannot be repeated.
    pub fn initialize(&mut self) -> Result<(), SensorError> {
        if self.state == SensorState::Ready {
            return Err(SensorError::AlreadyInitialized);
        }

        self.adc.enable_clock();
        self.adc.power_on();
        self.adc.settle();

        self.adc.start_calibration_reset();
        spin_until(self.budgets.calibration, || {
            !self.adc.is_calibration_reset_pending()
        })
        .map_err(|_| SensorError::CalibrationTimeout)?;

        self.adc.start_calibration();
        spin_until(self.budgets.calibration, || !self.adc.is_calibrating())
            .map_err(|_| SensorError::CalibrationTimeout)?;

        self.adc.set_max_sample_time();
        self.adc.select_sensor_channel();

        self.state = SensorState::Ready;
        Ok(())
    }

    /// Check whether bring-up has completed
    pub fn is_ready(&self) -> bool {
        self.state == SensorState::Ready
    }

    /// Take one sample and return the raw 12-bit code
    pub fn sample(&mut self) -> Result<u16, SensorError> {
        if self.state != SensorState::Ready {
            return Err(SensorError::NotInitialized);
        }

        self.adc.start_conversion();
        spin_until(self.budgets.conversion, || self.adc.is_conversion_complete())
            .map_err(|_| SensorError::ConversionTimeout)?;

        Ok(self.adc.read_data() & ADC_MAX_CODE)
    }

    /// Convert a raw code with this sensor's calibration
    pub fn to_milli_celsius(&self, code: u16) -> i32 {
        self.calibration.to_milli_celsius(code)
    }

    /// Calibration constants in use
    pub fn calibration(&self) -> SensorCalibration {
        self.calibration
    }

    /// Access the underlying converter
    pub fn adc(&self) -> &A {
        &self.adc
    }
}

impl<A: TemperatureAdc> TemperatureSensor for InternalTempSensor<A> {
    fn read_milli_celsius(&mut self) -> Result<i32, SensorError> {
        let code = self.sample()?;
        Ok(self.to_milli_celsius(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{AdcOp, FakeAdc, STUCK};

    fn budgets() -> WaitBudgets {
        WaitBudgets {
            calibration: 100,
            conversion: 100,
            transmit: 100,
        }
    }

    fn sensor(adc: FakeAdc) -> InternalTempSensor<FakeAdc> {
        InternalTempSensor::new(adc, SensorCalibration::default(), budgets())
    }

    #[test]
    fn test_initialize_sequence() {
        let mut sensor = sensor(FakeAdc::new(0));
        sensor.initialize().unwrap();

        assert!(sensor.is_ready());
        assert_eq!(
            sensor.adc().ops.as_slice(),
            &[
                AdcOp::EnableClock,
                AdcOp::PowerOn,
                AdcOp::Settle,
                AdcOp::StartCalibrationReset,
                AdcOp::StartCalibration,
                AdcOp::SetMaxSampleTime,
                AdcOp::SelectSensorChannel,
            ]
        );
    }

    #[test]
    fn test_initialize_twice() {
        let mut sensor = sensor(FakeAdc::new(0));
        sensor.initialize().unwrap();
        let ops = sensor.adc().ops.len();

        assert_eq!(sensor.initialize(), Err(SensorError::AlreadyInitialized));
        assert_eq!(sensor.adc().ops.len(), ops);
    }

    #[test]
    fn test_calibration_reset_timeout() {
        let mut adc = FakeAdc::new(0);
        adc.reset_polls = STUCK;
        let mut sensor = sensor(adc);

        assert_eq!(sensor.initialize(), Err(SensorError::CalibrationTimeout));
        assert!(!sensor.is_ready());
        assert_eq!(sensor.adc().ops.last(), Some(&AdcOp::StartCalibrationReset));
    }

    #[test]
    fn test_calibration_timeout() {
        let mut adc = FakeAdc::new(0);
        adc.calibration_polls = STUCK;
        let mut sensor = sensor(adc);

        assert_eq!(sensor.initialize(), Err(SensorError::CalibrationTimeout));
        assert!(!sensor.is_ready());
        assert_eq!(sensor.sample(), Err(SensorError::NotInitialized));
    }

    #[test]
    fn test_sample_before_initialize() {
        let mut sensor = sensor(FakeAdc::new(1700));
        assert_eq!(sensor.sample(), Err(SensorError::NotInitialized));
        assert!(sensor.adc().ops.is_empty());
    }

    #[test]
    fn test_sample_returns_code() {
        let mut sensor = sensor(FakeAdc::new(1700));
        sensor.initialize().unwrap();

        assert_eq!(sensor.sample(), Ok(1700));
        assert_eq!(
            &sensor.adc().ops[sensor.adc().ops.len() - 2..],
            &[AdcOp::StartConversion, AdcOp::ReadData]
        );
    }

    #[test]
    fn test_sample_masks_to_12_bits() {
        let mut sensor = sensor(FakeAdc::new(0xF123));
        sensor.initialize().unwrap();
        assert_eq!(sensor.sample(), Ok(0x0123));
    }

    #[test]
    fn test_conversion_timeout() {
        let mut adc = FakeAdc::new(1700);
        adc.conversion_polls = STUCK;
        let mut sensor = sensor(adc);
        sensor.initialize().unwrap();

        assert_eq!(sensor.sample(), Err(SensorError::ConversionTimeout));
        assert_eq!(sensor.adc().ops.last(), Some(&AdcOp::StartConversion));
    }

    #[test]
    fn test_read_milli_celsius() {
        let mut sensor = sensor(FakeAdc::new(1700));
        sensor.initialize().unwrap();

        assert_eq!(sensor.read_milli_celsius(), Ok(38_962));
        assert_eq!(sensor.read_celsius(), Ok(38));
    }

    #[test]
    fn test_retry_after_failed_initialize() {
        let mut adc = FakeAdc::new(1700);
        adc.calibration_polls = STUCK;
        let mut sensor = sensor(adc);
        assert_eq!(sensor.initialize(), Err(SensorError::CalibrationTimeout));

        sensor.adc.calibration_polls = 1;
        sensor.initialize().unwrap();
        assert_eq!(sensor.sample(), Ok(1700));
    }
}
