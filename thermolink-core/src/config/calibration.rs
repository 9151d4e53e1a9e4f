//! Temperature sensor calibration constants
//!
//! The STM32F1 sensor is linear: V_sense = V25 - slope * (T - 25 °C).
//! All voltages are kept in microvolts so the conversion stays in integer
//! arithmetic.

use thermolink_hal::ADC_MAX_CODE;

/// Offset added to the computed difference, in milli-degrees (25 °C)
pub const REFERENCE_TEMP_MC: i64 = 25_000;

/// Calibration constants for the internal temperature sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SensorCalibration {
    /// ADC reference voltage in µV
    pub vref_uv: u32,
    /// Sensor voltage at 25 °C in µV
    pub v25_uv: u32,
    /// Average slope in µV per °C
    pub avg_slope_uv_per_c: u32,
}

impl Default for SensorCalibration {
    fn default() -> Self {
        Self::STM32F1_TYPICAL
    }
}

impl SensorCalibration {
    /// Typical values from the STM32F103 datasheet with a 3.3 V reference
    pub const STM32F1_TYPICAL: Self = Self {
        vref_uv: 3_300_000,
        v25_uv: 1_430_000,
        avg_slope_uv_per_c: 4_300,
    };

    /// Convert a raw 12-bit code to milli-degrees Celsius
    ///
    /// `v_sense = code * vref / 4095`, then
    /// `mC = (v25 - v_sense) * 1000 / slope + 25000`. Intermediates are
    /// `i64` and divisions truncate toward zero; the result is narrowed to
    /// `i32` at the end.
    pub const fn to_milli_celsius(&self, code: u16) -> i32 {
        let v_sense = (code as i64 * self.vref_uv as i64) / ADC_MAX_CODE as i64;
        let diff_uv = self.v25_uv as i64 - v_sense;
        let slope = if self.avg_slope_uv_per_c == 0 {
            1
        } else {
            self.avg_slope_uv_per_c as i64
        };
        let temp_mc = (diff_uv * 1000) / slope + REFERENCE_TEMP_MC;

        temp_mc as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_reference_voltage_reads_25c() {
        // A 4.095 V reference makes one code exactly one millivolt
        let calibration = SensorCalibration {
            vref_uv: 4_095_000,
            v25_uv: 1_430_000,
            avg_slope_uv_per_c: 4_300,
        };
        assert_eq!(calibration.to_milli_celsius(1430), 25_000);
    }

    #[test]
    fn test_typical_codes() {
        let calibration = SensorCalibration::STM32F1_TYPICAL;
        assert_eq!(calibration.to_milli_celsius(0), 357_558);
        assert_eq!(calibration.to_milli_celsius(1700), 38_962);
        assert_eq!(calibration.to_milli_celsius(1774), 25_093);
        assert_eq!(calibration.to_milli_celsius(1775), 24_907);
        assert_eq!(calibration.to_milli_celsius(2000), -17_260);
        assert_eq!(calibration.to_milli_celsius(4095), -409_883);
    }

    #[test]
    fn test_default_is_typical() {
        assert_eq!(
            SensorCalibration::default(),
            SensorCalibration::STM32F1_TYPICAL
        );
    }

    #[test]
    fn test_zero_slope_does_not_divide_by_zero() {
        let calibration = SensorCalibration {
            avg_slope_uv_per_c: 0,
            ..SensorCalibration::STM32F1_TYPICAL
        };
        // Treated as 1 µV/°C
        assert_eq!(calibration.to_milli_celsius(0), 1_430_000_000 + 25_000);
    }

    proptest! {
        #[test]
        fn prop_strictly_decreasing(code in 0u16..ADC_MAX_CODE) {
            let calibration = SensorCalibration::STM32F1_TYPICAL;
            prop_assert!(calibration.to_milli_celsius(code) > calibration.to_milli_celsius(code + 1));
        }

        #[test]
        fn prop_deterministic(code in 0u16..=ADC_MAX_CODE) {
            let calibration = SensorCalibration::STM32F1_TYPICAL;
            prop_assert_eq!(calibration.to_milli_celsius(code), calibration.to_milli_celsius(code));
        }
    }
}
