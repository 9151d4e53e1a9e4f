//! Configuration type definitions
//!
//! Defaults describe the reference board: APB1 at 32 MHz, 57600 baud,
//! typical sensor constants. The firmware overrides them from its
//! build-time board file.

use thermolink_hal::UartConfig;

use super::calibration::SensorCalibration;

/// Poll limits for the bounded busy-waits
///
/// Each value is the number of status register reads before the wait
/// gives up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WaitBudgets {
    /// Calibration reset and self-calibration, each
    pub calibration: u32,
    /// One conversion
    pub conversion: u32,
    /// Transmission complete, per byte
    pub transmit: u32,
}

impl Default for WaitBudgets {
    fn default() -> Self {
        Self {
            calibration: 100_000,
            conversion: 10_000,
            // One byte at 57600 baud is ~174 µs
            transmit: 50_000,
        }
    }
}

/// Serial port settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SerialSettings {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// APB1 bus clock feeding the UART, in Hz
    pub pclk1_hz: u32,
}

impl Default for SerialSettings {
    fn default() -> Self {
        Self {
            baudrate: 57_600,
            pclk1_hz: 32_000_000,
        }
    }
}

impl SerialSettings {
    /// 8N1 UART configuration at the configured baud rate
    pub const fn uart_config(&self) -> UartConfig {
        UartConfig::with_baudrate(self.baudrate)
    }
}

/// Complete firmware configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FirmwareConfig {
    /// Serial port
    pub serial: SerialSettings,
    /// Sensor constants
    pub calibration: SensorCalibration,
    /// Busy-wait limits
    pub budgets: WaitBudgets,
    /// Core cycles to spin while the sensor powers up (~2 µs)
    pub settle_cycles: u32,
}

impl Default for FirmwareConfig {
    fn default() -> Self {
        Self {
            serial: SerialSettings::default(),
            calibration: SensorCalibration::default(),
            budgets: WaitBudgets::default(),
            // 2 µs at 64 MHz
            settle_cycles: 128,
        }
    }
}
