//! Fake peripherals for host tests

use core::cell::Cell;

use heapless::Vec;
use thermolink_hal::{SerialTx, TemperatureAdc};

use crate::traits::{SensorError, TemperatureSensor};

/// Register operations performed on [`FakeAdc`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdcOp {
    EnableClock,
    PowerOn,
    Settle,
    StartCalibrationReset,
    StartCalibration,
    SetMaxSampleTime,
    SelectSensorChannel,
    StartConversion,
    ReadData,
}

/// Polls before a status bit flips; larger than any budget used in tests
pub const STUCK: u32 = u32::MAX;

/// Converter that records every operation and counts down busy bits
pub struct FakeAdc {
    pub ops: Vec<AdcOp, 64>,
    pub code: u16,
    pub reset_polls: u32,
    pub calibration_polls: u32,
    pub conversion_polls: u32,
    reset_remaining: Cell<u32>,
    calibration_remaining: Cell<u32>,
    conversion_remaining: Cell<u32>,
    converting: Cell<bool>,
}

impl FakeAdc {
    pub fn new(code: u16) -> Self {
        Self {
            ops: Vec::new(),
            code,
            reset_polls: 2,
            calibration_polls: 3,
            conversion_polls: 4,
            reset_remaining: Cell::new(0),
            calibration_remaining: Cell::new(0),
            conversion_remaining: Cell::new(0),
            converting: Cell::new(false),
        }
    }

    fn record(&mut self, op: AdcOp) {
        self.ops.push(op).unwrap();
    }

    /// True while busy, counting down one poll each call
    fn count_down(remaining: &Cell<u32>) -> bool {
        let left = remaining.get();
        if left == 0 {
            return false;
        }
        remaining.set(left - 1);
        true
    }
}

impl TemperatureAdc for FakeAdc {
    fn enable_clock(&mut self) {
        self.record(AdcOp::EnableClock);
    }

    fn power_on(&mut self) {
        self.record(AdcOp::PowerOn);
    }

    fn settle(&mut self) {
        self.record(AdcOp::Settle);
    }

    fn start_calibration_reset(&mut self) {
        self.record(AdcOp::StartCalibrationReset);
        self.reset_remaining.set(self.reset_polls);
    }

    fn is_calibration_reset_pending(&self) -> bool {
        Self::count_down(&self.reset_remaining)
    }

    fn start_calibration(&mut self) {
        self.record(AdcOp::StartCalibration);
        self.calibration_remaining.set(self.calibration_polls);
    }

    fn is_calibrating(&self) -> bool {
        Self::count_down(&self.calibration_remaining)
    }

    fn set_max_sample_time(&mut self) {
        self.record(AdcOp::SetMaxSampleTime);
    }

    fn select_sensor_channel(&mut self) {
        self.record(AdcOp::SelectSensorChannel);
    }

    fn start_conversion(&mut self) {
        self.record(AdcOp::StartConversion);
        self.conversion_remaining.set(self.conversion_polls);
        self.converting.set(true);
    }

    fn is_conversion_complete(&self) -> bool {
        self.converting.get() && !Self::count_down(&self.conversion_remaining)
    }

    fn read_data(&mut self) -> u16 {
        self.record(AdcOp::ReadData);
        self.converting.set(false);
        self.code
    }
}

/// Transmitter that captures bytes and simulates per-byte latency
pub struct FakeUart {
    pub sent: Vec<u8, 256>,
    /// Polls after a write before TC is set
    pub latency: u32,
    /// TC never sets again once this many bytes were written
    pub stall_after: Option<usize>,
    /// Writes issued while the previous byte was still shifting out
    pub overlapped_writes: u32,
    busy: Cell<u32>,
}

impl FakeUart {
    pub fn new() -> Self {
        Self {
            sent: Vec::new(),
            latency: 2,
            stall_after: None,
            overlapped_writes: 0,
            busy: Cell::new(0),
        }
    }

    pub fn stalling_after(bytes: usize) -> Self {
        Self {
            stall_after: Some(bytes),
            ..Self::new()
        }
    }

    pub fn sent_str(&self) -> &str {
        core::str::from_utf8(&self.sent).unwrap()
    }
}

impl SerialTx for FakeUart {
    fn write_data(&mut self, byte: u8) {
        if self.busy.get() > 0 {
            self.overlapped_writes += 1;
        }
        self.sent.push(byte).unwrap();
        self.busy.set(self.latency);
    }

    fn is_transmission_complete(&self) -> bool {
        if let Some(limit) = self.stall_after {
            if self.sent.len() >= limit {
                return false;
            }
        }
        let left = self.busy.get();
        if left == 0 {
            return true;
        }
        self.busy.set(left - 1);
        false
    }
}

/// Sensor returning a fixed result
pub struct FakeSensor {
    pub reading: Result<i32, SensorError>,
    pub reads: u32,
}

impl FakeSensor {
    pub fn reading(milli_celsius: i32) -> Self {
        Self {
            reading: Ok(milli_celsius),
            reads: 0,
        }
    }

    pub fn failing(error: SensorError) -> Self {
        Self {
            reading: Err(error),
            reads: 0,
        }
    }
}

impl TemperatureSensor for FakeSensor {
    fn read_milli_celsius(&mut self) -> Result<i32, SensorError> {
        self.reads += 1;
        self.reading
    }
}
