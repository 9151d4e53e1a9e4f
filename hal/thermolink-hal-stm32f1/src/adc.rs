//! ADC1 temperature sensor channel for STM32F1
//!
//! The sensor is internally connected to ADC1_IN16 and is powered by the
//! TSVREFE bit. The reference manual requires the longest sample time
//! (239.5 cycles) for this channel. ADCCLK must not exceed 14 MHz; the
//! prescaler is part of the clock configuration passed to
//! `embassy_stm32::init`.

use embassy_stm32::pac;
use embassy_stm32::pac::adc::vals::SampleTime;
use thermolink_hal::TemperatureAdc;

/// ADC channel wired to the temperature sensor
pub const TEMPERATURE_CHANNEL: u8 = 16;

/// Data register mask for 12-bit right-aligned results
const DATA_MASK: u32 = 0x0FFF;

/// ADC1 driving the temperature sensor channel
pub struct Adc1TempSensor {
    /// Busy-spin length used for the sensor start-up delay
    settle_cycles: u32,
}

impl Adc1TempSensor {
    /// Create the driver
    ///
    /// `settle_cycles` is the number of core cycles to spin after powering
    /// the sensor; the sensor needs about 2 µs.
    pub fn new(settle_cycles: u32) -> Self {
        Self { settle_cycles }
    }
}

impl TemperatureAdc for Adc1TempSensor {
    fn enable_clock(&mut self) {
        pac::RCC.apb2enr().modify(|w| w.set_adc1en(true));
    }

    fn power_on(&mut self) {
        pac::ADC1.cr2().modify(|w| {
            w.set_adon(true);
            w.set_tsvrefe(true);
        });
    }

    fn settle(&mut self) {
        cortex_m::asm::delay(self.settle_cycles);
    }

    fn start_calibration_reset(&mut self) {
        pac::ADC1.cr2().modify(|w| w.set_rstcal(true));
    }

    fn is_calibration_reset_pending(&self) -> bool {
        pac::ADC1.cr2().read().rstcal()
    }

    fn start_calibration(&mut self) {
        pac::ADC1.cr2().modify(|w| w.set_cal(true));
    }

    fn is_calibrating(&self) -> bool {
        pac::ADC1.cr2().read().cal()
    }

    fn set_max_sample_time(&mut self) {
        // Channels 10..=17 live in SMPR1
        let index = (TEMPERATURE_CHANNEL - 10) as usize;
        pac::ADC1
            .smpr1()
            .modify(|w| w.set_smp(index, SampleTime::CYCLES239_5));
    }

    fn select_sensor_channel(&mut self) {
        // Single conversion in the regular sequence
        pac::ADC1.sqr1().modify(|w| w.set_l(0));
        pac::ADC1.sqr3().write(|w| w.set_sq(0, TEMPERATURE_CHANNEL));
    }

    fn start_conversion(&mut self) {
        // Writing ADON again while the converter is on starts a conversion
        pac::ADC1.cr2().modify(|w| w.set_adon(true));
    }

    fn is_conversion_complete(&self) -> bool {
        pac::ADC1.sr().read().eoc()
    }

    fn read_data(&mut self) -> u16 {
        // Reading DR clears EOC
        (pac::ADC1.dr().read().0 & DATA_MASK) as u16
    }
}
