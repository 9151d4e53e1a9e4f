//! Board configuration
//!
//! Values come from `board.toml`, validated and turned into constants by
//! `build.rs`.

use embassy_stm32::rcc::{
    ADCPrescaler, AHBPrescaler, APBPrescaler, Pll, PllMul, PllPreDiv, PllSource, Sysclk,
};
use embassy_stm32::Config;
use thermolink_core::config::{FirmwareConfig, SensorCalibration, SerialSettings, WaitBudgets};

include!(concat!(env!("OUT_DIR"), "/board_config.rs"));

/// Clock tree for `embassy_stm32::init`
///
/// HSI/2 through the PLL to SYSCLK, APB2 at SYSCLK, APB1 divided down to
/// the configured UART bus clock, ADC at APB2 / 6.
pub fn rcc_config() -> Config {
    let mut config = Config::default();
    config.rcc.hsi = true;
    config.rcc.pll = Some(Pll {
        src: PllSource::HSI,
        prediv: PllPreDiv::DIV2,
        mul: PLL_MUL,
    });
    config.rcc.sys = Sysclk::PLL1_P;
    config.rcc.ahb_pre = AHBPrescaler::DIV1;
    config.rcc.apb1_pre = APB1_PRE;
    config.rcc.apb2_pre = APBPrescaler::DIV1;
    config.rcc.adc_pre = ADCPrescaler::DIV6;
    config
}
