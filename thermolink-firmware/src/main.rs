//! Thermolink - Serial Thermometer Firmware
//!
//! Answers `T?` on USART2 with the die temperature measured by the
//! STM32F103's internal sensor. Anything else gets `Invalid Command`.
//!
//! Bytes arrive one per interrupt and are assembled into lines in interrupt
//! context; the dispatcher task takes finished lines, samples the sensor
//! and writes the reply.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_stm32::interrupt::{self, InterruptExt};
use {defmt_rtt as _, panic_probe as _};

use thermolink_core::dispatch::Dispatcher;
use thermolink_core::sensor::InternalTempSensor;
use thermolink_core::serial::LineTransmitter;
use thermolink_hal_stm32f1::adc::Adc1TempSensor;
use thermolink_hal_stm32f1::{gpio, uart};
use thermolink_protocol::LineReceiver;

use crate::channels::{RxPath, RX_PATH};

mod board;
mod channels;
mod irq;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Thermolink firmware starting...");

    let config = board::BOARD;

    // Clock tree only; the drivers below own their registers directly
    let _p = embassy_stm32::init(board::rcc_config());
    info!(
        "Clocks configured: SYSCLK={} Hz, PCLK1={} Hz",
        board::SYSCLK_HZ,
        config.serial.pclk1_hz
    );

    gpio::route_usart2();
    let (tx, rx) = match uart::init_usart2(&config.serial.uart_config(), config.serial.pclk1_hz)
    {
        Ok(halves) => halves,
        Err(e) => defmt::panic!("USART2 init failed: {:?}", e),
    };
    info!("USART2 ready at {} baud", config.serial.baudrate);

    RX_PATH.lock(|path| {
        *path.borrow_mut() = Some(RxPath {
            uart: rx,
            receiver: LineReceiver::new(),
        });
    });

    // A failed bring-up is not fatal: `T?` is answered with `Sensor Fault`
    let mut sensor = InternalTempSensor::new(
        Adc1TempSensor::new(config.settle_cycles),
        config.calibration,
        config.budgets,
    );
    match sensor.initialize() {
        Ok(()) => info!("Temperature sensor calibrated"),
        Err(e) => error!("Temperature sensor bring-up failed: {:?}", e),
    }

    let dispatcher = Dispatcher::new(
        sensor,
        LineTransmitter::new(tx, config.budgets.transmit),
    );

    spawner.spawn(tasks::dispatch_task(dispatcher)).unwrap();
    spawner.spawn(tasks::status_task()).unwrap();

    // RX_PATH is installed, so the handler has somewhere to put bytes
    unsafe { interrupt::USART2.enable() };

    info!("Ready for commands");
}
