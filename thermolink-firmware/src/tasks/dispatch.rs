//! Command dispatch task
//!
//! Sleeps until the receive interrupt signals a line, then runs command
//! cycles until the slot is empty.

use defmt::*;

use thermolink_core::dispatch::{CycleReport, Dispatcher};
use thermolink_core::sensor::InternalTempSensor;
use thermolink_hal_stm32f1::adc::Adc1TempSensor;
use thermolink_hal_stm32f1::uart::Usart2Tx;
use thermolink_protocol::Response;

use crate::channels::{LINE_READY, LINE_SLOT};

/// Dispatcher wired to the on-chip sensor and USART2
pub type ProbeDispatcher = Dispatcher<InternalTempSensor<Adc1TempSensor>, Usart2Tx>;

#[embassy_executor::task]
pub async fn dispatch_task(mut dispatcher: ProbeDispatcher) {
    info!("Dispatch task started");

    loop {
        LINE_READY.wait().await;

        // The flag is the source of truth, the signal only wakes us
        while let Some(report) = dispatcher.poll(&LINE_SLOT) {
            log_cycle(&report);
        }
    }
}

fn log_cycle(report: &CycleReport) {
    if let Response::SensorFault = report.response {
        warn!("Temperature read failed");
    }

    match report.outcome {
        Ok(()) => debug!("{:?} -> {:?}", report.command, report.response),
        Err(e) => warn!("Reply {:?} not sent: {:?}", report.response, e),
    }
}
