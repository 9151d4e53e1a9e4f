//! State shared between the USART2 interrupt and the tasks
//!
//! The interrupt owns the receive half of the UART and the line receiver;
//! finished lines cross over through [`LINE_SLOT`], and [`LINE_READY`] wakes
//! the dispatcher task.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;

use thermolink_core::serial::LineSlot;
use thermolink_hal_stm32f1::uart::Usart2Rx;
use thermolink_protocol::LineReceiver;

/// Receive side of the serial port, used only from the interrupt
pub struct RxPath {
    pub uart: Usart2Rx,
    pub receiver: LineReceiver,
}

/// Installed by `main` before the interrupt is unmasked
pub static RX_PATH: Mutex<CriticalSectionRawMutex, RefCell<Option<RxPath>>> =
    Mutex::new(RefCell::new(None));

/// Completed line plus completion flag
pub static LINE_SLOT: LineSlot = LineSlot::new();

/// Raised after a line has been published to [`LINE_SLOT`]
pub static LINE_READY: Signal<CriticalSectionRawMutex, ()> = Signal::new();
