//! USART2 receive interrupt
//!
//! One byte per invocation. Finished lines are published to the slot; the
//! handler never blocks on the dispatcher.

use defmt::*;
use embassy_stm32::interrupt;

use thermolink_hal::SerialRx;
use thermolink_protocol::{ReceivedLine, RxEvent};

use crate::channels::{LINE_READY, LINE_SLOT, RX_PATH};

#[interrupt]
fn USART2() {
    let event = RX_PATH.lock(|path| {
        let mut path = path.borrow_mut();
        let path = path.as_mut()?;

        if !path.uart.has_data() {
            return None;
        }
        // Reading DR clears RXNE (and a pending overrun)
        let byte = path.uart.read_data();
        Some(path.receiver.feed(byte))
    });

    match event {
        Some(RxEvent::Line(line)) => publish(line),
        Some(RxEvent::Overflow) => warn!("Line exceeds receive buffer, discarding to terminator"),
        Some(RxEvent::Pending) | None => {}
    }
}

fn publish(line: ReceivedLine) {
    match LINE_SLOT.publish(line) {
        Ok(()) => LINE_READY.signal(()),
        Err(_) => warn!(
            "Line dropped, previous command still in progress ({} total)",
            LINE_SLOT.dropped()
        ),
    }
}
