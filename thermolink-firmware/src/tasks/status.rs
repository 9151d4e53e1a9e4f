//! Periodic health report

use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::channels::LINE_SLOT;

/// Status check interval in milliseconds
const STATUS_INTERVAL_MS: u64 = 10_000;

/// Logs the dropped-line counter whenever it has moved
#[embassy_executor::task]
pub async fn status_task() {
    info!("Status task started");

    let mut ticker = Ticker::every(Duration::from_millis(STATUS_INTERVAL_MS));
    let mut reported = 0;

    loop {
        ticker.next().await;

        let dropped = LINE_SLOT.dropped();
        if dropped != reported {
            warn!(
                "{} line(s) dropped since boot, commands arriving faster than replies",
                dropped
            );
            reported = dropped;
        }
    }
}
