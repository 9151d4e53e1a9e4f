//! Single-line handoff between the receive interrupt and the dispatcher
//!
//! The slot holds at most one finished line plus the completion flag. The
//! interrupt is the only writer that raises the flag, the dispatcher the
//! only one that lowers it, and it does so only after it is done with the
//! line. Lines are moved in and out, never shared.
//!
//! While the flag is up the receiver keeps assembling the next line in its
//! own buffer. If that line finishes before the dispatcher has released the
//! slot, it is rejected and counted as dropped.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use portable_atomic::{AtomicBool, AtomicU32, Ordering};
use thermolink_protocol::ReceivedLine;

/// Line handoff slot with its completion flag
pub struct LineSlot {
    /// Completion flag
    ready: AtomicBool,
    line: Mutex<CriticalSectionRawMutex, RefCell<Option<ReceivedLine>>>,
    dropped: AtomicU32,
}

impl Default for LineSlot {
    fn default() -> Self {
        Self::new()
    }
}

impl LineSlot {
    /// Create an empty slot with the flag down
    pub const fn new() -> Self {
        Self {
            ready: AtomicBool::new(false),
            line: Mutex::new(RefCell::new(None)),
            dropped: AtomicU32::new(0),
        }
    }

    /// Hand a finished line over and raise the flag (producer side)
    ///
    /// Gives the line back if the previous one has not been released yet.
    pub fn publish(&self, line: ReceivedLine) -> Result<(), ReceivedLine> {
        if self.ready.load(Ordering::Acquire) {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(line);
        }

        self.line.lock(|slot| *slot.borrow_mut() = Some(line));
        self.ready.store(true, Ordering::Release);
        Ok(())
    }

    /// Read the completion flag
    ///
    /// Always a fresh load; the flag changes from interrupt context.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Move the pending line out (consumer side)
    ///
    /// The flag stays up until [`release`](Self::release), so the producer
    /// cannot publish over a line that is still being handled.
    pub fn take(&self) -> Option<ReceivedLine> {
        if !self.is_ready() {
            return None;
        }
        self.line.lock(|slot| slot.borrow_mut().take())
    }

    /// Empty the slot and lower the flag (consumer side)
    pub fn release(&self) {
        self.line.lock(|slot| *slot.borrow_mut() = None);
        self.ready.store(false, Ordering::Release);
    }

    /// Check that no line is stored
    pub fn is_empty(&self) -> bool {
        self.line.lock(|slot| slot.borrow().is_none())
    }

    /// Number of lines rejected because the slot was still occupied
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}
