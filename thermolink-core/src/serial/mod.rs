//! Serial line plumbing
//!
//! - [`slot::LineSlot`] hands finished lines from the receive interrupt
//!   to the dispatcher
//! - [`transmit::LineTransmitter`] sends response lines byte by byte

pub mod slot;
pub mod transmit;

pub use slot::LineSlot;
pub use transmit::{LineTransmitter, TransmitError};
