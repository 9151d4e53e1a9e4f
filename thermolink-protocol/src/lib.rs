//! Thermolink Serial Command Protocol
//!
//! This crate defines the line-oriented text protocol spoken over the
//! probe's serial port. The host sends one command per line and the probe
//! answers with one line.
//!
//! # Protocol Overview
//!
//! Every line, in both directions, ends with the two-byte terminator
//! `\r\n`:
//! ```text
//! host  → probe   T?\r\n
//! probe → host    Temperature: 23,450 C\r\n
//!
//! host  → probe   anything else\r\n
//! probe → host    Invalid Command\r\n
//! ```
//!
//! Temperatures are carried as integer milli-degrees Celsius and printed
//! with a comma and exactly three fractional digits.
//!
//! Lines longer than [`RX_BUFFER_SIZE`] are discarded up to their
//! terminator and answered with `Line Too Long`.

#![no_std]
#![deny(unsafe_code)]

pub mod command;
pub mod line;
pub mod response;

pub use command::Command;
pub use line::{Line, LineReceiver, ReceivedLine, RxEvent, RX_BUFFER_SIZE, TERMINATOR};
pub use response::{Response, ResponseError, TxBuffer, TX_BUFFER_SIZE};
