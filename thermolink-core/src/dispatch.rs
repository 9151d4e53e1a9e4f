//! Command dispatcher
//!
//! Runs in thread mode. When the slot's completion flag is up it takes
//! the line, works out the response, sends it and releases the slot. The
//! slot is released whatever happened along the way, so the receive path
//! is never left blocked by a failed cycle.

use thermolink_hal::SerialTx;
use thermolink_protocol::{Command, ReceivedLine, Response, ResponseError, TxBuffer};

use crate::serial::{LineSlot, LineTransmitter, TransmitError};
use crate::traits::TemperatureSensor;

/// Errors from producing or sending a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispatchError {
    /// The response did not fit in the transmit buffer
    Format(ResponseError),
    /// The response could not be sent
    Transmit(TransmitError),
}

impl From<ResponseError> for DispatchError {
    fn from(e: ResponseError) -> Self {
        DispatchError::Format(e)
    }
}

impl From<TransmitError> for DispatchError {
    fn from(e: TransmitError) -> Self {
        DispatchError::Transmit(e)
    }
}

/// What one command cycle did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleReport {
    /// Parsed command, `None` for an overlong line
    pub command: Option<Command>,
    /// Response chosen for the line
    pub response: Response,
    /// Whether the response went out
    pub outcome: Result<(), DispatchError>,
}

/// Single consumer of received lines
pub struct Dispatcher<S, U> {
    sensor: S,
    transmitter: LineTransmitter<U>,
    tx_buffer: TxBuffer,
}

impl<S: TemperatureSensor, U: SerialTx> Dispatcher<S, U> {
    /// Create a new dispatcher
    pub fn new(sensor: S, transmitter: LineTransmitter<U>) -> Self {
        Self {
            sensor,
            transmitter,
            tx_buffer: TxBuffer::new(),
        }
    }

    /// Run one command cycle if a line is waiting
    ///
    /// Returns `None` without touching anything when the flag is down.
    pub fn poll(&mut self, slot: &LineSlot) -> Option<CycleReport> {
        if !slot.is_ready() {
            return None;
        }

        let (command, response) = match slot.take() {
            Some(ReceivedLine::Complete(line)) => {
                let command = Command::parse(&line);
                (Some(command), self.execute(command))
            }
            Some(ReceivedLine::TooLong) => (None, Response::LineTooLong),
            // Flag up without a line; answer as for an empty line
            None => (Some(Command::Unknown), Response::InvalidCommand),
        };

        let outcome = self.reply(&response);
        slot.release();

        Some(CycleReport {
            command,
            response,
            outcome,
        })
    }

    /// Work out the response to a command
    pub fn execute(&mut self, command: Command) -> Response {
        match command {
            Command::ReadTemperature => match self.sensor.read_milli_celsius() {
                Ok(milli_celsius) => Response::Temperature { milli_celsius },
                Err(_) => Response::SensorFault,
            },
            Command::Unknown => Response::InvalidCommand,
        }
    }

    /// Format `response` into the cleared transmit buffer and send it
    pub fn reply(&mut self, response: &Response) -> Result<(), DispatchError> {
        self.tx_buffer.clear();
        response.write_to(&mut self.tx_buffer)?;
        self.transmitter.send(&mut self.tx_buffer, true)?;
        Ok(())
    }

    /// Access the sensor
    pub fn sensor(&self) -> &S {
        &self.sensor
    }

    /// Access the transmitter
    pub fn transmitter(&self) -> &LineTransmitter<U> {
        &self.transmitter
    }
}
