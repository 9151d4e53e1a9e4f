//! Line assembly for the serial command protocol.
//!
//! Bytes arrive one at a time from the receive interrupt. The receiver
//! appends them to a bounded buffer and reports a finished line when a
//! line feed directly follows a carriage return. The finished buffer is
//! moved out to the caller and the receiver starts over with an empty one.
//!
//! Overflow policy: once a line no longer fits, the receiver drops bytes
//! until the next terminator and then reports the line as
//! [`ReceivedLine::TooLong`].

use heapless::Vec;

/// Receive buffer capacity in bytes, terminator included
pub const RX_BUFFER_SIZE: usize = 64;

/// Line terminator
pub const TERMINATOR: &[u8; 2] = b"\r\n";

const CR: u8 = 0x0D;
const LF: u8 = 0x0A;

/// Raw bytes of one received line
pub type Line = Vec<u8, RX_BUFFER_SIZE>;

/// A line handed over by the receiver
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceivedLine {
    /// Complete line, ending with the terminator
    Complete(Line),
    /// Line exceeded the buffer and was discarded
    TooLong,
}

impl ReceivedLine {
    /// Bytes of a complete line, terminator included
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            ReceivedLine::Complete(line) => Some(line.as_slice()),
            ReceivedLine::TooLong => None,
        }
    }
}

/// Result of feeding one byte
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxEvent {
    /// Byte consumed, line not finished yet
    Pending,
    /// The current line just outgrew the buffer
    Overflow,
    /// A terminator finished a line
    Line(ReceivedLine),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RxState {
    /// Appending bytes to the buffer
    Accumulating,
    /// Dropping bytes until the next terminator
    Discarding,
}

/// Byte-at-a-time line assembler
#[derive(Debug, Clone)]
pub struct LineReceiver {
    state: RxState,
    buffer: Line,
    /// Previously received byte of the current line, if any
    prev: Option<u8>,
}

impl Default for LineReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl LineReceiver {
    /// Create an empty receiver
    pub const fn new() -> Self {
        Self {
            state: RxState::Accumulating,
            buffer: Vec::new(),
            prev: None,
        }
    }

    /// Drop any partial line and start over
    pub fn reset(&mut self) {
        self.state = RxState::Accumulating;
        self.buffer.clear();
        self.prev = None;
    }

    /// Bytes of the line assembled so far
    pub fn buffered(&self) -> &[u8] {
        &self.buffer
    }

    /// True while dropping the tail of an overlong line
    pub fn is_discarding(&self) -> bool {
        self.state == RxState::Discarding
    }

    /// Feed a single received byte
    pub fn feed(&mut self, byte: u8) -> RxEvent {
        // The first byte of a line has no predecessor, so a leading LF
        // is plain data.
        let terminated = byte == LF && self.prev == Some(CR);
        self.prev = Some(byte);

        match self.state {
            RxState::Accumulating => {
                if self.buffer.push(byte).is_err() {
                    if terminated {
                        // Only the LF did not fit
                        self.reset();
                        return RxEvent::Line(ReceivedLine::TooLong);
                    }
                    self.buffer.clear();
                    self.state = RxState::Discarding;
                    return RxEvent::Overflow;
                }

                if terminated {
                    let line = core::mem::take(&mut self.buffer);
                    self.reset();
                    return RxEvent::Line(ReceivedLine::Complete(line));
                }

                RxEvent::Pending
            }
            RxState::Discarding => {
                if terminated {
                    self.reset();
                    RxEvent::Line(ReceivedLine::TooLong)
                } else {
                    RxEvent::Pending
                }
            }
        }
    }

    /// Feed multiple bytes
    ///
    /// Returns the first finished line, if any.
    /// Remaining bytes after a finished line are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<ReceivedLine> {
        for &byte in bytes {
            if let RxEvent::Line(line) = self.feed(byte) {
                return Some(line);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn complete(bytes: &[u8]) -> ReceivedLine {
        ReceivedLine::Complete(Line::from_slice(bytes).unwrap())
    }

    #[test]
    fn test_command_line_completes() {
        let mut rx = LineReceiver::new();
        assert_eq!(rx.feed(b'T'), RxEvent::Pending);
        assert_eq!(rx.feed(b'?'), RxEvent::Pending);
        assert_eq!(rx.feed(b'\r'), RxEvent::Pending);
        assert_eq!(rx.feed(b'\n'), RxEvent::Line(complete(b"T?\r\n")));
    }

    #[test]
    fn test_buffer_empty_after_line() {
        let mut rx = LineReceiver::new();
        rx.feed_bytes(b"T?\r\n").unwrap();
        assert!(rx.buffered().is_empty());
    }

    #[test]
    fn test_empty_line() {
        let mut rx = LineReceiver::new();
        assert_eq!(rx.feed_bytes(b"\r\n"), Some(complete(b"\r\n")));
    }

    #[test]
    fn test_lone_lf_does_not_complete() {
        let mut rx = LineReceiver::new();
        assert_eq!(rx.feed_bytes(b"T?\n"), None);
        assert_eq!(rx.buffered(), b"T?\n");
    }

    #[test]
    fn test_leading_lf_is_data() {
        let mut rx = LineReceiver::new();
        assert_eq!(rx.feed(b'\n'), RxEvent::Pending);
        assert_eq!(rx.buffered(), b"\n");
    }

    #[test]
    fn test_reversed_terminator_does_not_complete() {
        let mut rx = LineReceiver::new();
        assert_eq!(rx.feed_bytes(b"X\n\r"), None);
        assert_eq!(rx.feed(b'\n'), RxEvent::Line(complete(b"X\n\r\n")));
    }

    #[test]
    fn test_lf_after_finished_line_is_data() {
        let mut rx = LineReceiver::new();
        rx.feed_bytes(b"T?\r\n").unwrap();
        // The CR belonged to the previous line
        assert_eq!(rx.feed(b'\n'), RxEvent::Pending);
    }

    #[test]
    fn test_consecutive_lines() {
        let mut rx = LineReceiver::new();
        assert_eq!(rx.feed_bytes(b"X\r\n"), Some(complete(b"X\r\n")));
        assert_eq!(rx.feed_bytes(b"T?\r\n"), Some(complete(b"T?\r\n")));
    }

    #[test]
    fn test_line_filling_buffer_exactly() {
        let mut data = [b'a'; RX_BUFFER_SIZE];
        data[RX_BUFFER_SIZE - 2] = b'\r';
        data[RX_BUFFER_SIZE - 1] = b'\n';

        let mut rx = LineReceiver::new();
        assert_eq!(rx.feed_bytes(&data), Some(complete(&data)));
    }

    #[test]
    fn test_terminator_one_past_capacity() {
        let mut data = [b'a'; RX_BUFFER_SIZE + 1];
        data[RX_BUFFER_SIZE - 1] = b'\r';
        data[RX_BUFFER_SIZE] = b'\n';

        let mut rx = LineReceiver::new();
        assert_eq!(rx.feed_bytes(&data), Some(ReceivedLine::TooLong));
        assert!(!rx.is_discarding());
    }

    #[test]
    fn test_overflow_discards_until_terminator() {
        let mut rx = LineReceiver::new();
        for _ in 0..RX_BUFFER_SIZE {
            assert_eq!(rx.feed(b'x'), RxEvent::Pending);
        }
        assert_eq!(rx.feed(b'x'), RxEvent::Overflow);
        assert!(rx.is_discarding());
        assert!(rx.buffered().is_empty());

        assert_eq!(rx.feed_bytes(b"more garbage"), None);
        assert_eq!(rx.feed_bytes(b"\r\n"), Some(ReceivedLine::TooLong));

        // Recovers for the next line
        assert_eq!(rx.feed_bytes(b"T?\r\n"), Some(complete(b"T?\r\n")));
    }

    #[test]
    fn test_reset_drops_partial_line() {
        let mut rx = LineReceiver::new();
        rx.feed_bytes(b"T?\r");
        rx.reset();
        // The CR was dropped with the rest
        assert_eq!(rx.feed(b'\n'), RxEvent::Pending);
    }

    #[test]
    fn test_received_line_bytes() {
        assert_eq!(complete(b"T?\r\n").bytes(), Some(&b"T?\r\n"[..]));
        assert_eq!(ReceivedLine::TooLong.bytes(), None);
    }

    proptest! {
        #[test]
        fn prop_buffer_never_exceeds_capacity(bytes in proptest::collection::vec(any::<u8>(), 0..512)) {
            let mut rx = LineReceiver::new();
            for byte in bytes {
                if let RxEvent::Line(ReceivedLine::Complete(line)) = rx.feed(byte) {
                    prop_assert!(line.len() <= RX_BUFFER_SIZE);
                    prop_assert!(line.ends_with(TERMINATOR));
                }
                prop_assert!(rx.buffered().len() <= RX_BUFFER_SIZE);
            }
        }

        #[test]
        fn prop_no_line_without_lf(bytes in proptest::collection::vec(any::<u8>().prop_filter("no LF", |b| *b != LF), 0..256)) {
            let mut rx = LineReceiver::new();
            for byte in bytes {
                let is_line = matches!(rx.feed(byte), RxEvent::Line(_));
                prop_assert!(!is_line);
            }
        }
    }
}
