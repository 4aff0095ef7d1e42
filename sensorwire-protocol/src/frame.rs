//! Frame delimiting and scanning.
//!
//! Frame format:
//! - START (1 byte): `\r` synchronization byte
//! - NAME: ASCII token, no tab/CR/LF
//! - SEP (1 byte): `\t`
//! - VALUE: ASCII decimal integer, optional leading `-`
//! - SEP (1 byte): `\t`
//! - END (1 byte): `\n`

use heapless::Vec;

/// Frame synchronization byte
pub const FRAME_START: u8 = b'\r';

/// Field separator between name and value
pub const FIELD_SEP: u8 = b'\t';

/// Frame terminator
pub const FRAME_END: u8 = b'\n';

/// Maximum complete frame size in bytes, terminator included
pub const MAX_MSG_LEN: usize = 32;

/// Advisory maximum name length
///
/// Senders are expected to stay within it, but only the whole-frame cap is
/// enforced anywhere.
pub const MAX_NAME_LEN: usize = 10;

/// Errors that can occur while encoding a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Name contains a delimiter byte (tab, CR, or LF)
    InvalidName,
    /// Encoded frame exceeds [`MAX_MSG_LEN`]
    FrameTooLong,
    /// Caller buffer too small for encoding
    BufferTooSmall,
}

/// One delimited frame recovered from the byte stream
///
/// Holds the frame text after the start marker, terminator included. A
/// frame that hit the buffer cap before its terminator arrived carries the
/// truncated flag instead; its text is whatever fit.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RawFrame {
    text: Vec<u8, MAX_MSG_LEN>,
    truncated: bool,
}

impl RawFrame {
    /// Frame text as a string slice
    ///
    /// Non-UTF-8 content reads as the empty string.
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.text).unwrap_or("")
    }

    /// Raw frame bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.text
    }

    /// True if the frame hit the buffer cap before its terminator arrived
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Frame text length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True for a frame with no text
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// State machine that recovers frames from an unbounded byte stream
///
/// Feed bytes one at a time: the scanner discards everything up to the next
/// start marker, then collects frame text until the terminator or the
/// buffer cap. Feeding never blocks; `None` means no complete frame yet,
/// and partial progress is kept across calls.
#[derive(Debug, Clone)]
pub struct FrameScanner {
    state: ScanState,
    buffer: Vec<u8, MAX_MSG_LEN>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Discarding bytes until a start marker
    WaitingForStart,
    /// Collecting frame text
    Collecting,
}

impl Default for FrameScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScanner {
    /// Create a new frame scanner
    pub fn new() -> Self {
        Self {
            state: ScanState::WaitingForStart,
            buffer: Vec::new(),
        }
    }

    /// Reset to waiting-for-start, dropping any partial frame
    pub fn reset(&mut self) {
        self.state = ScanState::WaitingForStart;
        self.buffer.clear();
    }

    /// Feed a single byte to the scanner
    ///
    /// Returns `Some(frame)` when a frame completes, `None` when more bytes
    /// are needed. A frame completes on its `\n` terminator, or early with
    /// the truncated flag set once `MAX_MSG_LEN - 1` bytes accumulate
    /// without one. A start marker seen while collecting is ordinary data.
    pub fn feed(&mut self, byte: u8) -> Option<RawFrame> {
        match self.state {
            ScanState::WaitingForStart => {
                if byte == FRAME_START {
                    // a fresh frame never keeps bytes from an earlier one
                    self.buffer.clear();
                    self.state = ScanState::Collecting;
                }
                None
            }
            ScanState::Collecting => {
                // Cannot fail: the completion checks below keep the length
                // under capacity between calls
                let _ = self.buffer.push(byte);
                if byte == FRAME_END {
                    Some(self.complete(false))
                } else if self.buffer.len() >= MAX_MSG_LEN - 1 {
                    Some(self.complete(true))
                } else {
                    None
                }
            }
        }
    }

    /// Feed multiple bytes to the scanner
    ///
    /// Returns the first complete frame found, if any. Remaining bytes
    /// after a complete frame are not consumed.
    pub fn feed_bytes(&mut self, bytes: &[u8]) -> Option<RawFrame> {
        for &byte in bytes {
            if let Some(frame) = self.feed(byte) {
                return Some(frame);
            }
        }
        None
    }

    fn complete(&mut self, truncated: bool) -> RawFrame {
        let frame = RawFrame {
            text: self.buffer.clone(),
            truncated,
        };
        self.reset();
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_complete_frame() {
        let mut scanner = FrameScanner::new();
        let frame = scanner.feed_bytes(b"\raccel\t512\t\n").unwrap();
        assert_eq!(frame.as_str(), "accel\t512\t\n");
        assert!(!frame.is_truncated());
    }

    #[test]
    fn test_scanner_resync_after_garbage() {
        let mut scanner = FrameScanner::new();
        assert!(scanner.feed_bytes(b"\x00\xffjunk\n\t").is_none());
        let frame = scanner.feed_bytes(b"\rtemp\t-3\t\n").unwrap();
        assert_eq!(frame.as_str(), "temp\t-3\t\n");
    }

    #[test]
    fn test_scanner_truncates_at_capacity() {
        let mut scanner = FrameScanner::new();
        assert!(scanner.feed(b'\r').is_none());

        let mut frame = None;
        for _ in 0..40 {
            if let Some(f) = scanner.feed(b'A') {
                frame = Some(f);
                break;
            }
        }

        let frame = frame.unwrap();
        assert!(frame.is_truncated());
        assert_eq!(frame.len(), MAX_MSG_LEN - 1);
        assert!(!frame.as_bytes().contains(&FRAME_END));

        // leftover bytes fall into the resynchronization wait
        assert!(scanner.feed_bytes(b"AAAAAAAAA").is_none());
    }

    #[test]
    fn test_terminator_on_last_slot_is_not_truncated() {
        // 27-char name + "\t1\t\n" lands the terminator on the final byte
        let mut scanner = FrameScanner::new();
        let frame = scanner
            .feed_bytes(b"\rAAAAAAAAAAAAAAAAAAAAAAAAAAA\t1\t\n")
            .unwrap();
        assert_eq!(frame.len(), MAX_MSG_LEN - 1);
        assert!(!frame.is_truncated());
    }

    #[test]
    fn test_no_leak_between_frames() {
        let mut scanner = FrameScanner::new();
        let first = scanner.feed_bytes(b"\rlongname\t123456\t\n").unwrap();
        assert_eq!(first.as_str(), "longname\t123456\t\n");

        let second = scanner.feed_bytes(b"\rab\t2\t\n").unwrap();
        assert_eq!(second.as_str(), "ab\t2\t\n");
    }

    #[test]
    fn test_start_marker_mid_frame_is_data() {
        let mut scanner = FrameScanner::new();
        let frame = scanner.feed_bytes(b"\ra\rb\t1\t\n").unwrap();
        assert_eq!(frame.as_str(), "a\rb\t1\t\n");
    }

    #[test]
    fn test_reset_drops_partial_frame() {
        let mut scanner = FrameScanner::new();
        assert!(scanner.feed_bytes(b"\raccel\t5").is_none());
        scanner.reset();

        let frame = scanner.feed_bytes(b"\rgyro\t9\t\n").unwrap();
        assert_eq!(frame.as_str(), "gyro\t9\t\n");
    }

    #[test]
    fn test_empty_frame() {
        let mut scanner = FrameScanner::new();
        let frame = scanner.feed_bytes(b"\r\n").unwrap();
        assert_eq!(frame.as_str(), "\n");
        assert!(!frame.is_truncated());
    }
}
