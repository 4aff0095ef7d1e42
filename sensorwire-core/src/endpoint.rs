//! Telemetry endpoint orchestration
//!
//! Ties the frame scanner to a serial link and keeps the last decoded
//! reading. One endpoint owns its link, its scanner, and its scratch
//! storage; nothing here is shared, and concurrent callers must serialize
//! outside.

use embedded_hal::delay::DelayNs;
use heapless::String;

use sensorwire_hal::SerialLink;
use sensorwire_protocol::{
    decode, Decoded, FrameError, FrameScanner, RawFrame, Reading, MAX_MSG_LEN,
};

/// Default pause after each transmitted frame, in milliseconds
pub const DEFAULT_PACING_DELAY_MS: u32 = 100;

/// Outcome of one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PollOutcome {
    /// No complete frame has arrived yet
    Pending,
    /// A well-formed frame was decoded and the reading updated
    Reading,
    /// A frame hit the buffer cap before its terminator; whatever decoded
    /// of it was kept
    Truncated,
    /// A frame arrived with a missing field or non-numeric value
    Malformed,
}

impl PollOutcome {
    /// True for every outcome that delivered a frame, well-formed or not
    pub fn has_frame(&self) -> bool {
        !matches!(self, PollOutcome::Pending)
    }

    /// True when a well-formed reading was stored
    pub fn is_reading(&self) -> bool {
        matches!(self, PollOutcome::Reading)
    }
}

/// Errors from the transmit path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError<E> {
    /// The reading could not be encoded as a frame
    Encode(FrameError),
    /// The transport rejected the write
    Link(E),
}

/// One telemetry endpoint
///
/// Owns the serial link, the delay source for transmit pacing, and the last
/// decoded reading. [`poll`](Self::poll) never blocks;
/// [`poll_blocking`](Self::poll_blocking) and [`send`](Self::send) do, the
/// latter for the pacing delay.
pub struct SensorEndpoint<L, D> {
    link: L,
    delay: D,
    scanner: FrameScanner,
    raw: Option<RawFrame>,
    name: String<MAX_MSG_LEN>,
    value: i32,
    pacing_delay_ms: u32,
}

impl<L, D> SensorEndpoint<L, D>
where
    L: SerialLink,
    D: DelayNs,
{
    /// Create an endpoint over the given link and delay source
    pub fn new(link: L, delay: D) -> Self {
        Self {
            link,
            delay,
            scanner: FrameScanner::new(),
            raw: None,
            name: String::new(),
            value: 0,
            pacing_delay_ms: DEFAULT_PACING_DELAY_MS,
        }
    }

    /// Open the link at the given baud rate
    pub fn init(&mut self, baud: u32) -> Result<(), L::Error> {
        self.link.open(baud)
    }

    /// Poll the link for one frame without blocking
    ///
    /// Drains bytes the link reports available, feeding the scanner. Stops
    /// at the first complete frame so later bytes stay queued in the
    /// transport for the next poll.
    pub fn poll(&mut self) -> PollOutcome {
        while self.link.available() {
            let byte = match self.link.read_byte() {
                Ok(byte) => byte,
                Err(_) => {
                    // The wire protocol carries no transport-failure
                    // outcome; treat the link as idle and leave a trace.
                    #[cfg(feature = "defmt")]
                    defmt::warn!("serial read failed mid-poll");
                    return PollOutcome::Pending;
                }
            };
            if let Some(frame) = self.scanner.feed(byte) {
                return self.accept(frame);
            }
        }
        PollOutcome::Pending
    }

    /// Poll until a frame arrives
    ///
    /// Busy-polls the link with no sleeping of its own; unbounded in
    /// wall-clock time when nothing ever sends. Callers needing a deadline
    /// wrap the link itself. Never returns [`PollOutcome::Pending`].
    pub fn poll_blocking(&mut self) -> PollOutcome {
        loop {
            let outcome = self.poll();
            if outcome.has_frame() {
                return outcome;
            }
        }
    }

    /// Name of the last decoded reading
    ///
    /// Borrowed from endpoint-owned scratch storage; the slice is valid
    /// only until the next poll stores a new reading.
    pub fn last_name(&self) -> &str {
        &self.name
    }

    /// Value of the last decoded reading
    pub fn last_value(&self) -> i32 {
        self.value
    }

    /// Text of the last scanned frame, delimiters included
    pub fn last_raw(&self) -> &str {
        self.raw.as_ref().map(RawFrame::as_str).unwrap_or("")
    }

    /// Set the pause inserted after each `send`
    pub fn set_pacing_delay(&mut self, ms: u32) {
        self.pacing_delay_ms = ms;
    }

    /// Current pacing delay in milliseconds
    pub fn pacing_delay(&self) -> u32 {
        self.pacing_delay_ms
    }

    /// Encode and transmit one reading, then pause for the pacing delay
    ///
    /// The pause throttles transmission so slow receivers keep up; it
    /// blocks the caller deliberately.
    pub fn send(&mut self, name: &str, value: i32) -> Result<(), SendError<L::Error>> {
        let reading = Reading::new(name, value).map_err(SendError::Encode)?;
        let encoded = reading.encode_to_vec().map_err(SendError::Encode)?;
        self.link.write(&encoded).map_err(SendError::Link)?;
        self.delay.delay_ms(self.pacing_delay_ms);
        Ok(())
    }

    /// Access the owned link, e.g. for transport management
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    fn accept(&mut self, frame: RawFrame) -> PollOutcome {
        let truncated = frame.is_truncated();
        let outcome = match decode(frame.as_str()) {
            Decoded::Reading(reading) => {
                self.store(reading.name, reading.value);
                if truncated {
                    PollOutcome::Truncated
                } else {
                    PollOutcome::Reading
                }
            }
            Decoded::NonNumeric { name } => {
                // non-numeric values read as zero
                self.store(name, 0);
                if truncated {
                    PollOutcome::Truncated
                } else {
                    PollOutcome::Malformed
                }
            }
            Decoded::MissingField => {
                if truncated {
                    PollOutcome::Truncated
                } else {
                    PollOutcome::Malformed
                }
            }
        };
        self.raw = Some(frame);
        outcome
    }

    fn store(&mut self, name: &str, value: i32) {
        self.name.clear();
        // Cannot fail: frame text is always shorter than the scratch
        // capacity
        let _ = self.name.push_str(name);
        self.value = value;
    }
}
