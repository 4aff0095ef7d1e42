//! Reading encode and decode.
//!
//! A reading is one `(name, value)` pair. On the wire it is the text of a
//! single frame; decoded, it borrows its name out of the frame text it came
//! from.

use core::fmt::Write;

use heapless::{String, Vec};

use crate::frame::{FrameError, MAX_MSG_LEN};

/// One named sensor reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading<'a> {
    /// Sensor name token
    pub name: &'a str,
    /// Sensor value
    pub value: i32,
}

impl<'a> Reading<'a> {
    /// Create a reading with the given name and value
    ///
    /// The name must not contain the frame delimiters (tab, CR, LF).
    pub fn new(name: &'a str, value: i32) -> Result<Self, FrameError> {
        if name.bytes().any(|b| matches!(b, b'\t' | b'\r' | b'\n')) {
            return Err(FrameError::InvalidName);
        }
        Ok(Self { name, value })
    }

    /// Encode this reading into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let text = self.wire_text()?;
        if buffer.len() < text.len() {
            return Err(FrameError::BufferTooSmall);
        }
        buffer[..text.len()].copy_from_slice(text.as_bytes());
        Ok(text.len())
    }

    /// Encode this reading into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_MSG_LEN>, FrameError> {
        let text = self.wire_text()?;
        let mut vec = Vec::new();
        vec.extend_from_slice(text.as_bytes())
            .map_err(|_| FrameError::FrameTooLong)?;
        Ok(vec)
    }

    fn wire_text(&self) -> Result<String<MAX_MSG_LEN>, FrameError> {
        let mut text = String::new();
        writeln!(text, "\r{}\t{}\t", self.name, self.value)
            .map_err(|_| FrameError::FrameTooLong)?;
        Ok(text)
    }
}

/// Outcome of decoding one frame's text
///
/// Failure cases stay distinguishable so callers can react to them;
/// callers that want the permissive treatment simply read every non-reading
/// case as a zero or ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Decoded<'a> {
    /// Both fields present and the value parsed as a decimal integer
    Reading(Reading<'a>),
    /// Both fields present but the value is not a decimal integer
    NonNumeric {
        /// Name token of the offending frame
        name: &'a str,
    },
    /// Fewer than two separator-terminated fields
    MissingField,
}

/// Decode the name field: everything before the first separator
///
/// `None` when the text contains no separator at all, meaning the name
/// field never ended.
pub fn decode_name(raw: &str) -> Option<&str> {
    raw.split_once('\t').map(|(name, _)| name)
}

/// Decode the value field as a decimal integer
///
/// The field runs from the first separator to the next one or to the end
/// of the text, so a frame cut off mid-value still yields the digits that
/// arrived. `None` when the field is absent entirely; `Some(0)` when it is
/// present but not a decimal integer.
pub fn decode_value(raw: &str) -> Option<i32> {
    match decode(raw) {
        Decoded::Reading(reading) => Some(reading.value),
        Decoded::NonNumeric { .. } => Some(0),
        Decoded::MissingField => None,
    }
}

/// Decode a frame's text into a [`Decoded`] outcome
pub fn decode(raw: &str) -> Decoded<'_> {
    let Some(name) = decode_name(raw) else {
        return Decoded::MissingField;
    };
    let rest = &raw[name.len() + 1..];
    if rest.is_empty() {
        return Decoded::MissingField;
    }
    let field = match rest.split_once('\t') {
        Some((field, _)) => field,
        None => rest,
    };
    match field.parse() {
        Ok(value) => Decoded::Reading(Reading { name, value }),
        Err(_) => Decoded::NonNumeric { name },
    }
}

/// Check whether a frame's name field equals `target` exactly
///
/// A frame without a separator has no complete name field and never
/// matches.
pub fn matches(raw: &str, target: &str) -> bool {
    decode_name(raw) == Some(target)
}
