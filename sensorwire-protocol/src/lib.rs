//! Sensorwire telemetry wire protocol
//!
//! This crate defines the text protocol spoken between a sensor-bearing
//! board and whatever reads it over a serial line. One message carries one
//! named integer reading.
//!
//! # Protocol Overview
//!
//! All messages use a single delimited text frame:
//! ```text
//! ┌────┬───────────┬────┬────────────────┬────┬────┐
//! │ \r │ name      │ \t │ value          │ \t │ \n │
//! │ 1B │ ASCII     │ 1B │ ASCII decimal  │ 1B │ 1B │
//! └────┴───────────┴────┴────────────────┴────┴────┘
//! ```
//!
//! The carriage return doubles as the resynchronization point: a receiver
//! joining mid-stream, or recovering from line noise, discards bytes until
//! the next one. A whole frame never exceeds [`MAX_MSG_LEN`] bytes, so the
//! receive side runs on a single fixed buffer with no allocation.

#![no_std]
#![deny(unsafe_code)]

pub mod frame;
pub mod reading;

pub use frame::{
    FrameError, FrameScanner, RawFrame, FIELD_SEP, FRAME_END, FRAME_START, MAX_MSG_LEN,
    MAX_NAME_LEN,
};
pub use reading::{decode, decode_name, decode_value, matches, Decoded, Reading};
