//! Board-agnostic endpoint logic for sensorwire telemetry links
//!
//! This crate contains the application-facing half of the link, independent
//! of any specific transport:
//!
//! - Polling endpoint that scans, decodes, and keeps the last reading
//! - Transmit path with its pacing throttle
//!
//! Construct one [`SensorEndpoint`] at the application's composition root
//! and hand it to whatever loop polls it; there is no ambient global
//! instance.

#![no_std]
#![deny(unsafe_code)]

pub mod endpoint;

pub use endpoint::{PollOutcome, SendError, SensorEndpoint, DEFAULT_PACING_DELAY_MS};
