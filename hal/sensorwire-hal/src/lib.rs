//! Hardware abstraction for sensorwire endpoints
//!
//! Provides the serial link trait the endpoint logic is written against,
//! plus an in-memory loopback implementation for host testing and
//! single-process setups. Board crates implement [`SerialLink`] over their
//! own UART; which transport a board uses (hardware serial, bit-banged
//! pins) never leaks into the core.

#![no_std]
#![deny(unsafe_code)]

pub mod loopback;
pub mod serial;

pub use loopback::{LoopbackError, LoopbackLink};
pub use serial::SerialLink;
