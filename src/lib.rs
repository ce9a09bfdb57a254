//! I2C frame transport for STSAFE-A secure elements.
//!
//! Moves opaque command and response frames between the host and the chip
//! through a fixed-capacity frame buffer. Commands are accumulated and flushed
//! in one bus write; responses are read either with a known length or by
//! probing the response header for the length the chip reports.

#![no_std]

#[cfg(feature = "std")]
#[macro_use]
extern crate std;

pub mod config;
pub mod error;
pub mod frame_buffer;
pub mod header;
pub mod integrity;
pub mod reset;
pub mod transport;

#[cfg(feature = "std")]
#[cfg(test)]
mod mock;

pub use config::{A110Transport, A120Transport, ChipVariant, TransportConfig};
pub use error::{ResetError, TransportError};
pub use frame_buffer::{Chunk, FrameBuffer};
pub use header::{FrameLayout, ResponseStatus, StatusHeader};
pub use reset::ResetLine;
pub use transport::Transport;
