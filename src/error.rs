use embedded_hal::{digital, i2c};
use thiserror::Error;

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum TransportError {
    #[error("bus error: {0}")]
    Bus(i2c::ErrorKind),
    #[error("bus acknowledgement error: {0}")]
    BusAcknowledgement(i2c::ErrorKind),
    #[error("{requested} bytes requested, only {available} available in frame buffer")]
    BufferCapacityExceeded { requested: usize, available: usize },
    #[error("frame integrity mismatch: expected {expected:#06x}, found {found:#06x}")]
    IntegrityMismatch { expected: u16, found: u16 },
    #[error("invalid parameter")]
    InvalidParameter,
}

impl TransportError {
    pub(crate) fn ack<E: i2c::Error>(err: E) -> Self {
        Self::BusAcknowledgement(err.kind())
    }

    pub(crate) fn bus<E: i2c::Error>(err: E) -> Self {
        Self::Bus(err.kind())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("reset line error: {0:?}")]
pub struct ResetError(pub digital::ErrorKind);
