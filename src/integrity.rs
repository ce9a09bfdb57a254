//! CRC-16 trailer closing STSAFE-A frames.
//!
//! CRC-16/X-25 over every byte preceding the trailer, sent most significant
//! byte first.

use crc::{Crc, CRC_16_IBM_SDLC};

use crate::error::TransportError;
use crate::header::TRAILER_SIZE;

pub const FRAME_CRC: Crc<u16> = Crc::<u16>::new(&CRC_16_IBM_SDLC);

pub fn checksum(bytes: &[u8]) -> u16 {
    FRAME_CRC.checksum(bytes)
}

pub fn trailer(bytes: &[u8]) -> [u8; TRAILER_SIZE as usize] {
    checksum(bytes).to_be_bytes()
}

/// Writes the trailer of `frame[..len]` right after it and returns the
/// length of the completed frame.
pub fn append_trailer(frame: &mut [u8], len: usize) -> Result<usize, TransportError> {
    let end = len + TRAILER_SIZE as usize;
    if end > frame.len() {
        return Err(TransportError::BufferCapacityExceeded {
            requested: end,
            available: frame.len(),
        });
    }
    let trailer = trailer(&frame[..len]);
    frame[len..end].copy_from_slice(&trailer);
    Ok(end)
}

/// Checks a frame whose last two bytes are its trailer.
pub fn verify(frame: &[u8]) -> Result<(), TransportError> {
    let split = frame
        .len()
        .checked_sub(TRAILER_SIZE as usize)
        .ok_or(TransportError::BufferCapacityExceeded {
            requested: TRAILER_SIZE as usize,
            available: frame.len(),
        })?;
    let (body, received) = frame.split_at(split);
    let expected = checksum(body);
    let found = u16::from_be_bytes([received[0], received[1]]);
    if expected != found {
        log::error!("frame CRC mismatch: expected {:#06x}, found {:#06x}", expected, found);
        return Err(TransportError::IntegrityMismatch { expected, found });
    }
    Ok(())
}
