//! Response header: status byte, then big-endian payload length.

use bitvec::prelude::*;

/// Bytes read by the header probe.
pub const STATUS_HEADER_SIZE: usize = 3;

/// Size of the CRC-16 integrity trailer.
pub const TRAILER_SIZE: u16 = 2;

const STATUS_CODE_BITS: usize = 6;

/// Sizes of the fixed parts of a response frame, shared with the command layer.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FrameLayout {
    pub header_size: u16,
    pub trailer_size: u16,
}

impl FrameLayout {
    pub const STSAFE_A: FrameLayout = FrameLayout {
        header_size: STATUS_HEADER_SIZE as u16,
        trailer_size: TRAILER_SIZE,
    };

    /// Total frame size announced by a header, never overflowing.
    pub fn frame_size(&self, header: &StatusHeader) -> usize {
        header.payload_length as usize + self.header_size as usize + self.trailer_size as usize
    }
}

impl Default for FrameLayout {
    fn default() -> Self {
        Self::STSAFE_A
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusHeader {
    pub status_byte: u8,
    pub payload_length: u16,
}

impl StatusHeader {
    pub fn decode(bytes: &[u8; STATUS_HEADER_SIZE]) -> Self {
        Self {
            status_byte: bytes[0],
            payload_length: u16::from_be_bytes([bytes[1], bytes[2]]),
        }
    }

    /// Status code, low 6 bits of the first byte.
    pub fn status_code(&self) -> u8 {
        self.status_byte.view_bits::<Lsb0>()[..STATUS_CODE_BITS].load::<u8>()
    }

    /// Header-type flags, high 2 bits of the first byte.
    pub fn header_flags(&self) -> u8 {
        self.status_byte.view_bits::<Lsb0>()[STATUS_CODE_BITS..].load::<u8>()
    }

    pub fn status(&self) -> ResponseStatus {
        ResponseStatus::from_code(self.status_code())
    }
}

/// Chip-reported outcome of a command, independent of whether the frame
/// itself was transferred correctly.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ResponseStatus {
    Ok,
    Error(u8),
}

impl ResponseStatus {
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => ResponseStatus::Ok,
            code => ResponseStatus::Error(code),
        }
    }

    pub fn code(&self) -> u8 {
        match self {
            ResponseStatus::Ok => 0,
            ResponseStatus::Error(code) => *code,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ResponseStatus::Ok)
    }
}

#[cfg(feature = "std")]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_header() {
        let header = StatusHeader::decode(&[0x02, 0x00, 0x05]);
        assert_eq!(header.payload_length, 5);
        assert_eq!(header.status_code(), 2);
        assert_eq!(header.header_flags(), 0);
        assert_eq!(header.status(), ResponseStatus::Error(2));
    }

    #[test]
    fn flags_are_masked_out_of_status() {
        let header = StatusHeader::decode(&[0xC1, 0x01, 0x00]);
        assert_eq!(header.payload_length, 256);
        assert_eq!(header.status_code(), 0x01);
        assert_eq!(header.header_flags(), 0b11);
    }

    #[test]
    fn status_ok() {
        let header = StatusHeader::decode(&[0x80, 0x00, 0x00]);
        assert!(header.status().is_ok());
        assert_eq!(header.status().code(), 0);
    }

    #[test]
    fn frame_size_with_custom_layout() {
        let layout = FrameLayout {
            header_size: 2,
            trailer_size: 2,
        };
        let header = StatusHeader::decode(&[0x02, 0x00, 0x05]);
        assert_eq!(layout.frame_size(&header), 9);
    }

    #[test]
    fn frame_size_does_not_wrap() {
        let header = StatusHeader::decode(&[0x00, 0xFF, 0xFF]);
        assert_eq!(FrameLayout::STSAFE_A.frame_size(&header), 0xFFFF + 5);
    }
}
