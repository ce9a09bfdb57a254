//! Fixed-capacity frame storage with a transfer cursor.
//!
//! The cursor is atomic so that a context holding only `&FrameBuffer` (an
//! interrupt handler, another task) reads a consistent offset. Mutation still
//! requires `&mut`, one transaction at a time.

use core::sync::atomic::{AtomicU16, Ordering};

use crate::error::TransportError;

/// Source of bytes appended to an outgoing frame.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Chunk<'a> {
    Data(&'a [u8]),
    /// Reserve `n` zeroed bytes, typically filled in later by the chip or
    /// used as padding.
    Zeros(u16),
}

impl Chunk<'_> {
    pub fn len(&self) -> usize {
        match self {
            Chunk::Data(data) => data.len(),
            Chunk::Zeros(count) => *count as usize,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<&'a [u8]> for Chunk<'a> {
    fn from(data: &'a [u8]) -> Self {
        Chunk::Data(data)
    }
}

#[derive(Debug)]
pub struct FrameBuffer<const N: usize> {
    data: [u8; N],
    frame_size: u16,
    cursor: AtomicU16,
}

impl<const N: usize> FrameBuffer<N> {
    const CAPACITY_FITS_CURSOR: () = assert!(N <= u16::MAX as usize, "frame buffer capacity exceeds u16 cursor range");

    pub const fn new() -> Self {
        let () = Self::CAPACITY_FITS_CURSOR;
        Self {
            data: [0; N],
            frame_size: 0,
            cursor: AtomicU16::new(0),
        }
    }

    pub const fn capacity(&self) -> usize {
        N
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size as usize
    }

    pub fn cursor(&self) -> usize {
        self.cursor.load(Ordering::Acquire) as usize
    }

    /// Bytes left between the cursor and the end of the frame.
    pub fn remaining(&self) -> usize {
        self.frame_size().saturating_sub(self.cursor())
    }

    /// Starts a new frame of `size` bytes with the cursor at 0.
    pub fn reset(&mut self, size: usize) -> Result<(), TransportError> {
        let frame_size = u16::try_from(size)
            .ok()
            .filter(|_| size <= N)
            .ok_or_else(|| {
                log::error!("Frame length {} exceeds buffer size {}", size, N);
                TransportError::BufferCapacityExceeded {
                    requested: size,
                    available: N,
                }
            })?;
        self.frame_size = frame_size;
        self.set_cursor(0);
        Ok(())
    }

    /// Appends a chunk at the cursor. Only the buffer capacity is checked;
    /// keeping the total equal to the declared frame size is up to the caller.
    pub fn write_at_cursor(&mut self, chunk: Chunk<'_>) -> Result<(), TransportError> {
        let start = self.cursor();
        let available = N - start;
        if chunk.len() > available {
            log::error!("Chunk of {} bytes overflows frame buffer at offset {}", chunk.len(), start);
            return Err(TransportError::BufferCapacityExceeded {
                requested: chunk.len(),
                available,
            });
        }
        let end = start + chunk.len();
        match chunk {
            Chunk::Data(data) => self.data[start..end].copy_from_slice(data),
            Chunk::Zeros(_) => self.data[start..end].fill(0),
        }
        self.set_cursor(end);
        Ok(())
    }

    /// Copies `dest.len()` bytes out of the frame. Nothing is copied when
    /// the frame holds fewer bytes past the cursor.
    pub fn read_at_cursor(&mut self, dest: &mut [u8]) -> Result<(), TransportError> {
        let start = self.cursor();
        self.check_remaining(dest.len())?;
        let end = start + dest.len();
        dest.copy_from_slice(&self.data[start..end]);
        self.set_cursor(end);
        Ok(())
    }

    pub fn skip(&mut self, count: usize) -> Result<(), TransportError> {
        self.check_remaining(count)?;
        self.set_cursor(self.cursor() + count);
        Ok(())
    }

    /// Moves the cursor to `offset` within the frame.
    pub fn seek(&mut self, offset: usize) -> Result<(), TransportError> {
        if offset > self.frame_size() {
            return Err(TransportError::BufferCapacityExceeded {
                requested: offset,
                available: self.frame_size(),
            });
        }
        self.set_cursor(offset);
        Ok(())
    }

    pub fn rewind(&mut self) {
        self.set_cursor(0);
    }

    /// Current frame, `frame_size` bytes from offset 0.
    pub fn frame(&self) -> &[u8] {
        &self.data[..self.frame_size()]
    }

    pub(crate) fn frame_mut(&mut self) -> &mut [u8] {
        let frame_size = self.frame_size();
        &mut self.data[..frame_size]
    }

    fn check_remaining(&self, requested: usize) -> Result<(), TransportError> {
        let available = self.remaining();
        if requested > available {
            log::error!("Read of {} bytes exceeds {} bytes left in frame", requested, available);
            return Err(TransportError::BufferCapacityExceeded {
                requested,
                available,
            });
        }
        Ok(())
    }

    fn set_cursor(&self, offset: usize) {
        // offsets never exceed N, which fits u16
        self.cursor.store(offset as u16, Ordering::Release);
    }
}

impl<const N: usize> Default for FrameBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}
