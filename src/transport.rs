//! Send and receive state machines over an I2C bus.
//!
//! Every bus operation blocks until the driver returns. Nothing is retried here.

use embedded_hal::i2c::{I2c, SevenBitAddress};

use crate::config::TransportConfig;
use crate::error::TransportError;
use crate::frame_buffer::{Chunk, FrameBuffer};
use crate::header::{FrameLayout, ResponseStatus, StatusHeader, STATUS_HEADER_SIZE};
use crate::integrity;

/// Frame transport bound to one secure element at one bus address.
///
/// `N` is the frame buffer capacity, see [`ChipVariant`](crate::config::ChipVariant).
/// Transactions are not reentrant.
pub struct Transport<I2C, const N: usize> {
    bus: I2C,
    address: SevenBitAddress,
    layout: FrameLayout,
    buffer: FrameBuffer<N>,
    /// Set by a probed receive until the first continuation moves past the
    /// probed header bytes.
    header_pending: bool,
    last_header: Option<StatusHeader>,
}

impl<I2C, const N: usize> Transport<I2C, N>
where
    I2C: I2c,
{
    pub fn new(bus: I2C, config: TransportConfig) -> Result<Self, TransportError> {
        config.validate()?;
        Ok(Self {
            bus,
            address: config.address,
            layout: config.layout,
            buffer: FrameBuffer::new(),
            header_pending: false,
            last_header: None,
        })
    }

    /// Gives the bus back to the caller.
    pub fn release(self) -> I2C {
        self.bus
    }

    pub fn address(&self) -> SevenBitAddress {
        self.address
    }

    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    pub fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    pub fn frame_size(&self) -> usize {
        self.buffer.frame_size()
    }

    /// Bytes of the frame currently held in the buffer.
    pub fn frame(&self) -> &[u8] {
        self.buffer.frame()
    }

    /// Header decoded by the most recent probed receive.
    pub fn last_header(&self) -> Option<StatusHeader> {
        self.last_header
    }

    pub fn send_start(&mut self, frame_length: usize) -> Result<(), TransportError> {
        self.header_pending = false;
        self.buffer.reset(frame_length)
    }

    pub fn send_continue(&mut self, chunk: Chunk<'_>) -> Result<(), TransportError> {
        log::trace!("append {} bytes at offset {}", chunk.len(), self.buffer.cursor());
        self.buffer.write_at_cursor(chunk)
    }

    /// Appends the last chunk and writes the whole frame to the bus.
    pub fn send_stop(&mut self, chunk: Chunk<'_>) -> Result<(), TransportError> {
        self.send_continue(chunk)?;
        if self.buffer.cursor() != self.buffer.frame_size() {
            log::warn!(
                "flushing frame of {} bytes with {} bytes appended",
                self.buffer.frame_size(),
                self.buffer.cursor()
            );
        }
        self.bus
            .write(self.address, self.buffer.frame())
            .map_err(|err| {
                let err = TransportError::ack(err);
                log::error!("frame write to {:#04x} failed: {}", self.address, err);
                err
            })?;
        log::debug!("sent {} bytes to {:#04x}", self.buffer.frame_size(), self.address);
        Ok(())
    }

    /// Reads a frame whose length the caller already knows.
    pub fn receive_start(&mut self, frame_length: usize) -> Result<(), TransportError> {
        self.header_pending = false;
        self.buffer.reset(frame_length)?;
        self.read_frame()
    }

    /// Reads a frame whose length is announced by the chip in the response
    /// header, and returns the status carried by that header.
    ///
    /// The header is probed first, then the full frame is read again from
    /// its first byte. Continuations deliver bytes following the header.
    pub fn receive_start_probed(&mut self) -> Result<ResponseStatus, TransportError> {
        self.header_pending = false;
        let mut probe = [0u8; STATUS_HEADER_SIZE];
        self.bus.read(self.address, &mut probe).map_err(|err| {
            let err = TransportError::ack(err);
            log::error!("header probe from {:#04x} failed: {}", self.address, err);
            err
        })?;
        let header = StatusHeader::decode(&probe);
        self.last_header = Some(header);

        let frame_size = self.layout.frame_size(&header);
        self.buffer.reset(frame_size)?;
        self.read_frame()?;
        self.header_pending = true;
        Ok(header.status())
    }

    pub fn receive_continue(&mut self, dest: &mut [u8]) -> Result<(), TransportError> {
        self.consume_header()?;
        self.buffer.read_at_cursor(dest)
    }

    /// Advances past `count` received bytes without copying them.
    pub fn receive_skip(&mut self, count: usize) -> Result<(), TransportError> {
        self.consume_header()?;
        self.buffer.skip(count)
    }

    /// Copies the last bytes out and leaves the cursor at 0 for reuse, also
    /// when the copy fails.
    pub fn receive_stop(&mut self, dest: &mut [u8]) -> Result<(), TransportError> {
        let result = self.receive_continue(dest);
        self.buffer.rewind();
        self.header_pending = false;
        result
    }

    /// Checks the CRC trailer of the frame currently held in the buffer.
    pub fn verify_received(&self) -> Result<(), TransportError> {
        integrity::verify(self.buffer.frame())
    }

    fn read_frame(&mut self) -> Result<(), TransportError> {
        let address = self.address;
        self.bus.read(address, self.buffer.frame_mut()).map_err(|err| {
            let err = TransportError::bus(err);
            log::error!("frame read from {:#04x} failed: {}", address, err);
            err
        })?;
        log::debug!("received {} bytes from {:#04x}", self.buffer.frame_size(), address);
        Ok(())
    }

    fn consume_header(&mut self) -> Result<(), TransportError> {
        if self.header_pending {
            self.buffer.seek(STATUS_HEADER_SIZE)?;
            self.header_pending = false;
        }
        Ok(())
    }
}
