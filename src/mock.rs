//! Test doubles for the bus, the reset pin and the delay provider.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{self, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, I2c, Operation, SevenBitAddress};

#[derive(Debug, Default)]
pub struct MockBus {
    pub writes: Vec<(SevenBitAddress, Vec<u8>)>,
    /// Address and length of every read issued.
    pub reads: Vec<(SevenBitAddress, usize)>,
    responses: VecDeque<Result<Vec<u8>, ErrorKind>>,
    write_failure: Option<ErrorKind>,
    loopback: bool,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads return the bytes of the last write.
    pub fn loopback() -> Self {
        Self {
            loopback: true,
            ..Self::default()
        }
    }

    pub fn respond(&mut self, bytes: &[u8]) -> &mut Self {
        self.responses.push_back(Ok(bytes.to_vec()));
        self
    }

    /// Scripts a header probe followed by the full re-read of `frame`.
    pub fn respond_probed(&mut self, frame: &[u8]) -> &mut Self {
        self.respond(&frame[..3]).respond(frame)
    }

    pub fn fail_read(&mut self, kind: ErrorKind) -> &mut Self {
        self.responses.push_back(Err(kind));
        self
    }

    pub fn fail_next_write(&mut self, kind: ErrorKind) -> &mut Self {
        self.write_failure = Some(kind);
        self
    }

    fn on_write(&mut self, address: SevenBitAddress, bytes: &[u8]) -> Result<(), ErrorKind> {
        if let Some(kind) = self.write_failure.take() {
            return Err(kind);
        }
        self.writes.push((address, bytes.to_vec()));
        Ok(())
    }

    fn on_read(&mut self, address: SevenBitAddress, buffer: &mut [u8]) -> Result<(), ErrorKind> {
        self.reads.push((address, buffer.len()));
        let source = if self.loopback {
            self.writes.last().map(|(_, bytes)| bytes.clone()).unwrap_or_default()
        } else {
            self.responses
                .pop_front()
                .unwrap_or(Err(ErrorKind::NoAcknowledge(i2c::NoAcknowledgeSource::Address)))?
        };
        buffer.fill(0);
        let len = source.len().min(buffer.len());
        buffer[..len].copy_from_slice(&source[..len]);
        Ok(())
    }
}

impl i2c::ErrorType for MockBus {
    type Error = ErrorKind;
}

impl I2c for MockBus {
    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for operation in operations {
            match operation {
                Operation::Write(bytes) => self.on_write(address, bytes)?,
                Operation::Read(buffer) => self.on_read(address, buffer)?,
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineEvent {
    High,
    Low,
    DelayMs(u32),
    DelayNs(u32),
}

pub type EventLog = Rc<RefCell<Vec<LineEvent>>>;

pub struct MockPin {
    events: EventLog,
    fail: bool,
}

impl MockPin {
    pub fn new(events: EventLog) -> Self {
        Self { events, fail: false }
    }

    pub fn failing(events: EventLog) -> Self {
        Self { events, fail: true }
    }

    fn record(&mut self, event: LineEvent) -> Result<(), digital::ErrorKind> {
        if self.fail {
            return Err(digital::ErrorKind::Other);
        }
        self.events.borrow_mut().push(event);
        Ok(())
    }
}

impl digital::ErrorType for MockPin {
    type Error = digital::ErrorKind;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.record(LineEvent::Low)
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.record(LineEvent::High)
    }
}

pub struct MockDelay {
    events: EventLog,
}

impl MockDelay {
    pub fn new(events: EventLog) -> Self {
        Self { events }
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.events.borrow_mut().push(LineEvent::DelayNs(ns));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.events.borrow_mut().push(LineEvent::DelayMs(ms));
    }
}
