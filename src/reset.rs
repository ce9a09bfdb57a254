//! Power and reset control through the secure element's reset pin.
//!
//! The pin is active low: driving it low holds the chip in reset.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{Error as _, OutputPin};

use crate::error::ResetError;

/// Time the reset pin is held low during a reset pulse.
pub const RESET_PULSE_MS: u32 = 1;
/// Boot time after releasing reset before the chip answers on the bus.
pub const BOOT_DELAY_MS: u32 = 50;

pub struct ResetLine<P, D> {
    pin: P,
    delay: D,
}

impl<P, D> ResetLine<P, D>
where
    P: OutputPin,
    D: DelayNs,
{
    pub fn new(pin: P, delay: D) -> Self {
        Self { pin, delay }
    }

    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }

    pub fn power_on(&mut self) -> Result<(), ResetError> {
        self.pin.set_high().map_err(|err| ResetError(err.kind()))
    }

    pub fn power_off(&mut self) -> Result<(), ResetError> {
        self.pin.set_low().map_err(|err| ResetError(err.kind()))
    }

    /// Cycles the chip through reset and waits until it has booted.
    pub fn reset_pulse(&mut self) -> Result<(), ResetError> {
        self.power_off()?;
        self.delay.delay_ms(RESET_PULSE_MS);
        self.power_on()?;
        self.delay.delay_ms(BOOT_DELAY_MS);
        log::debug!("secure element reset");
        Ok(())
    }

    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms)
    }
}
