//! Chip variants and transport configuration.
//!
//! The frame buffer capacity is fixed per STSAFE-A variant and selected
//! through the const generic of [`Transport`](crate::transport::Transport);
//! the aliases below pick it from the variant.

use embedded_hal::i2c::SevenBitAddress;

use crate::error::TransportError;
use crate::header::FrameLayout;
use crate::transport::Transport;

/// Default I2C address of STSAFE-A devices.
pub const DEFAULT_ADDRESS: SevenBitAddress = 0x20;

const SEVEN_BIT_ADDRESS_MAX: SevenBitAddress = 0x7F;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ChipVariant {
    StsafeA110,
    StsafeA120,
}

impl ChipVariant {
    /// Largest frame, in bytes, the variant exchanges in one transaction.
    pub const fn frame_capacity(self) -> usize {
        match self {
            ChipVariant::StsafeA110 => 507,
            ChipVariant::StsafeA120 => 752,
        }
    }
}

pub const A110_FRAME_CAPACITY: usize = ChipVariant::StsafeA110.frame_capacity();
pub const A120_FRAME_CAPACITY: usize = ChipVariant::StsafeA120.frame_capacity();

pub type A110Transport<I2C> = Transport<I2C, A110_FRAME_CAPACITY>;
pub type A120Transport<I2C> = Transport<I2C, A120_FRAME_CAPACITY>;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct TransportConfig {
    pub address: SevenBitAddress,
    pub layout: FrameLayout,
}

impl TransportConfig {
    pub fn new(address: SevenBitAddress) -> Self {
        Self {
            address,
            layout: FrameLayout::STSAFE_A,
        }
    }

    pub fn with_layout(self, layout: FrameLayout) -> Self {
        Self { layout, ..self }
    }

    pub fn validate(&self) -> Result<(), TransportError> {
        if self.address > SEVEN_BIT_ADDRESS_MAX {
            log::error!("I2C address {:#04x} is not a 7-bit address", self.address);
            return Err(TransportError::InvalidParameter);
        }
        Ok(())
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ADDRESS)
    }
}
