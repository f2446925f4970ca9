//! UART driver service protocol constants and types.

use psa_client::{ServiceId, Version};

/// SID of the secure UART driver service.
pub const SERVICE_ID: ServiceId = ServiceId::new(0x0000_FC01);

/// Contract version requested on connect.
pub const VERSION: Version = Version::new(0);

/// Operation discriminator, sent as the first request vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum UartFn {
    /// Initialize the UART at a base address.
    Init = 0x1,
    /// Format and transmit a string.
    Print = 0x2,
}

impl UartFn {
    /// Returns the wire value of the discriminator.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self as u32
    }

    /// Converts a wire value back into a discriminator.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x1 => Some(Self::Init),
            0x2 => Some(Self::Print),
            _ => None,
        }
    }
}
