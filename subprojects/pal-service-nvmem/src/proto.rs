//! NVMEM driver service protocol constants and types.

use psa_client::{ServiceId, Version};
use static_assertions::const_assert_eq;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// SID of the secure NVMEM driver service.
pub const SERVICE_ID: ServiceId = ServiceId::new(0x0000_FC03);

/// Contract version requested on connect.
pub const VERSION: Version = Version::new(0);

/// Operation discriminator, the first field of [`NvmemParam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum NvmemFn {
    /// Copy memory into the response vector.
    Read = 0x1,
    /// Copy the second request vector into memory.
    Write = 0x2,
}

impl NvmemFn {
    /// Converts a wire value back into a discriminator.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x1 => Some(Self::Read),
            0x2 => Some(Self::Write),
            _ => None,
        }
    }
}

/// Wire layout of an NVMEM request (`nvmem_param_t`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct NvmemParam {
    pub nvmem_fn_type: u32,
    pub base: u32,
    pub offset: u32,
    /// Transfer length in bytes. Signed on the wire.
    pub size: i32,
}
const_assert_eq!(size_of::<NvmemParam>(), 16);

/// An NVMEM transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NvmemRequest {
    /// Read `size` bytes at `base + offset` into the response vector.
    Read { base: u32, offset: u32, size: i32 },
    /// Write `size` bytes from the second request vector to `base + offset`.
    Write { base: u32, offset: u32, size: i32 },
}

impl NvmemRequest {
    /// Returns the operation discriminator.
    pub fn function(&self) -> NvmemFn {
        match self {
            Self::Read { .. } => NvmemFn::Read,
            Self::Write { .. } => NvmemFn::Write,
        }
    }

    /// Lowers the request to its wire layout.
    pub fn to_param(&self) -> NvmemParam {
        let (Self::Read { base, offset, size } | Self::Write { base, offset, size }) = *self;
        NvmemParam {
            nvmem_fn_type: self.function() as u32,
            base,
            offset,
            size,
        }
    }
}
