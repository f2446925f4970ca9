//! Service identifiers and contract versions.
//!
//! A service identifier (SID) names one secure-side service. SIDs are assigned
//! by the platform's service registry at build time and are never created or
//! destroyed at runtime, so both types here are plain `Copy` wrappers around
//! the 32-bit value the transport expects.

use static_assertions::const_assert_eq;

/// Secure service identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ServiceId(u32);

const_assert_eq!(size_of::<ServiceId>(), size_of::<u32>());

impl ServiceId {
    /// Creates a service identifier from its raw value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw SID value.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Minor version of a service's published contract, sent on connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Version(u32);

impl Version {
    /// Creates a version from its raw value.
    #[inline]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw version value.
    #[inline]
    pub const fn to_raw(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for Version {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.0.fmt(f)
    }
}
