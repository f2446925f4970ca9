//! Call status codes.
//!
//! The secure side reports the outcome of connect and call as a signed 32-bit
//! `psa_status_t`. Zero is success; every other value is a failure whose
//! meaning belongs to the service or transport. This layer does not interpret
//! failure codes beyond the few defined by the client protocol: it
//! carries them upward unchanged so a caller can log them, and collapses them
//! into a plain failure everywhere else.

use crate::raw::{
    PSA_ERROR_CONNECTION_BUSY, PSA_ERROR_CONNECTION_REFUSED, PSA_ERROR_PROGRAMMER_ERROR,
    PSA_SUCCESS, RawStatus,
};

/// A PSA status code.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct Status(RawStatus);

impl Status {
    /// The operation succeeded.
    pub const SUCCESS: Self = Self(PSA_SUCCESS);
    /// The client API was misused, e.g. a call on a handle that is not open.
    pub const PROGRAMMER_ERROR: Self = Self(PSA_ERROR_PROGRAMMER_ERROR);
    /// The service refused the connection.
    pub const CONNECTION_REFUSED: Self = Self(PSA_ERROR_CONNECTION_REFUSED);
    /// The service is busy and cannot accept a connection.
    pub const CONNECTION_BUSY: Self = Self(PSA_ERROR_CONNECTION_BUSY);

    /// Creates a [`Status`] from a raw value.
    #[inline]
    pub const fn from_raw(raw: RawStatus) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn to_raw(self) -> RawStatus {
        self.0
    }

    /// Returns `true` if this status represents success.
    #[inline]
    pub const fn is_success(self) -> bool {
        self.0 == PSA_SUCCESS
    }

    /// Converts the status into a [`Result`], mapping failures with `err`.
    #[inline]
    pub fn map_err<E>(self, err: impl FnOnce(Status) -> E) -> Result<(), E> {
        if self.is_success() {
            Ok(())
        } else {
            Err(err(self))
        }
    }
}

impl core::fmt::Display for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match *self {
            Self::SUCCESS => f.write_str("PSA_SUCCESS"),
            Self::PROGRAMMER_ERROR => f.write_str("PSA_ERROR_PROGRAMMER_ERROR"),
            Self::CONNECTION_REFUSED => f.write_str("PSA_ERROR_CONNECTION_REFUSED"),
            Self::CONNECTION_BUSY => f.write_str("PSA_ERROR_CONNECTION_BUSY"),
            Self(raw) => write!(f, "psa status {raw}"),
        }
    }
}

impl core::fmt::Debug for Status {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Status")
            .field("code", &format_args!("{}", self))
            .field("raw", &self.0)
            .finish()
    }
}

impl From<RawStatus> for Status {
    fn from(value: RawStatus) -> Self {
        Self(value)
    }
}
