//! Binary PAL outcome.

use crate::error::PalError;

/// Outcome reported to PAL callers.
///
/// Every failure, whatever its cause, collapses to [`PalStatus::Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PalStatus {
    /// The operation completed.
    Success = 0x0,
    /// The operation failed, for any reason.
    Error = 0x80,
}

impl PalStatus {
    /// Returns the integer handed to C callers.
    #[inline]
    pub const fn to_raw(self) -> i32 {
        self as i32
    }

    /// Returns `true` for [`PalStatus::Success`].
    #[inline]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<Result<(), PalError>> for PalStatus {
    fn from(result: Result<(), PalError>) -> Self {
        match result {
            Ok(()) => Self::Success,
            Err(err) => err.status(),
        }
    }
}
