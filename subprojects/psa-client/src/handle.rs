//! Connection handle type.

use crate::raw::{INVALID_HANDLE, RawHandle};

/// A handle to one live logical connection with a secure service.
///
/// A `Handle` is only meaningful between a successful connect and its matching
/// close. Ownership of the underlying connection is expressed by
/// [`Connection`](crate::Connection); this type is the bare token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Handle(RawHandle);

impl Handle {
    /// Handle value that denotes "no connection established".
    pub const INVALID: Self = Self(INVALID_HANDLE);

    /// Converts a raw handle to a [`Handle`].
    ///
    /// # Safety
    ///
    /// Caller must guarantee that the raw handle was returned by a successful
    /// connect and has not been closed.
    #[inline]
    pub unsafe fn from_raw(raw: RawHandle) -> Self {
        Self(raw)
    }

    /// Returns `true` if the handle is valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.0 >= 0
    }

    /// Converts the [`Handle`] to a raw handle.
    #[inline]
    pub fn to_raw(&self) -> RawHandle {
        self.0
    }
}

impl Default for Handle {
    fn default() -> Self {
        Self::INVALID
    }
}

impl PartialEq<RawHandle> for Handle {
    fn eq(&self, other: &RawHandle) -> bool {
        &self.0 == other
    }
}

impl PartialEq<Handle> for RawHandle {
    fn eq(&self, other: &Handle) -> bool {
        self == &other.0
    }
}
