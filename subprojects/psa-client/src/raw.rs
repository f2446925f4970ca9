//! Raw transport primitives.
//!
//! The [`Transport`] trait is the seam between this crate and whatever actually
//! carries messages across the security boundary: the platform's PSA client
//! library on target, or an in-memory fake in tests. It speaks raw PSA values
//! (`psa_handle_t`, `psa_status_t`); the typed layer lives in
//! [`connection`](crate::connection) and [`call`](crate::call).

use crate::{
    iovec::{InVec, OutVec},
    sid::{ServiceId, Version},
};

/// Raw connection handle (`psa_handle_t`).
///
/// Non-negative values are live connections, negative values are errors.
pub type RawHandle = i32;

/// Raw call status (`psa_status_t`).
pub type RawStatus = i32;

/// Sentinel for "no connection established".
pub const INVALID_HANDLE: RawHandle = -1;

/// The call completed successfully.
pub const PSA_SUCCESS: RawStatus = 0;

/// The caller violated the client API contract, e.g. used a handle that is not
/// open.
pub const PSA_ERROR_PROGRAMMER_ERROR: RawStatus = -129;

/// The service refused the connection (unknown SID, version or policy mismatch).
pub const PSA_ERROR_CONNECTION_REFUSED: RawStatus = -130;

/// The service cannot accept a connection right now.
pub const PSA_ERROR_CONNECTION_BUSY: RawStatus = -131;

/// Transport below the client IPC layer.
///
/// Implementations must provide the blocking semantics of the PSA client API:
/// `connect` and `call` return only once the secure side has answered, `close`
/// is a best-effort release that does not block.
pub trait Transport {
    /// Opens a connection to `sid`. Returns a non-negative handle, or a negative
    /// status on failure.
    fn connect(&self, sid: ServiceId, version: Version) -> RawHandle;

    /// Performs one request/response exchange on `handle`.
    ///
    /// On success every buffer in `out_vec` has been populated by the service.
    fn call(
        &self,
        handle: RawHandle,
        in_vec: &[InVec<'_>],
        out_vec: &mut [OutVec<'_>],
    ) -> RawStatus;

    /// Releases `handle`. Must be called exactly once per successful connect.
    fn close(&self, handle: RawHandle);
}

impl<T: Transport + ?Sized> Transport for &T {
    #[inline]
    fn connect(&self, sid: ServiceId, version: Version) -> RawHandle {
        (**self).connect(sid, version)
    }

    #[inline]
    fn call(
        &self,
        handle: RawHandle,
        in_vec: &[InVec<'_>],
        out_vec: &mut [OutVec<'_>],
    ) -> RawStatus {
        (**self).call(handle, in_vec, out_vec)
    }

    #[inline]
    fn close(&self, handle: RawHandle) {
        (**self).close(handle)
    }
}
