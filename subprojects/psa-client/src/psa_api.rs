//! Transport backed by the platform PSA client API.
//!
//! The non-secure runtime (TF-M NS interface, Mbed OS SPM client, ...) links
//! the three client functions; this module only declares them and adapts them
//! to [`Transport`].
//!
//! ```c
//! psa_handle_t psa_connect(uint32_t sid, uint32_t minor_version);
//! psa_status_t psa_call(psa_handle_t handle,
//!                       const psa_invec *in_vec, size_t in_len,
//!                       psa_outvec *out_vec, size_t out_len);
//! void psa_close(psa_handle_t handle);
//! ```

use crate::{
    iovec::{InVec, OutVec},
    raw::{RawHandle, RawStatus, Transport},
    sid::{ServiceId, Version},
};

unsafe extern "C" {
    fn psa_connect(sid: u32, minor_version: u32) -> RawHandle;
    fn psa_call(
        handle: RawHandle,
        in_vec: *const InVec<'_>,
        in_len: usize,
        out_vec: *mut OutVec<'_>,
        out_len: usize,
    ) -> RawStatus;
    fn psa_close(handle: RawHandle);
}

/// The platform PSA client API.
#[derive(Debug, Clone, Copy, Default)]
pub struct PsaApi;

impl Transport for PsaApi {
    #[inline]
    fn connect(&self, sid: ServiceId, version: Version) -> RawHandle {
        // SAFETY: psa_connect takes plain integers and blocks until the SPM answers.
        unsafe { psa_connect(sid.to_raw(), version.to_raw()) }
    }

    #[inline]
    fn call(
        &self,
        handle: RawHandle,
        in_vec: &[InVec<'_>],
        out_vec: &mut [OutVec<'_>],
    ) -> RawStatus {
        // SAFETY: InVec/OutVec are layout-compatible with psa_invec/psa_outvec and
        // each describes a buffer borrowed for the duration of this call.
        unsafe {
            psa_call(
                handle,
                in_vec.as_ptr(),
                in_vec.len(),
                out_vec.as_mut_ptr(),
                out_vec.len(),
            )
        }
    }

    #[inline]
    fn close(&self, handle: RawHandle) {
        // SAFETY: Connection only closes handles obtained from psa_connect, once.
        unsafe { psa_close(handle) }
    }
}
