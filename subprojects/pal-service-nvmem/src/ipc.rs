//! NVMEM driver service operations.

use psa_client::{CallError, ConnectError, ServiceId, Transport, Version};

use crate::proto::NvmemRequest;

/// Reads `buf.len()` bytes at `base + offset` into `buf`.
///
/// Request vectors: `[nvmem_param]`. Response vectors: `[buf]`.
pub fn read<T: Transport + ?Sized>(
    transport: &T,
    sid: ServiceId,
    version: Version,
    base: u32,
    offset: u32,
    buf: &mut [u8],
) -> Result<(), ReadError> {
    let size = i32::try_from(buf.len()).map_err(|_| ReadError::TooLarge { len: buf.len() })?;
    let param = NvmemRequest::Read { base, offset, size }.to_param();
    log::trace!("nvmem: read {size} bytes at {base:#x}+{offset:#x}");

    let conn = psa_client::connect(transport, sid, version).map_err(ReadError::Connect)?;
    conn.request()
        .input_value(&param)
        .output(buf)
        .send()
        .map_err(ReadError::Call)
}

/// Writes `buf` to `base + offset`.
///
/// Request vectors: `[nvmem_param] [buf]`. No response vectors.
pub fn write<T: Transport + ?Sized>(
    transport: &T,
    sid: ServiceId,
    version: Version,
    base: u32,
    offset: u32,
    buf: &[u8],
) -> Result<(), WriteError> {
    let size = i32::try_from(buf.len()).map_err(|_| WriteError::TooLarge { len: buf.len() })?;
    let param = NvmemRequest::Write { base, offset, size }.to_param();
    log::trace!("nvmem: write {size} bytes at {base:#x}+{offset:#x}");

    let conn = psa_client::connect(transport, sid, version).map_err(WriteError::Connect)?;
    conn.request()
        .input_value(&param)
        .input(buf)
        .send()
        .map_err(WriteError::Call)
}

/// Error returned by [`read`].
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The buffer length does not fit the signed 32-bit size field.
    #[error("buffer of {len} bytes is too large")]
    TooLarge { len: usize },
    /// Failed to connect to the NVMEM service.
    #[error("failed to connect")]
    Connect(#[source] ConnectError),
    /// The NVMEM service rejected the request.
    #[error("failed to call")]
    Call(#[source] CallError),
}

/// Error returned by [`write`].
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The buffer length does not fit the signed 32-bit size field.
    #[error("buffer of {len} bytes is too large")]
    TooLarge { len: usize },
    /// Failed to connect to the NVMEM service.
    #[error("failed to connect")]
    Connect(#[source] ConnectError),
    /// The NVMEM service rejected the request.
    #[error("failed to call")]
    Call(#[source] CallError),
}
