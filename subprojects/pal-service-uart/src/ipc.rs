//! UART driver service operations.
//!
//! Each operation opens its own connection, performs a single call and closes
//! the connection again, whatever the outcome of the call.

use core::ffi::CStr;

use psa_client::{CallError, ConnectError, ServiceId, Transport, Version};

use crate::proto::UartFn;

/// Initializes the secure UART at `base_addr`.
///
/// Request vectors: `[UART_INIT] [base_addr]`.
pub fn init<T: Transport + ?Sized>(
    transport: &T,
    sid: ServiceId,
    version: Version,
    base_addr: u32,
) -> Result<(), InitError> {
    let tag = UartFn::Init.to_raw();
    log::trace!("uart: init at {base_addr:#x}");

    let conn = psa_client::connect(transport, sid, version).map_err(InitError::Connect)?;
    conn.request()
        .input_value(&tag)
        .input_value(&base_addr)
        .send()
        .map_err(InitError::Call)
}

/// Sends `msg` to the secure UART for printing.
///
/// The service performs the formatting; `data` is the value substituted for
/// the format specifier in `msg`, if any. The terminating NUL is part of the
/// request.
///
/// Request vectors: `[UART_PRINT] [msg + NUL] [data]`.
pub fn print<T: Transport + ?Sized>(
    transport: &T,
    sid: ServiceId,
    version: Version,
    msg: &CStr,
    data: u32,
) -> Result<(), PrintError> {
    let tag = UartFn::Print.to_raw();
    log::trace!("uart: print {} bytes", msg.count_bytes());

    let conn = psa_client::connect(transport, sid, version).map_err(PrintError::Connect)?;
    conn.request()
        .input_value(&tag)
        .input(msg.to_bytes_with_nul())
        .input_value(&data)
        .send()
        .map_err(PrintError::Call)
}

/// Error returned by [`init`].
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Failed to connect to the UART service.
    #[error("failed to connect")]
    Connect(#[source] ConnectError),
    /// The UART service rejected the request.
    #[error("failed to call")]
    Call(#[source] CallError),
}

/// Error returned by [`print`].
#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    /// Failed to connect to the UART service.
    #[error("failed to connect")]
    Connect(#[source] ConnectError),
    /// The UART service rejected the request.
    #[error("failed to call")]
    Call(#[source] CallError),
}
