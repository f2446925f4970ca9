//! Watchdog driver service operations.

use psa_client::{CallError, ConnectError, ServiceId, Transport, Version};

use crate::proto::WatchdogRequest;

/// Sends one watchdog request.
///
/// Request vectors: `[wd_param]`. No response vectors.
pub fn send<T: Transport + ?Sized>(
    transport: &T,
    sid: ServiceId,
    version: Version,
    request: WatchdogRequest,
) -> Result<(), RequestError> {
    let param = request.to_param();
    log::trace!("watchdog: {:?}", request);

    let conn = psa_client::connect(transport, sid, version).map_err(RequestError::Connect)?;
    conn.request()
        .input_value(&param)
        .send()
        .map_err(RequestError::Call)
}

/// Error returned by watchdog operations.
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    /// Failed to connect to the watchdog service.
    #[error("failed to connect")]
    Connect(#[source] ConnectError),
    /// The watchdog service rejected the request.
    #[error("failed to call")]
    Call(#[source] CallError),
}
