//! Connection lifecycle.
//!
//! [`connect`] performs the blocking handshake with a secure service and
//! returns a [`Connection`] that exclusively owns the resulting handle. The
//! handle is released exactly once, when the `Connection` is dropped or
//! explicitly [closed](Connection::close), on every exit path of the caller.
//!
//! A failed connect yields no `Connection`, so neither a call nor a close can
//! be issued against a handle that was never obtained.

use crate::{
    call::Call,
    handle::Handle,
    raw::Transport,
    sid::{ServiceId, Version},
    status::Status,
};

/// Connects to the secure service `sid`, requesting contract `version`.
///
/// Blocks until the secure side accepts or rejects the connection.
pub fn connect<T: Transport + ?Sized>(
    transport: &T,
    sid: ServiceId,
    version: Version,
) -> Result<Connection<'_, T>, ConnectError> {
    let raw = transport.connect(sid, version);
    if raw < 0 {
        log::trace!("psa: connect to {sid} (v{version}) failed: {}", Status::from_raw(raw));
        return Err(ConnectError::from_status(Status::from_raw(raw)));
    }

    log::trace!("psa: connected to {sid} (v{version}), handle {raw}");

    // SAFETY: The transport returned a non-negative handle for a successful connect.
    let handle = unsafe { Handle::from_raw(raw) };
    Ok(Connection {
        transport,
        handle,
        sid,
    })
}

/// Error returned by [`connect`].
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
    /// The service is unknown, or refused the requested version or caller.
    #[error("connection refused")]
    Refused,
    /// The service cannot accept another connection right now.
    #[error("connection busy")]
    Busy,
    /// Unexpected transport error.
    #[error("connect failed: {0}")]
    Unknown(Status),
}

impl ConnectError {
    fn from_status(status: Status) -> Self {
        match status {
            Status::CONNECTION_REFUSED => Self::Refused,
            Status::CONNECTION_BUSY => Self::Busy,
            other => Self::Unknown(other),
        }
    }

    /// Returns the raw status code this error was produced from.
    pub fn status(&self) -> Status {
        match self {
            Self::Refused => Status::CONNECTION_REFUSED,
            Self::Busy => Status::CONNECTION_BUSY,
            Self::Unknown(status) => *status,
        }
    }
}

/// A live connection to one secure service.
///
/// Owns its handle exclusively and closes it on drop.
pub struct Connection<'t, T: Transport + ?Sized> {
    transport: &'t T,
    handle: Handle,
    sid: ServiceId,
}

impl<'t, T: Transport + ?Sized> Connection<'t, T> {
    /// Returns the underlying handle.
    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// Returns the service this connection is attached to.
    #[inline]
    pub fn service_id(&self) -> ServiceId {
        self.sid
    }

    /// Starts building a request on this connection.
    #[inline]
    pub fn request<'b>(&self) -> Call<'_, 'b, T> {
        Call::new(self.transport, self.handle)
    }

    /// Consumes and closes the connection.
    #[inline]
    pub fn close(self) {
        drop(self);
    }
}

impl<T: Transport + ?Sized> core::fmt::Debug for Connection<'_, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Connection")
            .field("handle", &self.handle)
            .field("sid", &self.sid)
            .finish_non_exhaustive()
    }
}

impl<T: Transport + ?Sized> Drop for Connection<'_, T> {
    fn drop(&mut self) {
        log::trace!("psa: closing handle {} ({})", self.handle.to_raw(), self.sid);
        self.transport.close(self.handle.to_raw());
    }
}
