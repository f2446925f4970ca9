//! Call dispatch.
//!
//! A [`Call`] frames one synchronous request/response exchange on an open
//! [`Connection`](crate::Connection): an ordered list of request vectors
//! followed by an ordered list of response vectors, each up to
//! [`MAX_IOVEC`] long.
//!
//! By convention the first request vector carries the operation discriminator
//! (and, for services that bundle it, the fixed-size parameter structure), so
//! the service can select the sub-operation before reading the remaining
//! vectors. The dispatcher does not validate this; the service crates do.
//!
//! ```ignore
//! let conn = psa_client::connect(&transport, SID, VERSION)?;
//! conn.request()
//!     .input_value(&param)
//!     .output(&mut buf)
//!     .send()?;
//! ```

use zerocopy::{FromBytes, Immutable, IntoBytes};

use crate::{
    handle::Handle,
    iovec::{InVec, MAX_IOVEC, OutVec},
    raw::Transport,
    status::Status,
};

/// Builder for a single request/response exchange.
///
/// `'a` is the borrow of the connection, `'b` the borrow of the caller's
/// buffers. Response buffers are released to the caller once [`send`] returns.
///
/// [`send`]: Call::send
pub struct Call<'a, 'b, T: Transport + ?Sized> {
    transport: &'a T,
    handle: Handle,
    in_vecs: [InVec<'b>; MAX_IOVEC],
    in_count: usize,
    out_vecs: [OutVec<'b>; MAX_IOVEC],
    out_count: usize,
}

impl<'a, 'b, T: Transport + ?Sized> Call<'a, 'b, T> {
    pub(crate) fn new(transport: &'a T, handle: Handle) -> Self {
        Self {
            transport,
            handle,
            in_vecs: [InVec::EMPTY; MAX_IOVEC],
            in_count: 0,
            out_vecs: [const { OutVec::EMPTY }; MAX_IOVEC],
            out_count: 0,
        }
    }

    /// Appends a request vector.
    #[inline]
    pub fn input(mut self, buf: &'b [u8]) -> Self {
        if self.in_count < MAX_IOVEC {
            self.in_vecs[self.in_count] = InVec::new(buf);
        }
        self.in_count += 1;
        self
    }

    /// Appends a request vector holding the in-memory bytes of `value`.
    #[inline]
    pub fn input_value<V>(self, value: &'b V) -> Self
    where
        V: IntoBytes + Immutable + ?Sized,
    {
        self.input(value.as_bytes())
    }

    /// Appends a response vector with capacity `buf.len()`.
    #[inline]
    pub fn output(mut self, buf: &'b mut [u8]) -> Self {
        if self.out_count < MAX_IOVEC {
            self.out_vecs[self.out_count] = OutVec::new(buf);
        }
        self.out_count += 1;
        self
    }

    /// Appends a response vector that the service fills with a `V`.
    #[inline]
    pub fn output_value<V>(self, value: &'b mut V) -> Self
    where
        V: IntoBytes + FromBytes + ?Sized,
    {
        self.output(value.as_mut_bytes())
    }

    /// Sends the request and blocks until the service has answered.
    ///
    /// On success every response buffer is populated. On failure the response
    /// buffers hold unspecified content and must not be consumed.
    pub fn send(mut self) -> Result<(), CallError> {
        if self.in_count > MAX_IOVEC || self.out_count > MAX_IOVEC {
            return Err(CallError::TooManyVectors {
                inputs: self.in_count,
                outputs: self.out_count,
            });
        }

        log::debug!(
            "psa: call on handle {} ({} in, {} out)",
            self.handle.to_raw(),
            self.in_count,
            self.out_count
        );

        let rc = self.transport.call(
            self.handle.to_raw(),
            &self.in_vecs[..self.in_count],
            &mut self.out_vecs[..self.out_count],
        );

        Status::from_raw(rc).map_err(CallError::Status)
    }
}

/// Error returned by [`Call::send`].
#[derive(Debug, thiserror::Error)]
pub enum CallError {
    /// More vectors than a single call can carry; nothing was sent.
    #[error("too many vectors: {inputs} in, {outputs} out (max {max} each)", max = MAX_IOVEC)]
    TooManyVectors {
        /// Number of request vectors supplied.
        inputs: usize,
        /// Number of response vectors supplied.
        outputs: usize,
    },
    /// The exchange did not complete successfully.
    #[error("call failed: {0}")]
    Status(Status),
}
