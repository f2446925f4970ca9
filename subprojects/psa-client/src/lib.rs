//! PSA client IPC for the non-secure side.
//!
//! This crate implements the client half of the synchronous IPC protocol used
//! to reach secure-side services across the trusted-execution boundary. Every
//! exchange follows the same shape:
//!
//! ```text
//! connect(sid, version) ──► call(handle, in_vecs, out_vecs) ──► close(handle)
//! ```
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────┐
//! │  Driver services (uart, ..) │  Operation marshalling
//! ├─────────────────────────────┤
//! │  Connection / Call          │  Handle lifetime & vector framing (this crate)
//! ├─────────────────────────────┤
//! │  Transport                  │  psa_connect / psa_call / psa_close
//! └─────────────────────────────┘
//! ```
//!
//! - [`raw`]: The [`Transport`] trait, i.e. the three primitives below this layer,
//!   expressed in raw PSA values.
//! - [`connection`]: Typed connect and the [`Connection`] guard that releases the
//!   handle on every exit path.
//! - [`call`]: The [`Call`] builder that frames request/response vectors and
//!   performs one blocking round trip.
//! - [`iovec`]: Scatter-gather vector descriptors, layout-compatible with
//!   `psa_invec`/`psa_outvec`.

#![no_std]

pub mod call;
pub mod connection;
pub mod handle;
pub mod iovec;
pub mod raw;
mod sid;
pub mod status;

#[cfg(feature = "psa-api")]
pub mod psa_api;

pub use self::{
    call::{Call, CallError},
    connection::{ConnectError, Connection, connect},
    handle::Handle,
    iovec::{InVec, MAX_IOVEC, OutVec},
    raw::Transport,
    sid::{ServiceId, Version},
    status::Status,
};
