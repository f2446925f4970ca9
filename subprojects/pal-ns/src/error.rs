//! PAL error kinds.

use pal_service_nvmem::{ReadError, WriteError};
use pal_service_uart::{InitError, PrintError};
use pal_service_watchdog::RequestError;
use psa_client::{CallError, ConnectError};

use crate::status::PalStatus;

/// Why a PAL operation failed.
#[derive(Debug, thiserror::Error)]
pub enum PalError {
    /// No connection to the driver service could be opened.
    #[error("failed to connect to the driver service")]
    Connect(#[source] ConnectError),
    /// The driver service rejected the request.
    #[error("driver service call failed")]
    Call(#[source] CallError),
    /// An argument was rejected before any exchange.
    #[error("invalid argument")]
    InvalidArgument,
    /// The operation has no secure-side implementation.
    #[error("operation not supported")]
    Unsupported,
}

impl PalError {
    /// Collapses the error to the PAL status reported to callers.
    #[inline]
    pub const fn status(&self) -> PalStatus {
        PalStatus::Error
    }
}

impl From<InitError> for PalError {
    fn from(err: InitError) -> Self {
        match err {
            InitError::Connect(err) => Self::Connect(err),
            InitError::Call(err) => Self::Call(err),
        }
    }
}

impl From<PrintError> for PalError {
    fn from(err: PrintError) -> Self {
        match err {
            PrintError::Connect(err) => Self::Connect(err),
            PrintError::Call(err) => Self::Call(err),
        }
    }
}

impl From<RequestError> for PalError {
    fn from(err: RequestError) -> Self {
        match err {
            RequestError::Connect(err) => Self::Connect(err),
            RequestError::Call(err) => Self::Call(err),
        }
    }
}

impl From<ReadError> for PalError {
    fn from(err: ReadError) -> Self {
        match err {
            ReadError::TooLarge { .. } => Self::InvalidArgument,
            ReadError::Connect(err) => Self::Connect(err),
            ReadError::Call(err) => Self::Call(err),
        }
    }
}

impl From<WriteError> for PalError {
    fn from(err: WriteError) -> Self {
        match err {
            WriteError::TooLarge { .. } => Self::InvalidArgument,
            WriteError::Connect(err) => Self::Connect(err),
            WriteError::Call(err) => Self::Call(err),
        }
    }
}
