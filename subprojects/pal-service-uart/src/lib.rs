//! Secure UART driver service client.
//!
//! The UART driver lives on the secure side; the non-secure side reaches it
//! through a [`UartService`] endpoint, which opens a fresh connection for every
//! operation and releases it before returning.
//!
//! ## Operations
//!
//! | Operation | Discriminator | Parameters |
//! |-----------|---------------|------------|
//! | [`init`](UartService::init) | `UART_INIT` | base address |
//! | [`print`](UartService::print) | `UART_PRINT` | NUL-terminated string, format value |

#![no_std]

use core::ffi::CStr;

use psa_client::{ServiceId, Transport, Version};

mod ipc;
mod proto;

pub use self::{
    ipc::{InitError, PrintError},
    proto::{SERVICE_ID, UartFn, VERSION},
};

/// UART driver service endpoint.
pub struct UartService<'t, T: Transport + ?Sized> {
    transport: &'t T,
    sid: ServiceId,
    version: Version,
}

impl<'t, T: Transport + ?Sized> UartService<'t, T> {
    /// Creates an endpoint for the default UART service.
    #[inline]
    pub fn new(transport: &'t T) -> Self {
        Self::with_service(transport, SERVICE_ID, VERSION)
    }

    /// Creates an endpoint for the UART service registered as `sid`.
    #[inline]
    pub fn with_service(transport: &'t T, sid: ServiceId, version: Version) -> Self {
        Self {
            transport,
            sid,
            version,
        }
    }

    /// Returns the SID this endpoint connects to.
    #[inline]
    pub fn service_id(&self) -> ServiceId {
        self.sid
    }

    /// Initializes the UART at `base_addr`.
    #[inline]
    pub fn init(&self, base_addr: u32) -> Result<(), InitError> {
        ipc::init(self.transport, self.sid, self.version, base_addr)
    }

    /// Prints `msg` through the secure UART, substituting `data` for its format
    /// specifier.
    #[inline]
    pub fn print(&self, msg: &CStr, data: u32) -> Result<(), PrintError> {
        ipc::print(self.transport, self.sid, self.version, msg, data)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::{cell::RefCell, rc::Rc, vec::Vec};

    use psa_client::{CallError, ConnectError, Status};
    use psa_client_mock::MockTransport;

    use super::*;

    type Log = Rc<RefCell<Vec<Vec<Vec<u8>>>>>;

    /// Registers a UART partition that records every request.
    fn uart_mock() -> (MockTransport, Log) {
        let mock = MockTransport::new();
        let log: Log = Rc::default();
        let sink = log.clone();
        mock.register(SERVICE_ID, move |inputs: &[&[u8]], _: &mut [&mut [u8]]| {
            sink.borrow_mut()
                .push(inputs.iter().map(|v| v.to_vec()).collect());
            Status::SUCCESS
        });
        (mock, log)
    }

    #[test]
    fn test_init_sends_tag_then_base_address() {
        let (mock, log) = uart_mock();

        UartService::new(&mock).init(0x4000_4000).unwrap();

        let log = log.borrow();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].len(), 2);
        assert_eq!(log[0][0], 1u32.to_ne_bytes());
        assert_eq!(log[0][1], 0x4000_4000u32.to_ne_bytes());
        assert_eq!(mock.stats().closes, 1);
        assert_eq!(mock.open_handles(), 0);
    }

    #[test]
    fn test_print_includes_terminator_and_value() {
        let (mock, log) = uart_mock();

        UartService::new(&mock).print(c"value %d\n", 42).unwrap();

        let log = log.borrow();
        assert_eq!(log[0][0], 2u32.to_ne_bytes());
        assert_eq!(log[0][1], b"value %d\n\0");
        assert_eq!(log[0][2], 42u32.to_ne_bytes());
    }

    #[test]
    fn test_failed_init_call_still_closes() {
        let (mock, _log) = uart_mock();
        mock.fail_next_call(Status::from_raw(-1));

        let err = UartService::new(&mock).init(0x4000_4000).unwrap_err();

        assert!(matches!(err, InitError::Call(CallError::Status(_))));
        let stats = mock.stats();
        assert_eq!(stats.connects, 1);
        assert_eq!(stats.closes, 1);
        assert_eq!(stats.open, 0);
    }

    #[test]
    fn test_unknown_service_skips_call() {
        let (mock, log) = uart_mock();
        let uart = UartService::with_service(&mock, ServiceId::new(0xDEAD), VERSION);

        let err = uart.print(c"hello", 0).unwrap_err();

        assert!(matches!(err, PrintError::Connect(ConnectError::Refused)));
        assert!(log.borrow().is_empty());
        assert_eq!(mock.stats().calls, 0);
        assert_eq!(mock.stats().closes, 0);
    }

    #[test]
    fn test_discriminator_round_trips() {
        assert_eq!(UartFn::from_raw(UartFn::Print.to_raw()), Some(UartFn::Print));
        assert_eq!(UartFn::from_raw(0), None);
    }
}
