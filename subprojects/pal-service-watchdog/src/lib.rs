//! Secure watchdog driver service client.
//!
//! All three watchdog operations share one request shape: a single
//! [`WdParam`] vector whose first field selects the operation. They are
//! modeled as the [`WatchdogRequest`] variants and lowered to that layout
//! just before sending.

#![no_std]

use psa_client::{ServiceId, Transport, Version};

mod ipc;
mod proto;

pub use self::{
    ipc::RequestError,
    proto::{SERVICE_ID, VERSION, WatchdogRequest, WdFn, WdParam},
};

/// Watchdog driver service endpoint.
pub struct WatchdogService<'t, T: Transport + ?Sized> {
    transport: &'t T,
    sid: ServiceId,
    version: Version,
}

impl<'t, T: Transport + ?Sized> WatchdogService<'t, T> {
    /// Creates an endpoint for the default watchdog service.
    #[inline]
    pub fn new(transport: &'t T) -> Self {
        Self::with_service(transport, SERVICE_ID, VERSION)
    }

    /// Creates an endpoint for the watchdog service registered as `sid`.
    #[inline]
    pub fn with_service(transport: &'t T, sid: ServiceId, version: Version) -> Self {
        Self {
            transport,
            sid,
            version,
        }
    }

    /// Sends an arbitrary watchdog request.
    #[inline]
    pub fn request(&self, request: WatchdogRequest) -> Result<(), RequestError> {
        ipc::send(self.transport, self.sid, self.version, request)
    }

    /// Initializes the watchdog at `base_addr` with a timeout of `time_us`
    /// microseconds, given `timer_tick_us` ticks per microsecond.
    #[inline]
    pub fn init(
        &self,
        base_addr: u32,
        time_us: u32,
        timer_tick_us: u32,
    ) -> Result<(), RequestError> {
        self.request(WatchdogRequest::Init {
            base_addr,
            time_us,
            timer_tick_us,
        })
    }

    /// Enables the watchdog at `base_addr`.
    #[inline]
    pub fn enable(&self, base_addr: u32) -> Result<(), RequestError> {
        self.request(WatchdogRequest::Enable { base_addr })
    }

    /// Disables the watchdog at `base_addr`.
    #[inline]
    pub fn disable(&self, base_addr: u32) -> Result<(), RequestError> {
        self.request(WatchdogRequest::Disable { base_addr })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::{cell::RefCell, rc::Rc, vec::Vec};

    use psa_client::Status;
    use psa_client_mock::MockTransport;
    use zerocopy::FromBytes;

    use super::*;

    const WDOG_BASE: u32 = 0x4008_1000;

    /// Registers a watchdog partition that decodes and records each request.
    fn watchdog_mock() -> (MockTransport, Rc<RefCell<Vec<WdParam>>>) {
        let mock = MockTransport::new();
        let seen: Rc<RefCell<Vec<WdParam>>> = Rc::default();
        let sink = seen.clone();
        mock.register(SERVICE_ID, move |inputs: &[&[u8]], _: &mut [&mut [u8]]| {
            let [param] = inputs else {
                return Status::from_raw(-1);
            };
            match WdParam::read_from_bytes(param) {
                Ok(param) => {
                    sink.borrow_mut().push(param);
                    Status::SUCCESS
                }
                Err(_) => Status::from_raw(-1),
            }
        });
        (mock, seen)
    }

    #[test]
    fn test_init_carries_timing_parameters() {
        let (mock, seen) = watchdog_mock();

        WatchdogService::new(&mock).init(WDOG_BASE, 5000, 3).unwrap();

        assert_eq!(
            seen.borrow()[0],
            WdParam {
                wd_fn_type: WdFn::InitSeq as u32,
                wd_base_addr: WDOG_BASE,
                wd_time_us: 5000,
                wd_timer_tick_us: 3,
            }
        );
    }

    #[test]
    fn test_enable_succeeds_on_successful_call() {
        let (mock, seen) = watchdog_mock();

        let result = WatchdogService::new(&mock).enable(WDOG_BASE);

        assert!(result.is_ok());
        let param = seen.borrow()[0];
        assert_eq!(WdFn::from_raw(param.wd_fn_type), Some(WdFn::EnableSeq));
        assert_eq!(param.wd_time_us, 0);
        assert_eq!(param.wd_timer_tick_us, 0);
        assert_eq!(mock.stats().closes, 1);
    }

    #[test]
    fn test_rejected_disable_reports_failure_and_closes() {
        let (mock, seen) = watchdog_mock();
        mock.fail_next_call(Status::from_raw(-3));

        let result = WatchdogService::new(&mock).disable(WDOG_BASE);

        assert!(matches!(result, Err(RequestError::Call(_))));
        assert!(seen.borrow().is_empty());
        assert_eq!(mock.stats().closes, 1);
        assert_eq!(mock.open_handles(), 0);
    }

    #[test]
    fn test_refused_connect_reports_failure_without_call() {
        let (mock, _) = watchdog_mock();
        mock.fail_next_connect(Status::CONNECTION_BUSY);

        let result = WatchdogService::new(&mock).enable(WDOG_BASE);

        assert!(matches!(result, Err(RequestError::Connect(_))));
        assert_eq!(mock.stats().calls, 0);
        assert_eq!(mock.stats().closes, 0);
    }

    #[test]
    fn test_request_lowering_zeroes_unused_fields() {
        let param = WatchdogRequest::Disable { base_addr: 7 }.to_param();

        assert_eq!(param.wd_fn_type, 3);
        assert_eq!(param.wd_base_addr, 7);
        assert_eq!(param.wd_time_us, 0);
    }
}
