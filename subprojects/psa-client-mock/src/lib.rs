//! In-memory PSA transport for host tests.
//!
//! [`MockTransport`] stands in for the secure side: it routes connections to
//! fake partitions registered by SID, hands out handles from a bounded slot
//! table, and counts every connect, call and close so tests can assert on the
//! handle lifecycle (no leaks, exactly one close per connect, no call after a
//! failed connect).
//!
//! Faults can be queued for the next connect or call to exercise the failure
//! paths of the code under test.
//!
//! ```ignore
//! let mock = MockTransport::new();
//! mock.register(UART_SID, |inputs: &[&[u8]], _: &mut [&mut [u8]]| Status::SUCCESS);
//! mock.fail_next_call(Status::from_raw(-1));
//! ```

use std::{
    cell::RefCell,
    collections::{BTreeMap, VecDeque},
};

use psa_client::{
    InVec, OutVec, ServiceId, Status, Transport, Version,
    raw::{PSA_ERROR_PROGRAMMER_ERROR, RawHandle, RawStatus},
};

/// Default number of simultaneously open handles.
pub const DEFAULT_MAX_HANDLES: usize = 8;

/// A fake secure partition.
///
/// Receives the request vectors as byte slices and the response vectors as
/// writable byte slices, in call order.
pub trait Partition {
    /// Handles one call and returns its status.
    fn call(&mut self, inputs: &[&[u8]], outputs: &mut [&mut [u8]]) -> Status;
}

impl<F> Partition for F
where
    F: FnMut(&[&[u8]], &mut [&mut [u8]]) -> Status,
{
    fn call(&mut self, inputs: &[&[u8]], outputs: &mut [&mut [u8]]) -> Status {
        self(inputs, outputs)
    }
}

/// Lifecycle counters kept by [`MockTransport`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    /// Successful connects.
    pub connects: usize,
    /// Connects that returned an error.
    pub failed_connects: usize,
    /// Calls that reached the transport, including failing ones.
    pub calls: usize,
    /// Valid closes.
    pub closes: usize,
    /// Handles currently open.
    pub open: usize,
    /// Highest number of handles open at the same time.
    pub peak_open: usize,
    /// Calls issued on a handle that was not open.
    pub invalid_calls: usize,
    /// Closes issued on a handle that was not open.
    pub invalid_closes: usize,
}

struct Registered {
    min_version: Version,
    partition: Box<dyn Partition>,
}

struct Inner {
    partitions: BTreeMap<ServiceId, Registered>,
    slots: Vec<Option<ServiceId>>,
    connect_faults: VecDeque<Status>,
    call_faults: VecDeque<Status>,
    stats: Stats,
}

impl Inner {
    fn slot_of(&self, handle: RawHandle) -> Option<usize> {
        let idx = usize::try_from(handle).ok()?.checked_sub(1)?;
        self.slots.get(idx)?.is_some().then_some(idx)
    }
}

/// In-memory transport with fake partitions.
pub struct MockTransport {
    inner: RefCell<Inner>,
}

impl MockTransport {
    /// Creates a transport with no partitions and [`DEFAULT_MAX_HANDLES`] slots.
    pub fn new() -> Self {
        Self::with_max_handles(DEFAULT_MAX_HANDLES)
    }

    /// Creates a transport allowing at most `max_handles` open connections.
    pub fn with_max_handles(max_handles: usize) -> Self {
        Self {
            inner: RefCell::new(Inner {
                partitions: BTreeMap::new(),
                slots: vec![None; max_handles],
                connect_faults: VecDeque::new(),
                call_faults: VecDeque::new(),
                stats: Stats::default(),
            }),
        }
    }

    /// Registers `partition` under `sid`, accepting any version.
    pub fn register(&self, sid: ServiceId, partition: impl Partition + 'static) {
        self.register_versioned(sid, Version::default(), partition);
    }

    /// Registers `partition` under `sid`, refusing versions below `min_version`.
    pub fn register_versioned(
        &self,
        sid: ServiceId,
        min_version: Version,
        partition: impl Partition + 'static,
    ) {
        self.inner.borrow_mut().partitions.insert(
            sid,
            Registered {
                min_version,
                partition: Box::new(partition),
            },
        );
    }

    /// Makes the next connect fail with `status`.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not negative, since connect reports errors as
    /// negative handles.
    pub fn fail_next_connect(&self, status: Status) {
        assert!(status.to_raw() < 0, "connect faults must be negative");
        self.inner.borrow_mut().connect_faults.push_back(status);
    }

    /// Makes the next call fail with `status` without reaching the partition.
    pub fn fail_next_call(&self, status: Status) {
        assert!(!status.is_success(), "call faults must not be PSA_SUCCESS");
        self.inner.borrow_mut().call_faults.push_back(status);
    }

    /// Returns a snapshot of the lifecycle counters.
    pub fn stats(&self) -> Stats {
        self.inner.borrow().stats
    }

    /// Returns the number of handles currently open.
    pub fn open_handles(&self) -> usize {
        self.inner.borrow().stats.open
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MockTransport {
    fn connect(&self, sid: ServiceId, version: Version) -> RawHandle {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        let refused = match inner.partitions.get(&sid) {
            None => Some(Status::CONNECTION_REFUSED),
            Some(reg) if version < reg.min_version => Some(Status::CONNECTION_REFUSED),
            Some(_) => inner.connect_faults.pop_front(),
        };
        if let Some(status) = refused {
            log::trace!("mock: connect to {sid} refused with {status}");
            inner.stats.failed_connects += 1;
            return status.to_raw();
        }

        let Some(idx) = inner.slots.iter().position(Option::is_none) else {
            log::trace!("mock: connect to {sid} busy, no free slot");
            inner.stats.failed_connects += 1;
            return Status::CONNECTION_BUSY.to_raw();
        };

        inner.slots[idx] = Some(sid);
        inner.stats.connects += 1;
        inner.stats.open += 1;
        inner.stats.peak_open = inner.stats.peak_open.max(inner.stats.open);

        (idx + 1) as RawHandle
    }

    fn call(
        &self,
        handle: RawHandle,
        in_vec: &[InVec<'_>],
        out_vec: &mut [OutVec<'_>],
    ) -> RawStatus {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;

        let Some(idx) = inner.slot_of(handle) else {
            log::warn!("mock: call on handle {handle} which is not open");
            inner.stats.invalid_calls += 1;
            return PSA_ERROR_PROGRAMMER_ERROR;
        };
        inner.stats.calls += 1;

        if let Some(status) = inner.call_faults.pop_front() {
            return status.to_raw();
        }

        let Some(sid) = inner.slots[idx] else {
            return PSA_ERROR_PROGRAMMER_ERROR;
        };
        let Some(reg) = inner.partitions.get_mut(&sid) else {
            return PSA_ERROR_PROGRAMMER_ERROR;
        };

        let inputs: Vec<&[u8]> = in_vec.iter().map(InVec::as_slice).collect();
        let mut outputs: Vec<&mut [u8]> = out_vec.iter_mut().map(|v| v.as_mut_slice()).collect();

        reg.partition.call(&inputs, &mut outputs).to_raw()
    }

    fn close(&self, handle: RawHandle) {
        let mut inner = self.inner.borrow_mut();

        let Some(idx) = inner.slot_of(handle) else {
            log::warn!("mock: close on handle {handle} which is not open");
            inner.stats.invalid_closes += 1;
            return;
        };

        inner.slots[idx] = None;
        inner.stats.closes += 1;
        inner.stats.open -= 1;
    }
}

#[cfg(test)]
mod tests {
    use psa_client::{ConnectError, connect};

    use super::*;

    const SID: ServiceId = ServiceId::new(0x42);

    fn ok(_: &[&[u8]], _: &mut [&mut [u8]]) -> Status {
        Status::SUCCESS
    }

    #[test]
    fn test_unknown_service_is_refused() {
        let mock = MockTransport::new();

        let err = connect(&mock, SID, Version::default()).unwrap_err();

        assert!(matches!(err, ConnectError::Refused));
        assert_eq!(mock.stats().failed_connects, 1);
    }

    #[test]
    fn test_version_below_minimum_is_refused() {
        let mock = MockTransport::new();
        mock.register_versioned(SID, Version::new(2), ok);

        assert!(connect(&mock, SID, Version::new(1)).is_err());
        assert!(connect(&mock, SID, Version::new(2)).is_ok());
    }

    #[test]
    fn test_exhausted_slots_report_busy() {
        let mock = MockTransport::with_max_handles(1);
        mock.register(SID, ok);

        let first = connect(&mock, SID, Version::default()).unwrap();
        let second = connect(&mock, SID, Version::default());

        assert!(matches!(second, Err(ConnectError::Busy)));
        drop(first);
        assert!(connect(&mock, SID, Version::default()).is_ok());
    }

    #[test]
    fn test_invalid_handle_operations_are_counted() {
        let mock = MockTransport::new();
        mock.register(SID, ok);

        let status = Status::from_raw(mock.call(5, &[], &mut []));
        assert_eq!(status, Status::PROGRAMMER_ERROR);
        assert_ne!(status, Status::CONNECTION_REFUSED);
        mock.close(5);
        mock.close(-1);

        let stats = mock.stats();
        assert_eq!(stats.invalid_calls, 1);
        assert_eq!(stats.invalid_closes, 2);
        assert_eq!(stats.calls, 0);
    }

    #[test]
    fn test_call_fault_skips_partition() {
        let mock = MockTransport::new();
        mock.register(SID, |_: &[&[u8]], outputs: &mut [&mut [u8]]| {
            outputs[0].fill(0xFF);
            Status::SUCCESS
        });
        mock.fail_next_call(Status::from_raw(-7));

        let mut out = [0u8; 2];
        let conn = connect(&mock, SID, Version::default()).unwrap();
        let result = conn.request().output(&mut out).send();
        drop(conn);

        assert!(result.is_err());
        assert_eq!(out, [0, 0]);
        assert_eq!(mock.stats().closes, 1);
    }
}
