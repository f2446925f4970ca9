//! Secure NVMEM driver service client.
//!
//! Reads return the data in a caller-supplied response buffer; writes pass the
//! data as a second request vector after the [`NvmemParam`] header. Transfer
//! lengths travel as a signed 32-bit field, so buffers longer than `i32::MAX`
//! are refused before any connection is opened.

#![no_std]

use psa_client::{ServiceId, Transport, Version};

mod ipc;
mod proto;

pub use self::{
    ipc::{ReadError, WriteError},
    proto::{NvmemFn, NvmemParam, NvmemRequest, SERVICE_ID, VERSION},
};

/// NVMEM driver service endpoint.
pub struct NvmemService<'t, T: Transport + ?Sized> {
    transport: &'t T,
    sid: ServiceId,
    version: Version,
}

impl<'t, T: Transport + ?Sized> NvmemService<'t, T> {
    /// Creates an endpoint for the default NVMEM service.
    #[inline]
    pub fn new(transport: &'t T) -> Self {
        Self::with_service(transport, SERVICE_ID, VERSION)
    }

    /// Creates an endpoint for the NVMEM service registered as `sid`.
    #[inline]
    pub fn with_service(transport: &'t T, sid: ServiceId, version: Version) -> Self {
        Self {
            transport,
            sid,
            version,
        }
    }

    /// Fills `buf` from non-volatile memory at `base + offset`.
    ///
    /// On error the content of `buf` is unspecified.
    #[inline]
    pub fn read(&self, base: u32, offset: u32, buf: &mut [u8]) -> Result<(), ReadError> {
        ipc::read(self.transport, self.sid, self.version, base, offset, buf)
    }

    /// Stores `buf` in non-volatile memory at `base + offset`.
    #[inline]
    pub fn write(&self, base: u32, offset: u32, buf: &[u8]) -> Result<(), WriteError> {
        ipc::write(self.transport, self.sid, self.version, base, offset, buf)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::{cell::RefCell, rc::Rc, vec, vec::Vec};

    use psa_client::{CallError, ConnectError, Status};
    use psa_client_mock::MockTransport;
    use zerocopy::FromBytes;

    use super::*;

    const NV_BASE: u32 = 0x2000_0000;
    const REJECTED: Status = Status::from_raw(-1);

    /// Registers an NVMEM partition backed by `size` bytes of erased memory.
    fn nvmem_mock(size: usize) -> (MockTransport, Rc<RefCell<Vec<u8>>>) {
        let mock = MockTransport::new();
        let memory = Rc::new(RefCell::new(vec![0xFF; size]));
        let cells = memory.clone();
        mock.register(SERVICE_ID, move |inputs: &[&[u8]], outputs: &mut [&mut [u8]]| {
            let Some(Ok(param)) = inputs.first().map(|p| NvmemParam::read_from_bytes(p)) else {
                return REJECTED;
            };
            let Ok(len) = usize::try_from(param.size) else {
                return REJECTED;
            };
            let start = (param.base - NV_BASE) as usize + param.offset as usize;
            let mut cells = cells.borrow_mut();
            let Some(range) = cells.get_mut(start..start + len) else {
                return REJECTED;
            };
            match (NvmemFn::from_raw(param.nvmem_fn_type), inputs, outputs) {
                (Some(NvmemFn::Read), [_], [out]) if out.len() == len => {
                    out.copy_from_slice(range);
                    Status::SUCCESS
                }
                (Some(NvmemFn::Write), [_, data], []) if data.len() == len => {
                    range.copy_from_slice(data);
                    Status::SUCCESS
                }
                _ => REJECTED,
            }
        });
        (mock, memory)
    }

    #[test]
    fn test_write_then_read_returns_written_bytes() {
        let (mock, _) = nvmem_mock(64);
        let nvmem = NvmemService::new(&mock);

        nvmem.write(NV_BASE, 8, b"psa-test").unwrap();
        let mut buf = [0u8; 8];
        nvmem.read(NV_BASE, 8, &mut buf).unwrap();

        assert_eq!(&buf, b"psa-test");
        let stats = mock.stats();
        assert_eq!(stats.connects, 2);
        assert_eq!(stats.closes, 2);
        assert_eq!(stats.peak_open, 1);
    }

    #[test]
    fn test_write_places_data_at_offset() {
        let (mock, memory) = nvmem_mock(16);

        NvmemService::new(&mock).write(NV_BASE, 4, &[1, 2, 3]).unwrap();

        assert_eq!(&memory.borrow()[3..8], &[0xFF, 1, 2, 3, 0xFF]);
    }

    #[test]
    fn test_out_of_range_read_fails_and_closes() {
        let (mock, _) = nvmem_mock(16);
        let mut buf = [0u8; 8];

        let err = NvmemService::new(&mock).read(NV_BASE, 12, &mut buf).unwrap_err();

        assert!(matches!(err, ReadError::Call(CallError::Status(s)) if s == REJECTED));
        assert_eq!(mock.stats().closes, 1);
        assert_eq!(mock.open_handles(), 0);
    }

    #[test]
    fn test_empty_read_still_round_trips() {
        let (mock, _) = nvmem_mock(4);

        NvmemService::new(&mock).read(NV_BASE, 0, &mut []).unwrap();

        assert_eq!(mock.stats().calls, 1);
    }

    #[test]
    fn test_busy_service_fails_write_without_call() {
        let (mock, memory) = nvmem_mock(4);
        mock.fail_next_connect(Status::CONNECTION_BUSY);

        let err = NvmemService::new(&mock).write(NV_BASE, 0, &[0]).unwrap_err();

        assert!(matches!(err, WriteError::Connect(ConnectError::Busy)));
        assert_eq!(mock.stats().calls, 0);
        assert_eq!(memory.borrow()[0], 0xFF);
    }

    #[test]
    fn test_request_lowering_keeps_signed_size() {
        let param = NvmemRequest::Read {
            base: 1,
            offset: 2,
            size: 3,
        }
        .to_param();

        assert_eq!(
            param,
            NvmemParam {
                nvmem_fn_type: NvmemFn::Read as u32,
                base: 1,
                offset: 2,
                size: 3,
            }
        );
    }
}
