//! C argument handling behind the exported PAL functions.
//!
//! Each function validates raw C arguments, runs the matching [`Pal`]
//! operation and collapses the outcome to a [`PalStatus`] integer. Null
//! pointers and negative sizes fail without contacting the secure side.

use core::{
    ffi::{CStr, c_char, c_int, c_void},
    slice,
};

use psa_client::Transport;

use crate::{Pal, PalError, PalStatus};

fn status(result: Result<(), PalError>) -> c_int {
    PalStatus::from(result).to_raw()
}

/// Converts a C buffer length, rejecting negative values.
fn buffer_len(size: c_int) -> Result<usize, PalError> {
    usize::try_from(size).map_err(|_| PalError::InvalidArgument)
}

pub fn uart_init<T: Transport + ?Sized>(pal: &Pal<'_, T>, base_addr: u32) -> c_int {
    status(pal.uart_init(base_addr))
}

/// # Safety
///
/// `string` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
pub unsafe fn print<T: Transport + ?Sized>(
    pal: &Pal<'_, T>,
    string: *const c_char,
    data: u32,
) -> c_int {
    if string.is_null() {
        return status(Err(PalError::InvalidArgument));
    }
    // SAFETY: Non-null and NUL-terminated per the caller contract.
    let msg = unsafe { CStr::from_ptr(string) };
    status(pal.print(msg, data))
}

pub fn wd_timer_init<T: Transport + ?Sized>(
    pal: &Pal<'_, T>,
    base_addr: u32,
    time_us: u32,
    timer_tick_us: u32,
) -> c_int {
    status(pal.wd_timer_init(base_addr, time_us, timer_tick_us))
}

pub fn wd_timer_enable<T: Transport + ?Sized>(pal: &Pal<'_, T>, base_addr: u32) -> c_int {
    status(pal.wd_timer_enable(base_addr))
}

pub fn wd_timer_disable<T: Transport + ?Sized>(pal: &Pal<'_, T>, base_addr: u32) -> c_int {
    status(pal.wd_timer_disable(base_addr))
}

/// # Safety
///
/// `buffer` must be null or valid for writes of `size` bytes.
pub unsafe fn nvmem_read<T: Transport + ?Sized>(
    pal: &Pal<'_, T>,
    base: u32,
    offset: u32,
    buffer: *mut c_void,
    size: c_int,
) -> c_int {
    let len = match buffer_len(size) {
        Ok(len) if !buffer.is_null() => len,
        Ok(_) => return status(Err(PalError::InvalidArgument)),
        Err(err) => return status(Err(err)),
    };
    // SAFETY: Non-null and valid for `len` bytes per the caller contract.
    let buf = unsafe { slice::from_raw_parts_mut(buffer.cast::<u8>(), len) };
    status(pal.nvmem_read(base, offset, buf))
}

/// # Safety
///
/// `buffer` must be null or valid for reads of `size` bytes.
pub unsafe fn nvmem_write<T: Transport + ?Sized>(
    pal: &Pal<'_, T>,
    base: u32,
    offset: u32,
    buffer: *const c_void,
    size: c_int,
) -> c_int {
    let len = match buffer_len(size) {
        Ok(len) if !buffer.is_null() => len,
        Ok(_) => return status(Err(PalError::InvalidArgument)),
        Err(err) => return status(Err(err)),
    };
    // SAFETY: Non-null and valid for `len` bytes per the caller contract.
    let buf = unsafe { slice::from_raw_parts(buffer.cast::<u8>(), len) };
    status(pal.nvmem_write(base, offset, buf))
}

/// # Safety
///
/// `data` must be null or valid for writes of `len` bytes.
pub unsafe fn spi_read<T: Transport + ?Sized>(
    pal: &Pal<'_, T>,
    addr: u32,
    data: *mut u8,
    len: u32,
) -> c_int {
    if data.is_null() {
        return status(Err(PalError::InvalidArgument));
    }
    // SAFETY: Non-null and valid for `len` bytes per the caller contract.
    let buf = unsafe { slice::from_raw_parts_mut(data, len as usize) };
    status(pal.spi_read(addr, buf))
}

#[cfg(test)]
mod tests {
    use core::ptr;

    use psa_client::Status;
    use psa_client_mock::MockTransport;

    use super::*;
    use crate::ServiceTable;

    const ERROR: c_int = 0x80;

    /// A mock whose services all accept every request.
    fn accepting_mock() -> MockTransport {
        let mock = MockTransport::new();
        let table = ServiceTable::DEFAULT;
        for sid in [table.uart.sid, table.watchdog.sid, table.nvmem.sid] {
            mock.register(sid, |_: &[&[u8]], _: &mut [&mut [u8]]| Status::SUCCESS);
        }
        mock
    }

    fn pal(mock: &MockTransport) -> Pal<'_, MockTransport> {
        Pal::with_services(mock, ServiceTable::DEFAULT)
    }

    #[test]
    fn test_null_nvmem_buffers_fail_without_connect() {
        let mock = accepting_mock();
        let pal = pal(&mock);

        let read = unsafe { nvmem_read(&pal, 0, 0, ptr::null_mut(), 4) };
        let write = unsafe { nvmem_write(&pal, 0, 0, ptr::null(), 4) };

        assert_eq!(read, ERROR);
        assert_eq!(write, ERROR);
        assert_eq!(mock.stats().connects, 0);
        assert_eq!(mock.stats().failed_connects, 0);
    }

    #[test]
    fn test_negative_nvmem_size_fails_without_connect() {
        let mock = accepting_mock();
        let pal = pal(&mock);
        let mut buf = [0u8; 4];

        let read = unsafe { nvmem_read(&pal, 0, 0, buf.as_mut_ptr().cast(), -1) };
        let write = unsafe { nvmem_write(&pal, 0, 0, buf.as_ptr().cast(), -1) };

        assert_eq!(read, ERROR);
        assert_eq!(write, ERROR);
        assert_eq!(mock.stats().connects, 0);
    }

    #[test]
    fn test_valid_nvmem_buffers_reach_service() {
        let mock = accepting_mock();
        let pal = pal(&mock);
        let mut buf = [0u8; 4];

        let read = unsafe { nvmem_read(&pal, 0, 0, buf.as_mut_ptr().cast(), 4) };
        let write = unsafe { nvmem_write(&pal, 0, 0, buf.as_ptr().cast(), 4) };

        assert_eq!(read, 0);
        assert_eq!(write, 0);
        assert_eq!(mock.stats().calls, 2);
    }

    #[test]
    fn test_null_print_string_fails_without_connect() {
        let mock = accepting_mock();

        let rc = unsafe { print(&pal(&mock), ptr::null(), 7) };

        assert_eq!(rc, ERROR);
        assert_eq!(mock.stats().connects, 0);
    }

    #[test]
    fn test_print_passes_c_string() {
        let mock = accepting_mock();

        let rc = unsafe { print(&pal(&mock), c"ok %d\n".as_ptr(), 7) };

        assert_eq!(rc, 0);
        assert_eq!(mock.stats().closes, 1);
    }

    #[test]
    fn test_spi_read_fails_for_null_and_valid_buffers() {
        let mock = accepting_mock();
        let pal = pal(&mock);
        let mut data = [0u8; 2];

        assert_eq!(unsafe { spi_read(&pal, 0, ptr::null_mut(), 2) }, ERROR);
        assert_eq!(unsafe { spi_read(&pal, 0, data.as_mut_ptr(), 2) }, ERROR);
        assert_eq!(mock.stats().connects, 0);
    }

    #[test]
    fn test_watchdog_calls_report_status_integers() {
        let mock = accepting_mock();
        let pal = pal(&mock);

        assert_eq!(wd_timer_init(&pal, 0x4008_1000, 100, 1), 0);
        assert_eq!(wd_timer_enable(&pal, 0x4008_1000), 0);
        mock.fail_next_call(Status::from_raw(-1));
        assert_eq!(wd_timer_disable(&pal, 0x4008_1000), ERROR);
        assert_eq!(uart_init(&pal, 0x4000_4000), 0);
        assert_eq!(mock.stats().open, 0);
    }
}
