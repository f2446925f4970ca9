//! C FFI bindings for non-secure test code written in C.
//!
//! Each function runs the matching [`Pal`] operation over the platform PSA
//! client API, routed by [`config::service_table`](crate::config::service_table),
//! and returns a [`PalStatus`](crate::PalStatus) integer.

use core::ffi::{c_char, c_int, c_void};

use psa_client::psa_api::PsaApi;

use crate::{Pal, abi};

fn pal() -> Pal<'static, PsaApi> {
    Pal::new(&PsaApi)
}

/// Initializes the secure UART at `uart_base_addr`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pal_uart_init_ns(uart_base_addr: u32) -> c_int {
    abi::uart_init(&pal(), uart_base_addr)
}

/// Prints a NUL-terminated string through the secure UART.
///
/// # Safety
///
/// `string` must be null or point to a NUL-terminated string that stays valid
/// for the duration of the call.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pal_print_ns(string: *const c_char, data: u32) -> c_int {
    unsafe { abi::print(&pal(), string, data) }
}

/// Programs the watchdog at `base_addr`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pal_wd_timer_init_ns(
    base_addr: u32,
    time_us: u32,
    timer_tick_us: u32,
) -> c_int {
    abi::wd_timer_init(&pal(), base_addr, time_us, timer_tick_us)
}

/// Starts the watchdog at `base_addr`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pal_wd_timer_enable_ns(base_addr: u32) -> c_int {
    abi::wd_timer_enable(&pal(), base_addr)
}

/// Stops the watchdog at `base_addr`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pal_wd_timer_disable_ns(base_addr: u32) -> c_int {
    abi::wd_timer_disable(&pal(), base_addr)
}

/// Reads `size` bytes of non-volatile memory at `base + offset` into `buffer`.
///
/// # Safety
///
/// `buffer` must be null or valid for writes of `size` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pal_nvmem_read_ns(
    base: u32,
    offset: u32,
    buffer: *mut c_void,
    size: c_int,
) -> c_int {
    unsafe { abi::nvmem_read(&pal(), base, offset, buffer, size) }
}

/// Writes `size` bytes from `buffer` to non-volatile memory at `base + offset`.
///
/// # Safety
///
/// `buffer` must be null or valid for reads of `size` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pal_nvmem_write_ns(
    base: u32,
    offset: u32,
    buffer: *const c_void,
    size: c_int,
) -> c_int {
    unsafe { abi::nvmem_write(&pal(), base, offset, buffer, size) }
}

/// Reads from an SPI peripheral. Not supported; always fails.
///
/// # Safety
///
/// `data` must be null or valid for writes of `len` bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn pal_spi_read(addr: u32, data: *mut u8, len: u32) -> c_int {
    unsafe { abi::spi_read(&pal(), addr, data, len) }
}
