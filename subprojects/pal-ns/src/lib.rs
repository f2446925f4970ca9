//! Non-secure platform abstraction layer over the secure driver services.
//!
//! [`Pal`] exposes the driver operations that the non-secure side of a test
//! suite needs (console output, watchdog control and non-volatile memory
//! access) as single request/response exchanges with the matching secure
//! partition. Every operation opens its own connection and releases it before
//! returning, so no handle outlives a call.
//!
//! Failures carry a [`PalError`] for Rust callers; C callers see only the
//! [`PalStatus`] it collapses to, through the `ffi` feature.

#![no_std]

use core::ffi::CStr;

use pal_service_nvmem::NvmemService;
use pal_service_uart::UartService;
use pal_service_watchdog::WatchdogService;
use psa_client::Transport;

#[cfg_attr(not(feature = "ffi"), allow(dead_code))]
mod abi;
pub mod config;
mod error;
#[cfg(feature = "ffi")]
pub mod ffi;
mod status;

pub use self::{
    config::{ServiceEntry, ServiceTable},
    error::PalError,
    status::PalStatus,
};

/// Driver services reached through one transport.
pub struct Pal<'t, T: Transport + ?Sized> {
    transport: &'t T,
    services: ServiceTable,
}

impl<'t, T: Transport + ?Sized> Pal<'t, T> {
    /// Creates a PAL routed by the current [`config::service_table`].
    pub fn new(transport: &'t T) -> Self {
        Self::with_services(transport, config::service_table())
    }

    /// Creates a PAL routed by `services`.
    pub fn with_services(transport: &'t T, services: ServiceTable) -> Self {
        Self {
            transport,
            services,
        }
    }

    #[inline]
    pub fn services(&self) -> &ServiceTable {
        &self.services
    }

    /// Initializes the secure UART at `base_addr`.
    pub fn uart_init(&self, base_addr: u32) -> Result<(), PalError> {
        report("uart_init", self.uart().init(base_addr).map_err(PalError::from))
    }

    /// Prints `msg` through the secure UART with `data` as its format value.
    pub fn print(&self, msg: &CStr, data: u32) -> Result<(), PalError> {
        report("print", self.uart().print(msg, data).map_err(PalError::from))
    }

    /// Programs the watchdog at `base_addr` with a `time_us` timeout.
    pub fn wd_timer_init(
        &self,
        base_addr: u32,
        time_us: u32,
        timer_tick_us: u32,
    ) -> Result<(), PalError> {
        let result = self.watchdog().init(base_addr, time_us, timer_tick_us);
        report("wd_timer_init", result.map_err(PalError::from))
    }

    /// Starts the watchdog at `base_addr`.
    pub fn wd_timer_enable(&self, base_addr: u32) -> Result<(), PalError> {
        report(
            "wd_timer_enable",
            self.watchdog().enable(base_addr).map_err(PalError::from),
        )
    }

    /// Stops the watchdog at `base_addr`.
    pub fn wd_timer_disable(&self, base_addr: u32) -> Result<(), PalError> {
        report(
            "wd_timer_disable",
            self.watchdog().disable(base_addr).map_err(PalError::from),
        )
    }

    /// Fills `buf` from non-volatile memory at `base + offset`.
    ///
    /// The content of `buf` is unspecified when this fails.
    pub fn nvmem_read(&self, base: u32, offset: u32, buf: &mut [u8]) -> Result<(), PalError> {
        let result = self.nvmem().read(base, offset, buf);
        report("nvmem_read", result.map_err(PalError::from))
    }

    /// Stores `buf` in non-volatile memory at `base + offset`.
    pub fn nvmem_write(&self, base: u32, offset: u32, buf: &[u8]) -> Result<(), PalError> {
        let result = self.nvmem().write(base, offset, buf);
        report("nvmem_write", result.map_err(PalError::from))
    }

    /// Reads from an SPI peripheral.
    ///
    /// No secure SPI service exists on this platform: always fails with
    /// [`PalError::Unsupported`] and leaves `data` untouched.
    pub fn spi_read(&self, addr: u32, data: &mut [u8]) -> Result<(), PalError> {
        log::trace!("pal: spi_read {} bytes at {addr:#x}", data.len());
        report("spi_read", Err(PalError::Unsupported))
    }

    fn uart(&self) -> UartService<'t, T> {
        let ServiceEntry { sid, version } = self.services.uart;
        UartService::with_service(self.transport, sid, version)
    }

    fn watchdog(&self) -> WatchdogService<'t, T> {
        let ServiceEntry { sid, version } = self.services.watchdog;
        WatchdogService::with_service(self.transport, sid, version)
    }

    fn nvmem(&self) -> NvmemService<'t, T> {
        let ServiceEntry { sid, version } = self.services.nvmem;
        NvmemService::with_service(self.transport, sid, version)
    }
}

fn report(op: &str, result: Result<(), PalError>) -> Result<(), PalError> {
    if let Err(err) = &result {
        log::warn!("pal: {op} failed: {err}");
    }
    result
}
