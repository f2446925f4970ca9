//! Driver service routing set by the platform before the PAL is used.
//!
//! Defaults to the SIDs and versions each service crate declares. Platforms
//! that register the drivers elsewhere override the table once at startup.

use core::sync::atomic::{AtomicU32, Ordering};

use psa_client::{ServiceId, Version};

/// SID and contract version of one driver service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceEntry {
    /// SID the driver partition registers.
    pub sid: ServiceId,
    /// Minor version requested on connect.
    pub version: Version,
}

impl ServiceEntry {
    pub const fn new(sid: ServiceId, version: Version) -> Self {
        Self { sid, version }
    }
}

/// Routing for every driver service the PAL talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTable {
    /// Console output.
    pub uart: ServiceEntry,
    /// Watchdog timer control.
    pub watchdog: ServiceEntry,
    /// Non-volatile memory access.
    pub nvmem: ServiceEntry,
}

impl ServiceTable {
    /// The SIDs and versions the driver partitions register by default.
    pub const DEFAULT: Self = Self {
        uart: ServiceEntry::new(pal_service_uart::SERVICE_ID, pal_service_uart::VERSION),
        watchdog: ServiceEntry::new(
            pal_service_watchdog::SERVICE_ID,
            pal_service_watchdog::VERSION,
        ),
        nvmem: ServiceEntry::new(pal_service_nvmem::SERVICE_ID, pal_service_nvmem::VERSION),
    };
}

impl Default for ServiceTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}

struct AtomicEntry {
    sid: AtomicU32,
    version: AtomicU32,
}

impl AtomicEntry {
    const fn new(entry: ServiceEntry) -> Self {
        Self {
            sid: AtomicU32::new(entry.sid.to_raw()),
            version: AtomicU32::new(entry.version.to_raw()),
        }
    }

    fn store(&self, entry: ServiceEntry) {
        self.sid.store(entry.sid.to_raw(), Ordering::Release);
        self.version.store(entry.version.to_raw(), Ordering::Release);
    }

    fn load(&self) -> ServiceEntry {
        ServiceEntry::new(
            ServiceId::new(self.sid.load(Ordering::Acquire)),
            Version::new(self.version.load(Ordering::Acquire)),
        )
    }
}

static UART: AtomicEntry = AtomicEntry::new(ServiceTable::DEFAULT.uart);
static WATCHDOG: AtomicEntry = AtomicEntry::new(ServiceTable::DEFAULT.watchdog);
static NVMEM: AtomicEntry = AtomicEntry::new(ServiceTable::DEFAULT.nvmem);

/// Overrides the service routing.
///
/// Must be called before any PAL operation runs; operations already in flight
/// may observe a mix of the old and new tables.
pub fn set_service_table(table: ServiceTable) {
    log::debug!(
        "pal: routing uart={} watchdog={} nvmem={}",
        table.uart.sid,
        table.watchdog.sid,
        table.nvmem.sid
    );
    UART.store(table.uart);
    WATCHDOG.store(table.watchdog);
    NVMEM.store(table.nvmem);
}

/// Returns the current service routing.
pub fn service_table() -> ServiceTable {
    ServiceTable {
        uart: UART.load(),
        watchdog: WATCHDOG.load(),
        nvmem: NVMEM.load(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_uses_service_defaults() {
        let table = ServiceTable::default();

        assert_eq!(table.uart.sid, ServiceId::new(0xFC01));
        assert_eq!(table.watchdog.sid, ServiceId::new(0xFC02));
        assert_eq!(table.nvmem.sid, ServiceId::new(0xFC03));
        assert_eq!(table.nvmem.version, Version::new(0));
    }

    #[test]
    fn test_override_is_observed_then_restored() {
        let custom = ServiceTable {
            nvmem: ServiceEntry::new(ServiceId::new(0x0001_0003), Version::new(2)),
            ..ServiceTable::DEFAULT
        };

        set_service_table(custom);
        let observed = service_table();
        set_service_table(ServiceTable::DEFAULT);

        assert_eq!(observed, custom);
        assert_eq!(service_table(), ServiceTable::DEFAULT);
    }
}
