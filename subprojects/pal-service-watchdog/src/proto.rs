//! Watchdog driver service protocol constants and types.

use psa_client::{ServiceId, Version};
use static_assertions::const_assert_eq;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};

/// SID of the secure watchdog driver service.
pub const SERVICE_ID: ServiceId = ServiceId::new(0x0000_FC02);

/// Contract version requested on connect.
pub const VERSION: Version = Version::new(0);

/// Operation discriminator, the first field of [`WdParam`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum WdFn {
    /// Program the timeout.
    InitSeq = 0x1,
    /// Start the watchdog.
    EnableSeq = 0x2,
    /// Stop the watchdog.
    DisableSeq = 0x3,
}

impl WdFn {
    /// Converts a wire value back into a discriminator.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0x1 => Some(Self::InitSeq),
            0x2 => Some(Self::EnableSeq),
            0x3 => Some(Self::DisableSeq),
            _ => None,
        }
    }
}

/// Wire layout of a watchdog request (`wd_param_t`).
///
/// Sent as the only request vector; the timing fields are zero for enable and
/// disable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct WdParam {
    pub wd_fn_type: u32,
    pub wd_base_addr: u32,
    pub wd_time_us: u32,
    pub wd_timer_tick_us: u32,
}
const_assert_eq!(size_of::<WdParam>(), 16);

/// A watchdog operation and its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchdogRequest {
    /// Program a timeout of `time_us` microseconds, given the timer's
    /// `timer_tick_us` ticks per microsecond.
    Init {
        base_addr: u32,
        time_us: u32,
        timer_tick_us: u32,
    },
    /// Start the watchdog.
    Enable { base_addr: u32 },
    /// Stop the watchdog.
    Disable { base_addr: u32 },
}

impl WatchdogRequest {
    /// Returns the operation discriminator.
    pub fn function(&self) -> WdFn {
        match self {
            Self::Init { .. } => WdFn::InitSeq,
            Self::Enable { .. } => WdFn::EnableSeq,
            Self::Disable { .. } => WdFn::DisableSeq,
        }
    }

    /// Lowers the request to its wire layout.
    pub fn to_param(&self) -> WdParam {
        let wd_fn_type = self.function() as u32;
        match *self {
            Self::Init {
                base_addr,
                time_us,
                timer_tick_us,
            } => WdParam {
                wd_fn_type,
                wd_base_addr: base_addr,
                wd_time_us: time_us,
                wd_timer_tick_us: timer_tick_us,
            },
            Self::Enable { base_addr } | Self::Disable { base_addr } => WdParam {
                wd_fn_type,
                wd_base_addr: base_addr,
                wd_time_us: 0,
                wd_timer_tick_us: 0,
            },
        }
    }
}
