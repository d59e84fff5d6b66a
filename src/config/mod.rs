use thiserror::Error;

use crate::ffi::{bindings as b, Attr};

mod target;
#[cfg(test)]
mod test;

pub use target::*;

/// Rejected configuration input.
///
/// All range checks happen here, before anything reaches the kernel; the
/// session and drain code never see out-of-range values.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("event code {0:#x} out of range 0x0-0xfff")]
    EventCode(u64),

    #[error("unit mask {0:#x} out of range 0x0-0xff")]
    UnitMask(u64),

    #[error("sampling frequency {0} out of range 1-1000000000 Hz")]
    Frequency(u64),
}

/// Immutable description of what to measure: one raw PMU event, sampled on
/// frequency, for one target process.
///
/// Kernel-mode samples are included; hypervisor and idle time are not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SampleConfig {
    event: u16,
    unit_mask: u8,
    freq: u64,
}

impl SampleConfig {
    pub const DEFAULT_FREQ: u64 = 1000;

    /// Frequencies below this are accepted but worth a warning, the sample
    /// stream gets sparse enough to miss short-lived activity.
    pub const ADVISORY_MIN_FREQ: u64 = 2000;

    pub fn new(event: u64, unit_mask: u64, freq: u64) -> Result<Self, ConfigError> {
        if event > 0xFFF {
            return Err(ConfigError::EventCode(event));
        }
        if unit_mask > 0xFF {
            return Err(ConfigError::UnitMask(unit_mask));
        }
        if !(1..=1_000_000_000).contains(&freq) {
            return Err(ConfigError::Frequency(freq));
        }
        Ok(Self {
            event: event as u16,
            unit_mask: unit_mask as u8,
            freq,
        })
    }

    pub fn freq(&self) -> u64 {
        self.freq
    }

    /// Encodes this configuration as the attr submitted to `perf_event_open`.
    ///
    /// Pure and deterministic: equal configurations produce equal attrs.
    pub(crate) fn as_attr(&self) -> Attr {
        let mut attr = Attr {
            size: size_of::<Attr>() as _,
            ..Default::default()
        };
        attr.kind = b::PERF_TYPE_RAW;
        attr.config = self.event as u64 | (self.unit_mask as u64) << 8;
        attr.sample_period_or_freq = self.freq;
        attr.sample_type = b::PERF_SAMPLE_TID | b::PERF_SAMPLE_READ;
        attr.flags = b::PERF_ATTR_FLAG_FREQ
            | b::PERF_ATTR_FLAG_INHERIT
            | b::PERF_ATTR_FLAG_PINNED
            | b::PERF_ATTR_FLAG_EXCLUDE_HV
            | b::PERF_ATTR_FLAG_EXCLUDE_IDLE;
        attr
    }
}
