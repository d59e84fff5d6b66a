use std::fs::File;
use std::io::Result;

use crate::config::{SampleConfig, Target};
use crate::ffi::bindings as b;
use crate::ffi::syscall::perf_event_open;
use crate::sample::Sampler;

/// An open kernel counter for one target process.
///
/// The counter starts counting as soon as it is opened (the attr never sets
/// the disabled bit, matching a pinned always-on counter). The fd is owned
/// by a [`File`], so the kernel resource is released on every exit path.
pub struct Counter {
    perf: File,
}

impl Counter {
    /// Submits `config` against `target` to the kernel.
    ///
    /// Fails with the underlying OS error if the kernel refuses, e.g. an
    /// unsupported event, insufficient privilege or an invalid pid. None of
    /// these are recoverable for a single-counter run.
    pub fn new(config: &SampleConfig, target: Target) -> Result<Self> {
        let attr = config.as_attr();
        let flags = b::PERF_FLAG_FD_CLOEXEC;
        let perf = perf_event_open(&attr, target.pid(), -1, -1, flags)?;
        Ok(Self { perf })
    }

    /// Maps the control page plus a `ring_bytes` sample ring for this
    /// counter.
    pub fn sampler(&self, ring_bytes: usize) -> Result<Sampler> {
        Sampler::new(&self.perf, ring_bytes)
    }

    pub fn file(&self) -> &File {
        &self.perf
    }
}
