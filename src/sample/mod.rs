use std::fs::File;
use std::io::{Error, Result};
use std::sync::atomic::AtomicU64;

use arena::Arena;

use crate::ffi::{Metadata, PAGE_SIZE};

mod arena;
pub mod rb;

pub use rb::{Chunk, Rb};

pub const MIN_RING_BYTES: usize = 8 * 1024;
pub const MAX_RING_BYTES: usize = 128 * 1024 * 1024;
pub const DEFAULT_RING_BYTES: usize = 512 * 1024;

/// Mapped view of the kernel sample stream: one control page followed by a
/// power-of-two ring the kernel writes into asynchronously.
///
/// The mapping is read-only and shared; the kernel keeps producing into it
/// without any coordination with us. It is unmapped on drop, so teardown
/// happens on every exit path.
pub struct Sampler {
    arena: Arena,
}

impl Sampler {
    pub(crate) fn new(perf: &File, ring_bytes: usize) -> Result<Self> {
        if !ring_bytes.is_power_of_two()
            || !(MIN_RING_BYTES..=MAX_RING_BYTES).contains(&ring_bytes)
        {
            return Err(Error::other(format!(
                "ring size must be a power of two between 8 KiB and 128 MiB, got {} bytes",
                ring_bytes
            )));
        }
        let Some(len) = ring_bytes.checked_add(*PAGE_SIZE) else {
            return Err(Error::other("allocation size overflow"));
        };
        let arena = Arena::new(perf, len)?;
        Ok(Self { arena })
    }

    /// Ring consumer positioned at the start of the stream.
    ///
    /// `data_head` in the control page is written by the kernel concurrently
    /// with our reads; projecting it as an [`AtomicU64`] keeps every access
    /// behind an explicit memory ordering.
    pub fn consumer(&self) -> Rb<'_> {
        let alloc = self.arena.as_slice();
        let metadata = unsafe { &mut *(alloc.as_ptr() as *mut Metadata) };
        let head = unsafe { AtomicU64::from_ptr(&mut metadata.data_head as _) };
        Rb::new(&alloc[*PAGE_SIZE..], head)
    }
}
