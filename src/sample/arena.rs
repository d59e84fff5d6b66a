use std::fs::File;
use std::io::{Error, Result};
use std::ptr::{null_mut, NonNull};
use std::slice;

use log::error;

use crate::ffi::syscall::{mmap, munmap};

/// The mapped region backing a sampler: control page + ring.
pub struct Arena {
    ptr: NonNull<u8>,
    len: usize,
}

impl Arena {
    pub fn new(file: &File, len: usize) -> Result<Self> {
        // The consumer never writes back, not even `data_tail`; overrun
        // detection works off the monotonic cursors instead.
        let prot = libc::PROT_READ;
        let flags = libc::MAP_SHARED;
        let ptr = unsafe { mmap::<u8>(null_mut(), len, prot, flags, file, 0) }?;
        let Some(ptr) = NonNull::new(ptr) else {
            return Err(Error::other("mmap returned a null mapping"));
        };
        Ok(Self { ptr, len })
    }

    pub fn as_slice(&self) -> &[u8] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }
}

impl Drop for Arena {
    fn drop(&mut self) {
        if let Err(e) = unsafe { munmap(self.ptr.as_ptr(), self.len) } {
            error!("failed to unmap sample ring: {}", e);
        }
    }
}
