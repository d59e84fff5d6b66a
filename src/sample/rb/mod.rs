use std::cmp::min;
use std::sync::atomic::{AtomicU64, Ordering};


/// Consumer side of the kernel's single-producer sample ring.
///
/// The kernel publishes bytes by storing an ever-increasing `head` cursor
/// with release semantics; `tail` counts how much this consumer has taken
/// and is never shared or reset. Both cursors are absolute byte counts, the
/// power-of-two ring length maps them to ring positions.
pub struct Rb<'a> {
    ring: &'a [u8],
    head: &'a AtomicU64,
    tail: u64,
    scratch: Vec<u8>,
}

/// One drained batch of sample bytes, linearized in production order.
pub struct Chunk<'a> {
    pub bytes: &'a [u8],

    /// The producer lapped the consumer since the previous drain: some
    /// samples older than `bytes` were overwritten before we reached them.
    pub lost: bool,
}

impl<'a> Rb<'a> {
    /// `ring` must be power-of-two sized. `head` is the producer cursor,
    /// typically projected from the mapped control page; tests substitute a
    /// plain [`AtomicU64`].
    pub fn new(ring: &'a [u8], head: &'a AtomicU64) -> Self {
        debug_assert!(ring.len().is_power_of_two());
        Self {
            ring,
            head,
            tail: 0,
            scratch: vec![0; ring.len()],
        }
    }

    /// Copies everything the producer has published since the last call.
    ///
    /// Returns `None` when no new bytes are available; nothing is copied and
    /// `tail` does not move, so repeated calls with an unchanged `head` are
    /// no-ops.
    ///
    /// The acquire load of `head` pairs with the producer's release store:
    /// every ring byte the observed cursor covers is visible before the copy
    /// starts. Reading the cursor without that ordering could yield stale or
    /// torn ring contents.
    ///
    /// On overrun (`head - tail` exceeds the ring size) only the most recent
    /// ring's worth of bytes still exists; the batch is flagged
    /// [`lost`][Chunk::lost] and draining continues from the stale `tail`
    /// best-effort rather than discarding what is still readable.
    pub fn drain(&mut self) -> Option<Chunk<'_>> {
        let head = self.head.load(Ordering::Acquire);
        let tail = self.tail;
        if head == tail {
            return None;
        }

        let size = self.ring.len() as u64;
        let avail = head.wrapping_sub(tail);
        let lost = avail > size;
        let take = min(avail, size) as usize;

        linearize(self.ring, tail, take, &mut self.scratch);
        self.tail = head;

        Some(Chunk {
            bytes: &self.scratch[..take],
            lost,
        })
    }

    /// Consumer cursor: total bytes accounted for so far.
    pub fn tail(&self) -> u64 {
        self.tail
    }
}

// Copies `take` bytes starting at ring position `tail % len` into `scratch`,
// splitting the copy in two when the range wraps past the end of the ring.
// The segments land in scratch in temporal order: oldest bytes first.
fn linearize(ring: &[u8], tail: u64, take: usize, scratch: &mut [u8]) {
    let size = ring.len();
    let start = (tail % size as u64) as usize;
    let first = min(take, size - start);
    scratch[..first].copy_from_slice(&ring[start..start + first]);
    scratch[first..take].copy_from_slice(&ring[..take - first]);
}
