use std::io::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use log::warn;

use crate::sample::Rb;
use crate::sink::Sink;

pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(120);

/// Polls the ring at a fixed interval and appends every drained batch to the
/// sink until `stop` is raised or a write fails.
///
/// Polling instead of blocking on the fd keeps the loop trivial; the
/// interval trades CPU against sample-loss risk when the ring is small
/// relative to the production rate. An overrun is reported and tolerated; a
/// sink error is fatal, since retrying or carrying a partial batch into the
/// next iteration would break the byte order of the output.
///
/// On a clean stop one final drain captures whatever the producer had
/// already published, then the sink is flushed.
pub fn drain_loop(
    rb: &mut Rb<'_>,
    sink: &mut Sink,
    interval: Duration,
    stop: &AtomicBool,
) -> Result<()> {
    while !stop.load(Ordering::Relaxed) {
        thread::sleep(interval);
        forward(rb, sink)?;
    }
    forward(rb, sink)?;
    sink.flush()
}

fn forward(rb: &mut Rb<'_>, sink: &mut Sink) -> Result<()> {
    let Some(chunk) = rb.drain() else {
        return Ok(());
    };
    if chunk.lost {
        warn!("missed samples: the ring filled up between polls, consider a larger buffer");
    }
    sink.write(chunk.bytes)
}

#[cfg(test)]
mod test {
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::thread;
    use std::time::Duration;

    use super::drain_loop;
    use crate::sample::Rb;
    use crate::sink::Sink;

    fn patterned(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn final_sweep_writes_published_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.count");
        let mut sink = Sink::open(&path).unwrap();

        let ring = patterned(4096);
        let head = AtomicU64::new(500);
        let mut rb = Rb::new(&ring, &head);

        // Already stopped: the loop body never runs, the final sweep still
        // drains what the producer published.
        let stop = AtomicBool::new(true);
        drain_loop(&mut rb, &mut sink, Duration::from_millis(1), &stop).unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), &ring[..500]);
    }

    #[test]
    fn loop_drains_until_stopped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.count");
        let mut sink = Sink::open(&path).unwrap();

        let ring = patterned(1024);
        let head = AtomicU64::new(0);
        let stop = AtomicBool::new(false);
        let mut rb = Rb::new(&ring, &head);

        thread::scope(|s| {
            s.spawn(|| {
                for step in 1..=4u64 {
                    head.store(step * 256, Ordering::Release);
                    thread::sleep(Duration::from_millis(20));
                }
                stop.store(true, Ordering::Relaxed);
            });
            drain_loop(&mut rb, &mut sink, Duration::from_millis(5), &stop).unwrap();
        });

        assert_eq!(std::fs::read(&path).unwrap(), ring);
        assert_eq!(rb.tail(), 1024);
    }
}
