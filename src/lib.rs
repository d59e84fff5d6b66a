//! Sample one raw hardware performance counter for a process and record the
//! kernel's raw sample stream to a file.
//!
//! The kernel is the producer here: once a counter is opened in frequency
//! sampling mode and its ring buffer is mapped, the kernel appends sample
//! records to the ring and publishes them by advancing `data_head`. This
//! crate is the consumer side of that single-producer/single-consumer pair.
//! [`Rb::drain`][sample::rb::Rb::drain] observes `data_head` with acquire
//! ordering, linearizes the new bytes (splitting the copy at the wraparound
//! point) and hands them to an append-only [`Sink`][sink::Sink].
//!
//! ## Example
//!
//! Attach to pid 1234 and record raw samples until interrupted:
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::atomic::AtomicBool;
//! use std::time::Duration;
//!
//! use event_count::config::{SampleConfig, Target};
//! use event_count::count::Counter;
//! use event_count::{monitor, sink::Sink};
//!
//! let config = SampleConfig::new(0x3c, 0x00, 1000)?;
//! let target = Target::attach(1234);
//!
//! let counter = Counter::new(&config, target)?;
//! let sampler = counter.sampler(512 * 1024)?;
//! let mut sink = Sink::open("events.count")?;
//!
//! let stop = AtomicBool::new(false);
//! let mut rb = sampler.consumer();
//! monitor::drain_loop(&mut rb, &mut sink, Duration::from_millis(120), &stop)?;
//! # Ok(())
//! # }
//! ```
//!
//! Only Linux is supported, since `perf_event_open` is a Linux system call.

pub mod config;
pub mod count;
mod ffi;
pub mod monitor;
pub mod sample;
pub mod sink;
