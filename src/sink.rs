use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Result, Write};
use std::path::Path;

/// Append-only destination for drained sample bytes.
///
/// Raw byte passthrough: no framing, no transformation. Diagnostics go to
/// the log, never into this file.
pub struct Sink {
    out: BufWriter<File>,
}

impl Sink {
    /// Opens (or creates) `path` for append.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// Writes the whole batch; anything short of the full byte count is an
    /// error. There is no retry, a half-written batch would corrupt the
    /// ordering of the stream.
    pub fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()
    }
}

#[cfg(test)]
mod test {
    use super::Sink;

    #[test]
    fn batches_are_appended_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.count");

        let mut sink = Sink::open(&path).unwrap();
        sink.write(b"abc").unwrap();
        sink.write(b"def").unwrap();
        sink.flush().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abcdef");

        // Reopening appends rather than truncating.
        let mut sink = Sink::open(&path).unwrap();
        sink.write(b"ghi").unwrap();
        sink.flush().unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"abcdefghi");
    }
}
