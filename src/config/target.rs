use std::ffi::OsStr;
use std::io::Result;
use std::process::Command;

/// Subject of measurement: a process identifier, either supplied directly or
/// captured from a freshly spawned child.
#[derive(Clone, Copy, Debug)]
pub struct Target {
    pid: i32,
}

impl Target {
    /// Attach to an already-running process. No process management happens
    /// in this mode.
    pub fn attach(pid: u32) -> Self {
        Self { pid: pid as _ }
    }

    /// Spawn `program` with `args`; the child becomes the target.
    ///
    /// The monitor never waits on the child, it keeps draining samples until
    /// explicitly stopped. Spawn failure is fatal and not retried.
    pub fn spawn<S, I, A>(program: S, args: I) -> Result<Self>
    where
        S: AsRef<OsStr>,
        I: IntoIterator<Item = A>,
        A: AsRef<OsStr>,
    {
        let child = Command::new(program).args(args).spawn()?;
        Ok(Self {
            pid: child.id() as _,
        })
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }
}
