use std::sync::LazyLock;

pub mod bindings;
pub mod syscall;

pub static PAGE_SIZE: LazyLock<usize> = LazyLock::new(|| {
    let name = libc::_SC_PAGE_SIZE;
    let size = unsafe { libc::sysconf(name) };
    size as _
});

pub type Attr = bindings::PerfEventAttr;
pub type Metadata = bindings::PerfEventMmapPage;
