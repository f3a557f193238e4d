//! Filesystem operations used by the application.

mod atomic;
mod io_copy;
mod util;

pub use atomic::{try_atomic_move, write_via_temp};
pub use io_copy::{BUF_SIZE, CopyResult, copy_stream};
