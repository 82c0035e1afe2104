//! File System Implementations
//!
//! Concrete implementations of the FileSystem port.

mod home;
mod local;

pub use home::{data_dir, stackwright_home_dir, DATA_DIR_NAME, STACKWRIGHT_TEST_HOME_VAR};
pub use local::{atomic_write, LocalFs};
