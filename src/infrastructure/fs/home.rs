//! Home directory resolution with test isolation support.
//!
//! `dirs::home_dir()` ignores `HOME` on Windows, so integration tests could not
//! redirect it. Every Stackwright-internal path (deployment store, user config,
//! default recipe directory, deploy workspace) goes through
//! `stackwright_home_dir()` instead, which honors `STACKWRIGHT_TEST_HOME` first.

use std::path::PathBuf;

/// Environment variable for test isolation of home directory.
pub const STACKWRIGHT_TEST_HOME_VAR: &str = "STACKWRIGHT_TEST_HOME";

/// Name of the per-user data directory below home
pub const DATA_DIR_NAME: &str = ".stackwright";

/// Home directory for Stackwright-internal paths.
///
/// Returns `None` only when neither the override nor the system home resolves.
pub fn stackwright_home_dir() -> Option<PathBuf> {
    std::env::var_os(STACKWRIGHT_TEST_HOME_VAR)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// `~/.stackwright`
pub fn data_dir() -> Option<PathBuf> {
    stackwright_home_dir().map(|home| home.join(DATA_DIR_NAME))
}
