//! Host capability detection
//!
//! A capability is present when its executable is found on the tool PATH.

use std::ffi::OsStr;
use std::path::PathBuf;

use tracing::debug;

use crate::domain::value_objects::HostCapabilities;

/// Capability name and the executable that provides it
pub const PROBED_TOOLS: &[(&str, &str)] = &[
    ("docker", "docker"),
    ("node", "node"),
    ("dotnet", "dotnet"),
    ("git", "git"),
    ("cdk", "cdk"),
];

/// Probe `path_var` (normally `$PATH`) for every known tool
pub fn detect_capabilities(path_var: Option<&OsStr>) -> HostCapabilities {
    let mut caps = HostCapabilities::new();
    let Some(path_var) = path_var.filter(|p| !p.is_empty()) else {
        return caps;
    };
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    for (capability, program) in PROBED_TOOLS {
        match which::which_in(program, Some(path_var), &cwd) {
            Ok(found) => {
                debug!(capability = *capability, path = %found.display(), "found tool");
                caps.insert(capability);
            }
            Err(_) => debug!(capability = *capability, "tool not on PATH"),
        }
    }
    caps
}
