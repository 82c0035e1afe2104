//! SourceControlProbe port

use std::path::Path;

/// Answers whether a directory is inside a source-controlled work tree.
///
/// Probe failures (tool missing, timeout) count as "not under source control".
pub trait SourceControlProbe: Send + Sync {
    fn is_under_source_control(&self, dir: &Path) -> bool;
}
