//! Source-control probe backed by `git status`

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;

use tracing::debug;
use wait_timeout::ChildExt;

use crate::domain::ports::SourceControlProbe;

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct GitProbe {
    program: String,
}

impl GitProbe {
    pub fn new() -> Self {
        Self::with_program("git")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceControlProbe for GitProbe {
    fn is_under_source_control(&self, dir: &Path) -> bool {
        let child = Command::new(&self.program)
            .arg("status")
            .arg("--porcelain")
            .current_dir(dir)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn();

        let mut child = match child {
            Ok(child) => child,
            Err(err) => {
                debug!("could not run {}: {}", self.program, err);
                return false;
            }
        };

        match child.wait_timeout(PROBE_TIMEOUT) {
            Ok(Some(status)) => status.success(),
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                debug!("source control probe timed out in {}", dir.display());
                false
            }
            Err(err) => {
                debug!("source control probe failed: {}", err);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_git_binary_means_not_controlled() {
        let dir = tempdir().unwrap();
        let probe = GitProbe::with_program("stackwright-no-such-git");
        assert!(!probe.is_under_source_control(dir.path()));
    }
}
