//! ExternalTool port - the synthesis/deploy subprocess
//!
//! The handoff orchestrator describes each step as a `ToolInvocation`; the
//! implementation spawns it and streams output lines to the event sink.

use std::path::PathBuf;
use std::time::Duration;

use super::deploy_events::{DeployEventSink, HandoffStep};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub step: HandoffStep,
    pub program: String,
    pub args: Vec<String>,
    pub working_dir: PathBuf,
    /// Added to the inherited environment
    pub env: Vec<(String, String)>,
    pub timeout: Option<Duration>,
}

impl ToolInvocation {
    /// Human-readable command line for logs and events
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn env_var(&self, key: &str) -> Option<&str> {
        self.env
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolExit {
    pub code: i32,
}

impl ToolExit {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("timed out after {0:?}")]
    TimedOut(Duration),

    #[error("interrupted")]
    Interrupted,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait ExternalTool: Send + Sync {
    fn run(
        &self,
        invocation: &ToolInvocation,
        sink: &dyn DeployEventSink,
    ) -> Result<ToolExit, ToolError>;
}
