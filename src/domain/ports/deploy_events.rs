//! Deploy Event Port
//!
//! Provides an observable interface for generate and deploy operations.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

use crate::domain::value_objects::DeploymentStatus;

/// Step of the external tool handoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandoffStep {
    Bootstrap,
    Deploy,
}

impl HandoffStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            HandoffStep::Bootstrap => "bootstrap",
            HandoffStep::Deploy => "deploy",
        }
    }
}

impl std::fmt::Display for HandoffStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stream a tool output line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Event emitted during generate/deploy operations
#[derive(Debug, Clone)]
pub enum DeployEvent {
    /// Materialization started
    Started {
        recipe_id: String,
        destination: PathBuf,
    },

    /// Template or metadata file written
    FileWritten { path: PathBuf },

    /// Settings payload written
    SettingsWritten { path: PathBuf },

    /// Recipe snapshot written
    SnapshotWritten { path: PathBuf },

    /// Handoff step started
    StepStarted { step: HandoffStep, command: String },

    /// One line of tool output, forwarded as it arrives
    ToolOutput {
        step: HandoffStep,
        stream: OutputStream,
        line: String,
    },

    /// Handoff step finished
    StepFinished { step: HandoffStep, code: i32 },

    /// Deployment status transition
    StatusChanged { status: DeploymentStatus },

    /// Materialization (and optional handoff) completed
    Completed {
        destination: PathBuf,
        status: DeploymentStatus,
    },
}

/// Trait for receiving deploy events
///
/// Implementations can be:
/// - ConsoleEventSink: Progress display in terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: Silent operation
pub trait DeployEventSink: Send + Sync {
    /// Handle a deploy event
    fn on_event(&self, event: DeployEvent);

    /// Check if this sink wants detailed events (e.g., per-file, per-line)
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl DeployEventSink for NoopEventSink {
    fn on_event(&self, _event: DeployEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
