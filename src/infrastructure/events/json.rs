//! JSON Event Sink
//!
//! Outputs deploy events as NDJSON for CI/automation consumption.

use crate::domain::ports::{DeployEvent, DeployEventSink, OutputStream};
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: &'static str,
    /// Mutex to ensure thread-safe writes (tool output arrives from reader threads)
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for JsonEventSink {
    fn on_event(&self, event: DeployEvent) {
        let command = self.command;
        let json = match event {
            DeployEvent::Started {
                recipe_id,
                destination,
            } => json!({
                "event": "start",
                "command": command,
                "recipe": recipe_id,
                "destination": destination.display().to_string(),
            }),

            DeployEvent::FileWritten { path } => json!({
                "event": "file_written",
                "command": command,
                "path": path.display().to_string(),
            }),

            DeployEvent::SettingsWritten { path } => json!({
                "event": "settings_written",
                "command": command,
                "path": path.display().to_string(),
            }),

            DeployEvent::SnapshotWritten { path } => json!({
                "event": "snapshot_written",
                "command": command,
                "path": path.display().to_string(),
            }),

            DeployEvent::StepStarted { step, command: line } => json!({
                "event": "step_start",
                "command": command,
                "step": step.as_str(),
                "invocation": line,
            }),

            DeployEvent::ToolOutput { step, stream, line } => json!({
                "event": "tool_output",
                "command": command,
                "step": step.as_str(),
                "stream": match stream {
                    OutputStream::Stdout => "stdout",
                    OutputStream::Stderr => "stderr",
                },
                "line": line,
            }),

            DeployEvent::StepFinished { step, code } => json!({
                "event": "step_complete",
                "command": command,
                "step": step.as_str(),
                "exit_code": code,
            }),

            DeployEvent::StatusChanged { status } => json!({
                "event": "status",
                "command": command,
                "status": status.to_string(),
            }),

            DeployEvent::Completed {
                destination,
                status,
            } => json!({
                "event": "complete",
                "command": command,
                "destination": destination.display().to_string(),
                "status": status.to_string(),
            }),
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true
    }
}
