//! Console Event Sink
//!
//! Human-readable progress on stderr. Tool output is echoed line by line as it
//! arrives so long deployments show progress.

use std::io::{self, Write};
use std::sync::Mutex;

use tracing::info;

use crate::domain::ports::{DeployEvent, DeployEventSink};

pub struct ConsoleEventSink {
    verbose: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleEventSink {
    pub fn stderr(verbose: bool) -> Self {
        Self::with_writer(verbose, io::stderr())
    }

    pub fn with_writer<W: Write + Send + 'static>(verbose: bool, writer: W) -> Self {
        Self {
            verbose,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn line(&self, text: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", text);
            let _ = writer.flush();
        }
    }
}

impl DeployEventSink for ConsoleEventSink {
    fn on_event(&self, event: DeployEvent) {
        match event {
            DeployEvent::Started {
                recipe_id,
                destination,
            } => self.line(&format!(
                "Generating deployment project for {} in {}",
                recipe_id,
                destination.display()
            )),
            DeployEvent::FileWritten { path } => {
                if self.verbose {
                    self.line(&format!("  wrote {}", path.display()));
                }
            }
            DeployEvent::SettingsWritten { path } | DeployEvent::SnapshotWritten { path } => {
                if self.verbose {
                    self.line(&format!("  wrote {}", path.display()));
                }
            }
            DeployEvent::StepStarted { step, command } => {
                self.line(&format!("Running {} step: {}", step, command))
            }
            DeployEvent::ToolOutput { step, line, .. } => {
                info!(step = %step, "{}", line);
                self.line(&format!("  {}", line));
            }
            DeployEvent::StepFinished { step, code } => {
                if code != 0 {
                    self.line(&format!("{} step exited with code {}", step, code));
                }
            }
            DeployEvent::StatusChanged { status } => {
                if self.verbose {
                    self.line(&format!("Deployment status: {}", status));
                }
            }
            DeployEvent::Completed {
                destination,
                status,
            } => self.line(&format!(
                "Deployment project at {} ({})",
                destination.display(),
                status
            )),
        }
    }

    fn wants_detailed_events(&self) -> bool {
        self.verbose
    }
}
