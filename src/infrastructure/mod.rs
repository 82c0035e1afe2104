//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file system, atomic writes, data directory
//! - `project/` - Project file analysis
//! - `repositories/` - Recipe catalog and persisted deployment settings
//! - `resources/` - Remote resource queries (inventory file, retries)
//! - `type_hints/` - Built-in type hint handlers
//! - `prompts/` - Interactive and unattended confirmation/selection
//! - `tools/` - Handoff subprocess and source control probe
//! - `events/` - Console and NDJSON event sinks

pub mod capabilities;
pub mod events;
pub mod fs;
pub mod project;
pub mod prompts;
pub mod repositories;
pub mod resources;
pub mod tools;
pub mod type_hints;

// Re-export for convenience
pub use capabilities::detect_capabilities;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use fs::LocalFs;
pub use project::ProjectAnalyzer;
pub use repositories::{FsRecipeRepository, JsonSettingsRepository};
pub use tools::{GitProbe, ProcessTool};
pub use type_hints::default_type_hints;
