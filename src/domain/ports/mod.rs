//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod confirmation;
pub mod deploy_events;
pub mod external_tool;
pub mod file_system;
pub mod recipe_repository;
pub mod resource_query;
pub mod settings_repository;
pub mod source_control;
pub mod type_hint;

pub use confirmation::{AssumeNo, AssumeYes, Confirmer};
pub use deploy_events::{DeployEvent, DeployEventSink, HandoffStep, NoopEventSink, OutputStream};
pub use external_tool::{ExternalTool, ToolError, ToolExit, ToolInvocation};
pub use file_system::{FileSystem, FsError, FsResult};
pub use recipe_repository::RecipeRepository;
pub use resource_query::{RemoteResource, ResourceKind, ResourceQueryError, ResourceQueryService};
pub use settings_repository::{SettingsRepository, SettingsStoreError, SettingsStoreResult};
pub use source_control::SourceControlProbe;
pub use type_hint::{
    PickRequest, PickResponse, ResourcePicker, TypeHintContext, TypeHintError, TypeHintHandler,
    TypeHintRegistry, TypeHintResponse,
};
