//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod capabilities;
mod deployment_status;
mod save_directory;
mod setting_value;

pub use capabilities::HostCapabilities;
pub use deployment_status::DeploymentStatus;
pub use save_directory::SaveCdkDirectory;
pub use setting_value::{OptionSettingValueType, ResourceSelection};
