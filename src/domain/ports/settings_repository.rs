//! SettingsRepository port - persisted prior settings per project
//!
//! The store remembers which application, recipe and option values were last
//! used for a project so the next invocation starts from them.

use std::path::Path;

use crate::domain::entities::DeploymentRecord;

pub type SettingsStoreResult<T> = Result<T, SettingsStoreError>;

#[derive(Debug, thiserror::Error)]
pub enum SettingsStoreError {
    #[error("deployment record is corrupted: {0}")]
    InvalidFormat(String),

    #[error("could not lock the deployment store: {0}")]
    Locked(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub trait SettingsRepository: Send + Sync {
    /// Record for a project, if one was saved before
    fn load(&self, project_path: &Path) -> SettingsStoreResult<Option<DeploymentRecord>>;

    /// Insert or replace the record for `record.project_path`
    fn save(&self, record: &DeploymentRecord) -> SettingsStoreResult<()>;

    /// All saved records, most recently updated first
    fn list(&self) -> SettingsStoreResult<Vec<DeploymentRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_store_error_display() {
        let err = SettingsStoreError::InvalidFormat("expected value".to_string());
        assert!(err.to_string().contains("expected value"));
    }
}
