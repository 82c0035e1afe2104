//! JSON prior-settings store
//!
//! One record per project under `~/.stackwright/deployments/<key>.json`, where
//! the key is the SHA-256 of the canonical project path. Writers hold an
//! exclusive `fs2` lock on `.lock` in the store directory; readers a shared one.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use sha2::{Digest, Sha256};
use tracing::warn;

use crate::domain::entities::DeploymentRecord;
use crate::domain::ports::{
    FileSystem, SettingsRepository, SettingsStoreError, SettingsStoreResult,
};
use crate::infrastructure::fs::LocalFs;

const LOCK_FILE: &str = ".lock";

pub struct JsonSettingsRepository {
    root: PathBuf,
    fs: LocalFs,
}

impl JsonSettingsRepository {
    /// Store rooted at `root` (normally `~/.stackwright/deployments`)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fs: LocalFs::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File holding the record for `project_path`
    pub fn record_path(&self, project_path: &Path) -> PathBuf {
        self.root.join(format!("{}.json", store_key(project_path)))
    }

    fn lock(&self, exclusive: bool) -> SettingsStoreResult<Option<File>> {
        if !exclusive && !self.root.is_dir() {
            return Ok(None);
        }
        std::fs::create_dir_all(&self.root)?;
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.root.join(LOCK_FILE))?;
        let locked = if exclusive {
            FileExt::lock_exclusive(&file)
        } else {
            FileExt::lock_shared(&file)
        };
        locked.map_err(|e| SettingsStoreError::Locked(e.to_string()))?;
        Ok(Some(file))
    }

    fn read_record(&self, path: &Path) -> SettingsStoreResult<DeploymentRecord> {
        let content = self.fs.read(path)?;
        serde_json::from_str(&content)
            .map_err(|e| SettingsStoreError::InvalidFormat(format!("{}: {}", path.display(), e)))
    }
}

impl SettingsRepository for JsonSettingsRepository {
    fn load(&self, project_path: &Path) -> SettingsStoreResult<Option<DeploymentRecord>> {
        let path = self.record_path(project_path);
        let _guard = self.lock(false)?;
        if !self.fs.exists(&path) {
            return Ok(None);
        }
        self.read_record(&path).map(Some)
    }

    fn save(&self, record: &DeploymentRecord) -> SettingsStoreResult<()> {
        let path = self.record_path(&record.project_path);
        let content = serde_json::to_string_pretty(record)
            .map_err(|e| SettingsStoreError::InvalidFormat(e.to_string()))?;

        let guard = self.lock(true)?;
        let written = self.fs.write(&path, &content);
        if let Some(file) = guard {
            let _ = FileExt::unlock(&file);
        }
        written.map_err(Into::into)
    }

    fn list(&self) -> SettingsStoreResult<Vec<DeploymentRecord>> {
        let _guard = self.lock(false)?;
        if !self.fs.is_dir(&self.root) {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for path in self.fs.list_dir(&self.root)? {
            if !path.extension().is_some_and(|ext| ext == "json") {
                continue;
            }
            match self.read_record(&path) {
                Ok(record) => records.push(record),
                Err(err) => warn!("ignoring unreadable deployment record: {}", err),
            }
        }
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }
}

impl From<crate::domain::ports::FsError> for SettingsStoreError {
    fn from(err: crate::domain::ports::FsError) -> Self {
        SettingsStoreError::Io(err.into())
    }
}

/// SHA-256 of the canonical project path, hex encoded
pub fn store_key(project_path: &Path) -> String {
    let canonical = std::fs::canonicalize(project_path).unwrap_or_else(|_| project_path.to_path_buf());
    let digest = Sha256::digest(canonical.to_string_lossy().as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}
