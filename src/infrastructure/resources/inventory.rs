//! Offline resource query backed by a JSON inventory file
//!
//! ```json
//! { "EcsCluster": [ { "id": "arn:aws:ecs:...:cluster/web", "name": "web" } ],
//!   "Vpc": [ { "id": "vpc-0abc" } ] }
//! ```
//!
//! A missing file is an empty inventory.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::domain::entities::AwsContext;
use crate::domain::ports::{RemoteResource, ResourceKind, ResourceQueryError, ResourceQueryService};

#[derive(Debug, Clone)]
pub struct InventoryResourceQuery {
    path: Option<PathBuf>,
}

impl InventoryResourceQuery {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    fn load(&self) -> Result<BTreeMap<String, Vec<RemoteResource>>, ResourceQueryError> {
        let Some(path) = &self.path else {
            return Ok(BTreeMap::new());
        };
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => {
                return Err(ResourceQueryError::Transient(format!(
                    "{}: {}",
                    path.display(),
                    err
                )))
            }
        };
        serde_json::from_str(&content).map_err(|e| {
            ResourceQueryError::Failed(format!("invalid inventory {}: {}", path.display(), e))
        })
    }
}

impl ResourceQueryService for InventoryResourceQuery {
    fn list(
        &self,
        kind: ResourceKind,
        _aws: &AwsContext,
    ) -> Result<Vec<RemoteResource>, ResourceQueryError> {
        Ok(self.load()?.remove(kind.as_str()).unwrap_or_default())
    }
}
