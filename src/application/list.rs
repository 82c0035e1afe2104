//! List Use Case
//!
//! Reads the prior-settings store and returns the persisted deployments,
//! most recent first.

use crate::domain::entities::DeploymentRecord;
use crate::domain::ports::SettingsRepository;
use crate::error::StackwrightResult;

pub struct ListUseCase<S: SettingsRepository> {
    store: S,
}

impl<S: SettingsRepository> ListUseCase<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn execute(&self) -> StackwrightResult<Vec<DeploymentRecord>> {
        let mut records = self.store.list()?;
        records.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(records)
    }
}
