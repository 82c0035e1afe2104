//! Recommendation entity

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use super::Recipe;

/// Resolution state of one option setting
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SettingState {
    #[default]
    Unresolved,
    Resolving,
    Resolved,
    Failed(String),
    /// Depends-on condition currently false; the setting has no value
    Hidden,
}

/// A recipe judged applicable to the project, plus its resolved settings.
#[derive(Debug, Clone)]
pub struct Recommendation {
    pub recipe: Arc<Recipe>,
    pub priority: i32,
    pub settings: BTreeMap<String, Value>,
    pub states: BTreeMap<String, SettingState>,
}

impl Recommendation {
    pub fn new(recipe: Arc<Recipe>) -> Self {
        let priority = recipe.priority;
        let states = recipe
            .option_settings
            .iter()
            .map(|s| (s.id.clone(), SettingState::Unresolved))
            .collect();
        Self {
            recipe,
            priority,
            settings: BTreeMap::new(),
            states,
        }
    }

    pub fn value(&self, setting_id: &str) -> Option<&Value> {
        self.settings.get(setting_id)
    }

    pub fn state(&self, setting_id: &str) -> SettingState {
        self.states.get(setting_id).cloned().unwrap_or_default()
    }

    /// Every setting is either resolved or hidden
    pub fn is_ready(&self) -> bool {
        self.states
            .values()
            .all(|s| matches!(s, SettingState::Resolved | SettingState::Hidden))
    }

    /// Settings that block materialization, with their state
    pub fn pending(&self) -> Vec<(String, SettingState)> {
        self.states
            .iter()
            .filter(|(_, s)| !matches!(s, SettingState::Resolved | SettingState::Hidden))
            .map(|(id, s)| (id.clone(), s.clone()))
            .collect()
    }
}
