//! Type hint port
//!
//! Some option settings get their value from a dynamic lookup (e.g. "pick an
//! existing ECS cluster or name a new one"). A handler is registered per hint
//! id; the settings resolver invokes it when the setting has no explicit
//! override.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use super::resource_query::{RemoteResource, ResourceKind, ResourceQueryError};
use crate::domain::entities::{OptionSettingItem, OrchestratorSession, Recommendation};
use crate::domain::value_objects::ResourceSelection;

#[derive(Debug, thiserror::Error)]
pub enum TypeHintError {
    #[error(transparent)]
    Query(#[from] ResourceQueryError),

    #[error("{0}")]
    InvalidSelection(String),

    #[error("selection cancelled")]
    Cancelled,
}

/// Everything a handler may look at
pub struct TypeHintContext<'a> {
    pub recommendation: &'a Recommendation,
    pub setting: &'a OptionSettingItem,
    pub session: &'a OrchestratorSession,
    /// Value to pre-select (prior or default value)
    pub current: Option<&'a Value>,
}

/// Handler output
#[derive(Debug, Clone, PartialEq)]
pub enum TypeHintResponse {
    /// Choose-or-create outcome
    Selection(ResourceSelection),
    /// Plain value (e.g. the id of a selected existing resource)
    Value(Value),
}

impl TypeHintResponse {
    pub fn into_value(self) -> Value {
        match self {
            TypeHintResponse::Selection(selection) => selection.to_value(),
            TypeHintResponse::Value(value) => value,
        }
    }
}

pub trait TypeHintHandler: Send + Sync {
    fn execute(&self, ctx: &TypeHintContext<'_>) -> Result<TypeHintResponse, TypeHintError>;
}

/// Handlers keyed by hint id
#[derive(Clone, Default)]
pub struct TypeHintRegistry {
    handlers: HashMap<String, Arc<dyn TypeHintHandler>>,
}

impl TypeHintRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, hint: impl Into<String>, handler: Arc<dyn TypeHintHandler>) {
        self.handlers.insert(hint.into(), handler);
    }

    pub fn with(mut self, hint: impl Into<String>, handler: Arc<dyn TypeHintHandler>) -> Self {
        self.register(hint, handler);
        self
    }

    pub fn get(&self, hint: &str) -> Option<&Arc<dyn TypeHintHandler>> {
        self.handlers.get(hint)
    }

    pub fn hints(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

impl std::fmt::Debug for TypeHintRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut hints: Vec<&str> = self.hints().collect();
        hints.sort_unstable();
        f.debug_struct("TypeHintRegistry")
            .field("hints", &hints)
            .finish()
    }
}

/// Prompt shown to the user by a resource-backed hint
pub struct PickRequest<'a> {
    pub setting: &'a OptionSettingItem,
    pub kind: ResourceKind,
    pub candidates: &'a [RemoteResource],
    /// Offer "create new" alongside the existing resources
    pub allow_create: bool,
    pub allow_empty: bool,
    /// Pre-selected choice when re-resolving
    pub current: Option<&'a ResourceSelection>,
    /// Name proposed for a new resource
    pub suggested_name: String,
}

/// Raw answer; blank fields are normalized by the handler
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickResponse {
    pub create_new: bool,
    pub existing: Option<String>,
    pub new_name: Option<String>,
}

/// Prompt I/O for resource selection
pub trait ResourcePicker: Send + Sync {
    fn pick(&self, request: &PickRequest<'_>) -> Result<PickResponse, TypeHintError>;
}
