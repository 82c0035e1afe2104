//! "Select an existing resource" type hint
//!
//! For resources a deployment only references (VPCs, key pairs). The stored
//! value is the resource id, or `null` when the setting allows no selection.

use std::sync::Arc;

use serde_json::Value;

use crate::domain::ports::{
    PickRequest, ResourceKind, ResourcePicker, ResourceQueryService, TypeHintContext,
    TypeHintError, TypeHintHandler, TypeHintResponse,
};
use crate::domain::value_objects::ResourceSelection;

pub struct SelectExistingHint {
    kind: ResourceKind,
    query: Arc<dyn ResourceQueryService>,
    picker: Arc<dyn ResourcePicker>,
}

impl SelectExistingHint {
    pub fn new(
        kind: ResourceKind,
        query: Arc<dyn ResourceQueryService>,
        picker: Arc<dyn ResourcePicker>,
    ) -> Self {
        Self {
            kind,
            query,
            picker,
        }
    }
}

impl TypeHintHandler for SelectExistingHint {
    fn execute(&self, ctx: &TypeHintContext<'_>) -> Result<TypeHintResponse, TypeHintError> {
        let candidates = self.query.list(self.kind, &ctx.session.aws)?;
        let current = ctx
            .current
            .and_then(Value::as_str)
            .map(|id| ResourceSelection::Existing(id.to_string()));

        let response = self.picker.pick(&PickRequest {
            setting: ctx.setting,
            kind: self.kind,
            candidates: &candidates,
            allow_create: false,
            allow_empty: ctx.setting.allow_empty,
            current: current.as_ref(),
            suggested_name: String::new(),
        })?;

        if response.create_new {
            return Err(TypeHintError::InvalidSelection(format!(
                "a new {} cannot be created here; select an existing one",
                self.kind
            )));
        }

        match response.existing.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(id) => Ok(TypeHintResponse::Value(Value::String(id.to_string()))),
            None if ctx.setting.allow_empty => Ok(TypeHintResponse::Value(Value::Null)),
            None => Err(TypeHintError::InvalidSelection(format!(
                "select an existing {}",
                self.kind
            ))),
        }
    }
}
