//! "Choose an existing resource or name a new one" type hint
//!
//! Used for resources a deployment can create itself (ECS clusters, Beanstalk
//! applications, IAM roles). The answer is normalized so exactly one of the
//! existing reference and the new name survives.

use std::sync::Arc;

use crate::domain::ports::{
    PickRequest, ResourceKind, ResourcePicker, ResourceQueryService, TypeHintContext,
    TypeHintError, TypeHintHandler, TypeHintResponse,
};
use crate::domain::value_objects::ResourceSelection;

pub struct ChooseOrCreateHint {
    kind: ResourceKind,
    query: Arc<dyn ResourceQueryService>,
    picker: Arc<dyn ResourcePicker>,
}

impl ChooseOrCreateHint {
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

impl TypeHintHandler for ChooseOrCreateHint {
    fn execute(&self, ctx: &TypeHintContext<'_>) -> Result<TypeHintResponse, TypeHintError> {
        let candidates = self.query.list(self.kind, &ctx.session.aws)?;
        let current = ctx.current.and_then(ResourceSelection::from_value);
        let suggested_name = match &current {
            Some(ResourceSelection::CreateNew(name)) => name.clone(),
            _ => ctx.session.stack_name(),
        };

        let response = self.picker.pick(&PickRequest {
            setting: ctx.setting,
            kind: self.kind,
            candidates: &candidates,
            allow_create: true,
            allow_empty: ctx.setting.allow_empty,
            current: current.as_ref(),
            suggested_name,
        })?;

        let selection = ResourceSelection::from_parts(
            response.create_new,
            response.existing.as_deref(),
            response.new_name.as_deref(),
        )
        .map_err(TypeHintError::InvalidSelection)?;

        if selection.is_empty() && !ctx.setting.allow_empty {
            return Err(TypeHintError::InvalidSelection(format!(
                "choose an existing {} or name a new one",
                self.kind
            )));
        }
        Ok(TypeHintResponse::Selection(selection))
    }
}
