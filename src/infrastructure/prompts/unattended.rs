//! Non-interactive resource selection
//!
//! Used with `--yes` or when stdin is not a terminal. Keeps the current value
//! when there is one, otherwise takes the only sensible default or fails with
//! a hint to pass `--set`.

use crate::domain::ports::{PickRequest, PickResponse, ResourcePicker, TypeHintError};
use crate::domain::value_objects::ResourceSelection;

pub struct UnattendedPicker;

impl ResourcePicker for UnattendedPicker {
    fn pick(&self, request: &PickRequest<'_>) -> Result<PickResponse, TypeHintError> {
        match request.current {
            Some(ResourceSelection::Existing(id)) => {
                return Ok(PickResponse {
                    create_new: false,
                    existing: Some(id.clone()),
                    new_name: None,
                })
            }
            Some(ResourceSelection::CreateNew(name)) if request.allow_create => {
                return Ok(PickResponse {
                    create_new: true,
                    existing: None,
                    new_name: Some(name.clone()),
                })
            }
            _ => {}
        }

        if request.allow_create && !request.suggested_name.trim().is_empty() {
            return Ok(PickResponse {
                create_new: true,
                existing: None,
                new_name: Some(request.suggested_name.clone()),
            });
        }
        if let [only] = request.candidates {
            return Ok(PickResponse {
                create_new: false,
                existing: Some(only.id.clone()),
                new_name: None,
            });
        }
        if request.allow_empty {
            return Ok(PickResponse::default());
        }

        Err(TypeHintError::InvalidSelection(format!(
            "{} {} candidates found; pass --set {}=<id> to choose one",
            request.candidates.len(),
            request.kind,
            request.setting.id
        )))
    }
}
