//! Terminal prompts
//!
//! Confirmation and resource selection through dialoguer. Prompts are drawn on
//! stderr so stdout stays clean for command output.

use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Select};

use crate::domain::ports::{Confirmer, PickRequest, PickResponse, ResourcePicker, TypeHintError};
use crate::domain::value_objects::ResourceSelection;

pub struct DialoguerConfirmer;

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, prompt: &str, default: bool) -> bool {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt)
            .default(default)
            .interact()
            .unwrap_or(false)
    }
}

/// One line of the selection menu
#[derive(Debug, Clone, PartialEq, Eq)]
enum MenuItem {
    CreateNew,
    Existing(String),
    Nothing,
}

fn menu(request: &PickRequest<'_>) -> Vec<(MenuItem, String)> {
    let mut items = Vec::new();
    if request.allow_create {
        items.push((MenuItem::CreateNew, format!("Create new {}", request.kind)));
    }
    for resource in request.candidates {
        let label = if resource.name.is_empty() || resource.name == resource.id {
            resource.id.clone()
        } else {
            format!("{} ({})", resource.name, resource.id)
        };
        items.push((MenuItem::Existing(resource.id.clone()), label));
    }
    if request.allow_empty {
        items.push((MenuItem::Nothing, "None".to_string()));
    }
    items
}

fn default_index(items: &[(MenuItem, String)], current: Option<&ResourceSelection>) -> usize {
    let wanted = match current {
        Some(ResourceSelection::Existing(id)) => MenuItem::Existing(id.clone()),
        Some(ResourceSelection::CreateNew(_)) => MenuItem::CreateNew,
        Some(ResourceSelection::Empty) => MenuItem::Nothing,
        None => return 0,
    };
    items
        .iter()
        .position(|(item, _)| *item == wanted)
        .unwrap_or(0)
}

pub struct DialoguerPicker;

impl ResourcePicker for DialoguerPicker {
    fn pick(&self, request: &PickRequest<'_>) -> Result<PickResponse, TypeHintError> {
        let theme = ColorfulTheme::default();
        let items = menu(request);
        if items.is_empty() {
            return Err(TypeHintError::InvalidSelection(format!(
                "no existing {} found",
                request.kind
            )));
        }

        let labels: Vec<&str> = items.iter().map(|(_, label)| label.as_str()).collect();
        let choice = Select::with_theme(&theme)
            .with_prompt(request.setting.display_name())
            .items(&labels)
            .default(default_index(&items, request.current))
            .interact_opt()
            .map_err(|e| TypeHintError::InvalidSelection(e.to_string()))?
            .ok_or(TypeHintError::Cancelled)?;

        match &items[choice].0 {
            MenuItem::CreateNew => {
                let name: String = Input::with_theme(&theme)
                    .with_prompt(format!("Name for the new {}", request.kind))
                    .default(request.suggested_name.clone())
                    .interact_text()
                    .map_err(|e| TypeHintError::InvalidSelection(e.to_string()))?;
                Ok(PickResponse {
                    create_new: true,
                    existing: None,
                    new_name: Some(name),
                })
            }
            MenuItem::Existing(id) => Ok(PickResponse {
                create_new: false,
                existing: Some(id.clone()),
                new_name: None,
            }),
            MenuItem::Nothing => Ok(PickResponse::default()),
        }
    }
}
