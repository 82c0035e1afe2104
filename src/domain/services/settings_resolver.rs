//! Option settings resolution
//!
//! Resolves the effective value of every option setting of a recommendation:
//! - settings are visited in dependency order (a setting after everything its
//!   depends-on list names)
//! - a setting whose depends-on condition is false is `Hidden` and has no value
//! - precedence is explicit override, then prior value, then recipe default
//! - type-hinted settings without an override ask their handler, with the
//!   prior/default value pre-selected
//! - validators run on the final value; nothing is coerced

use std::collections::{BTreeMap, HashSet};

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::entities::{OptionSettingItem, OrchestratorSession, Recipe, Recommendation, SettingState};
use crate::domain::ports::{TypeHintContext, TypeHintError, TypeHintRegistry};
use crate::domain::value_objects::ResourceSelection;
use crate::error::{StackwrightError, StackwrightResult};

/// Placeholder in string defaults replaced by the cloud application name
pub const STACK_NAME_PLACEHOLDER: &str = "{StackName}";

/// Caller-supplied values that take part in precedence
#[derive(Debug, Clone, Default)]
pub struct SettingInputs {
    /// Raw `KEY=VALUE` overrides, parsed against the setting's type
    pub overrides: BTreeMap<String, String>,
    /// Values persisted for the same application and recipe
    pub prior: BTreeMap<String, Value>,
}

impl SettingInputs {
    pub fn with_override(mut self, id: impl Into<String>, raw: impl Into<String>) -> Self {
        self.overrides.insert(id.into(), raw.into());
        self
    }

    pub fn with_prior(mut self, id: impl Into<String>, value: Value) -> Self {
        self.prior.insert(id.into(), value);
        self
    }
}

/// Indices of `recipe.option_settings` in resolution order.
///
/// Declaration order is kept wherever dependencies allow it. Unknown
/// references and cycles make the recipe invalid.
pub fn dependency_order(recipe: &Recipe) -> StackwrightResult<Vec<usize>> {
    let settings = &recipe.option_settings;
    let index: BTreeMap<&str, usize> = settings
        .iter()
        .enumerate()
        .map(|(i, s)| (s.id.as_str(), i))
        .collect();

    let mut deps: Vec<Vec<usize>> = Vec::with_capacity(settings.len());
    for setting in settings {
        let mut own = Vec::new();
        for dep in &setting.depends_on {
            let Some(&target) = index.get(dep.id.as_str()) else {
                return Err(invalid_recipe(
                    recipe,
                    format!(
                        "option setting '{}' depends on unknown setting '{}'",
                        setting.id, dep.id
                    ),
                ));
            };
            own.push(target);
        }
        deps.push(own);
    }

    let mut placed = vec![false; settings.len()];
    let mut order = Vec::with_capacity(settings.len());
    while order.len() < settings.len() {
        let next = (0..settings.len())
            .find(|&i| !placed[i] && deps[i].iter().all(|&d| placed[d]));
        match next {
            Some(i) => {
                placed[i] = true;
                order.push(i);
            }
            None => {
                let stuck: Vec<&str> = (0..settings.len())
                    .filter(|&i| !placed[i])
                    .map(|i| settings[i].id.as_str())
                    .collect();
                return Err(invalid_recipe(
                    recipe,
                    format!(
                        "option settings have a dependency cycle: {}",
                        stuck.join(", ")
                    ),
                ));
            }
        }
    }
    Ok(order)
}

/// Every depends-on pair matches the current value of the named setting
pub fn is_visible(setting: &OptionSettingItem, values: &BTreeMap<String, Value>) -> bool {
    setting
        .depends_on
        .iter()
        .all(|dep| values.get(&dep.id) == Some(&dep.value))
}

/// Replace `{StackName}` in every string of a default value
pub fn substitute_stack_name(value: &Value, stack_name: &str) -> Value {
    match value {
        Value::String(s) => Value::String(s.replace(STACK_NAME_PLACEHOLDER, stack_name)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .map(|v| substitute_stack_name(v, stack_name))
                .collect(),
        ),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(k, v)| (k.clone(), substitute_stack_name(v, stack_name)))
                .collect(),
        ),
        other => other.clone(),
    }
}

pub struct SettingsResolver<'a> {
    session: &'a OrchestratorSession,
    hints: &'a TypeHintRegistry,
}

impl<'a> SettingsResolver<'a> {
    pub fn new(session: &'a OrchestratorSession, hints: &'a TypeHintRegistry) -> Self {
        Self { session, hints }
    }

    /// Resolve every setting of the recommendation.
    ///
    /// Stops at the first failing setting; its state is `Failed` and later
    /// settings stay `Unresolved`.
    pub fn resolve_all(
        &self,
        rec: &mut Recommendation,
        inputs: &SettingInputs,
    ) -> StackwrightResult<()> {
        check_override_ids(&rec.recipe, inputs)?;
        for state in rec.states.values_mut() {
            if !matches!(state, SettingState::Resolved) {
                *state = SettingState::Unresolved;
            }
        }
        self.refresh(rec, inputs)
    }

    /// Re-resolve one setting, then refresh the visibility of its dependents.
    pub fn resolve_one(
        &self,
        rec: &mut Recommendation,
        setting_id: &str,
        inputs: &SettingInputs,
    ) -> StackwrightResult<Value> {
        let recipe = rec.recipe.clone();
        let setting = recipe
            .setting(setting_id)
            .ok_or_else(|| unknown_setting(&recipe, setting_id))?;

        if !is_visible(setting, &rec.settings) {
            rec.settings.remove(setting_id);
            rec.states.insert(setting_id.to_string(), SettingState::Hidden);
            self.refresh(rec, inputs)?;
            return Ok(Value::Null);
        }

        self.resolve_setting(rec, setting, inputs)?;
        self.refresh(rec, inputs)?;
        Ok(rec.settings.get(setting_id).cloned().unwrap_or(Value::Null))
    }

    /// Assign a value directly (e.g. an interactive edit), validate it and
    /// refresh dependents.
    pub fn set_value(
        &self,
        rec: &mut Recommendation,
        setting_id: &str,
        value: Value,
        inputs: &SettingInputs,
    ) -> StackwrightResult<()> {
        let recipe = rec.recipe.clone();
        let setting = recipe
            .setting(setting_id)
            .ok_or_else(|| unknown_setting(&recipe, setting_id))?;

        let value = check_value(setting, value)?;
        rec.settings.insert(setting_id.to_string(), value);
        rec.states
            .insert(setting_id.to_string(), SettingState::Resolved);
        self.refresh(rec, inputs)
    }

    /// Walk settings in dependency order: hide what became invisible, resolve
    /// what is visible and not yet resolved.
    fn refresh(&self, rec: &mut Recommendation, inputs: &SettingInputs) -> StackwrightResult<()> {
        let recipe = rec.recipe.clone();
        for idx in dependency_order(&recipe)? {
            let setting = &recipe.option_settings[idx];
            if !is_visible(setting, &rec.settings) {
                if rec.settings.remove(&setting.id).is_some() {
                    debug!(setting = %setting.id, "setting hidden by its dependencies");
                }
                rec.states.insert(setting.id.clone(), SettingState::Hidden);
                continue;
            }
            if matches!(rec.state(&setting.id), SettingState::Resolved) {
                continue;
            }
            self.resolve_setting(rec, setting, inputs)?;
        }
        Ok(())
    }

    fn resolve_setting(
        &self,
        rec: &mut Recommendation,
        setting: &OptionSettingItem,
        inputs: &SettingInputs,
    ) -> StackwrightResult<()> {
        rec.states
            .insert(setting.id.clone(), SettingState::Resolving);
        match self.determine(rec, setting, inputs) {
            Ok(value) => {
                debug!(setting = %setting.id, value = %value, "resolved option setting");
                rec.settings.insert(setting.id.clone(), value);
                rec.states.insert(setting.id.clone(), SettingState::Resolved);
                Ok(())
            }
            Err(err) => {
                rec.settings.remove(&setting.id);
                rec.states
                    .insert(setting.id.clone(), SettingState::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    fn determine(
        &self,
        rec: &Recommendation,
        setting: &OptionSettingItem,
        inputs: &SettingInputs,
    ) -> StackwrightResult<Value> {
        if let Some(raw) = inputs.overrides.get(&setting.id) {
            let value = setting
                .value_type
                .parse_input(raw)
                .map_err(|reason| validation_failed(setting, reason))?;
            return check_value(setting, value);
        }

        let candidate = self.candidate(setting, inputs);

        let Some(hint) = setting.type_hint.as_deref() else {
            return check_value(setting, candidate);
        };
        let Some(handler) = self.hints.get(hint) else {
            warn!(
                setting = %setting.id,
                hint,
                "no handler registered for type hint; using the default value"
            );
            return check_value(setting, candidate);
        };

        let ctx = TypeHintContext {
            recommendation: rec,
            setting,
            session: self.session,
            current: (!candidate.is_null()).then_some(&candidate),
        };
        let value = handler
            .execute(&ctx)
            .map_err(|err| hint_error(setting, err))?
            .into_value();
        check_value(setting, value)
    }

    /// Prior value when it still fits the declared type, else the default
    fn candidate(&self, setting: &OptionSettingItem, inputs: &SettingInputs) -> Value {
        if let Some(prior) = inputs.prior.get(&setting.id) {
            if setting.value_type.accepts(prior) {
                return prior.clone();
            }
            debug!(
                setting = %setting.id,
                "prior value no longer matches the setting type; using the default"
            );
        }
        substitute_stack_name(&setting.default_value, &self.session.stack_name())
    }
}

/// Type check, choose-or-create normalization and validators
pub fn check_value(setting: &OptionSettingItem, value: Value) -> StackwrightResult<Value> {
    if !setting.value_type.accepts(&value) {
        return Err(validation_failed(
            setting,
            format!("expected a value of type {}, got {}", setting.value_type.as_str(), value),
        ));
    }

    let value = if setting.type_hint.is_some() {
        normalize_selection(setting, value)?
    } else {
        value
    };

    for validator in &setting.validators {
        validator
            .validate(&value)
            .map_err(|reason| validation_failed(setting, reason))?;
    }
    Ok(value)
}

fn normalize_selection(setting: &OptionSettingItem, value: Value) -> StackwrightResult<Value> {
    let selection_shaped = value
        .as_object()
        .is_some_and(|map| map.contains_key(ResourceSelection::CREATE_NEW_KEY));

    if selection_shaped {
        let selection = ResourceSelection::from_value(&value).ok_or_else(|| {
            validation_failed(
                setting,
                "a selection must name either an existing resource or a new resource".to_string(),
            )
        })?;
        if selection.is_empty() && !setting.allow_empty {
            return Err(validation_failed(setting, "a selection is required".to_string()));
        }
        return Ok(selection.to_value());
    }

    if value.is_null() && !setting.allow_empty {
        return Err(validation_failed(setting, "a selection is required".to_string()));
    }
    Ok(value)
}

fn check_override_ids(recipe: &Recipe, inputs: &SettingInputs) -> StackwrightResult<()> {
    let known: HashSet<&str> = recipe.option_settings.iter().map(|s| s.id.as_str()).collect();
    match inputs.overrides.keys().find(|id| !known.contains(id.as_str())) {
        Some(id) => Err(unknown_setting(recipe, id)),
        None => Ok(()),
    }
}

fn hint_error(setting: &OptionSettingItem, err: TypeHintError) -> StackwrightError {
    match err {
        TypeHintError::Query(err) => StackwrightError::ResourceQueryFailed {
            setting_id: setting.id.clone(),
            message: err.to_string(),
        },
        TypeHintError::InvalidSelection(reason) => validation_failed(setting, reason),
        TypeHintError::Cancelled => StackwrightError::Aborted,
    }
}

fn validation_failed(setting: &OptionSettingItem, reason: String) -> StackwrightError {
    StackwrightError::SettingValidationFailed {
        setting_id: setting.id.clone(),
        reason,
    }
}

fn unknown_setting(recipe: &Recipe, setting_id: &str) -> StackwrightError {
    StackwrightError::UnknownSetting {
        setting_id: setting_id.to_string(),
        recipe_id: recipe.id.clone(),
    }
}

fn invalid_recipe(recipe: &Recipe, message: String) -> StackwrightError {
    StackwrightError::InvalidRecipe {
        file: recipe.source_path.clone(),
        message,
    }
}

#[cfg(test)]
mod tests;
