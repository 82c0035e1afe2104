//! Option setting value types
//!
//! Resolved option values are plain `serde_json::Value`s; this module holds the
//! declared value type of a setting and the choose-or-create selection shape
//! used by resource type hints.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Declared type of an option setting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OptionSettingValueType {
    #[default]
    String,
    Int,
    Double,
    Bool,
    Object,
}

impl OptionSettingValueType {
    /// Parse user input (e.g. `--set Key=Value`) into a typed value.
    ///
    /// Input that does not parse as the declared type is an error; nothing is
    /// coerced.
    pub fn parse_input(&self, raw: &str) -> Result<Value, String> {
        match self {
            OptionSettingValueType::String => Ok(Value::String(raw.to_string())),
            OptionSettingValueType::Int => raw
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|_| format!("'{}' is not a valid integer", raw)),
            OptionSettingValueType::Double => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| json!(v))
                .ok_or_else(|| format!("'{}' is not a valid number", raw)),
            OptionSettingValueType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(Value::Bool(true)),
                "false" => Ok(Value::Bool(false)),
                _ => Err(format!("'{}' is not a valid boolean (true/false)", raw)),
            },
            OptionSettingValueType::Object => match serde_json::from_str::<Value>(raw) {
                Ok(value @ Value::Object(_)) => Ok(value),
                _ => Err(format!("'{}' is not a JSON object", raw)),
            },
        }
    }

    /// Whether an already-typed value matches this type. `null` means unset and
    /// is accepted by every type; the `Required` validator rejects it.
    pub fn accepts(&self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            OptionSettingValueType::String => value.is_string(),
            OptionSettingValueType::Int => value.is_i64() || value.is_u64(),
            OptionSettingValueType::Double => value.is_number(),
            OptionSettingValueType::Bool => value.is_boolean(),
            OptionSettingValueType::Object => value.is_object(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionSettingValueType::String => "string",
            OptionSettingValueType::Int => "int",
            OptionSettingValueType::Double => "double",
            OptionSettingValueType::Bool => "bool",
            OptionSettingValueType::Object => "object",
        }
    }
}

/// Outcome of a "choose existing or create new" type hint.
///
/// Exactly one of the two shapes is ever populated; `Empty` is only produced
/// when the setting allows an unset selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceSelection {
    /// Reference (id or ARN) of an existing remote resource
    Existing(String),
    /// Name for a resource the deployment will create
    CreateNew(String),
    /// No selection
    Empty,
}

impl ResourceSelection {
    pub const CREATE_NEW_KEY: &'static str = "CreateNew";
    pub const EXISTING_KEY: &'static str = "ExistingResource";
    pub const NEW_NAME_KEY: &'static str = "NewName";

    /// Normalize a raw response that may carry blank fields.
    ///
    /// `create_new` decides which field is meaningful; the other is dropped.
    pub fn from_parts(
        create_new: bool,
        existing: Option<&str>,
        new_name: Option<&str>,
    ) -> Result<Self, String> {
        let existing = existing.map(str::trim).filter(|s| !s.is_empty());
        let new_name = new_name.map(str::trim).filter(|s| !s.is_empty());

        if create_new {
            return new_name
                .map(|name| ResourceSelection::CreateNew(name.to_string()))
                .ok_or_else(|| "a name is required when creating a new resource".to_string());
        }

        match (existing, new_name) {
            (Some(existing), _) => Ok(ResourceSelection::Existing(existing.to_string())),
            (None, Some(name)) => Err(format!(
                "'{}' was given as a new resource name but creating a new resource was not selected",
                name
            )),
            (None, None) => Ok(ResourceSelection::Empty),
        }
    }

    /// Parse a stored setting value back into a selection.
    ///
    /// Returns `None` for values that are not selection-shaped (e.g. plain strings).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(ResourceSelection::Empty),
            Value::Object(map) => {
                let create_new = map.get(Self::CREATE_NEW_KEY)?.as_bool()?;
                let existing = map.get(Self::EXISTING_KEY).and_then(Value::as_str);
                let new_name = map.get(Self::NEW_NAME_KEY).and_then(Value::as_str);
                Self::from_parts(create_new, existing, new_name).ok()
            }
            _ => None,
        }
    }

    /// Stored representation in the settings map and payload
    pub fn to_value(&self) -> Value {
        match self {
            ResourceSelection::Existing(reference) => json!({
                "CreateNew": false,
                "ExistingResource": reference,
            }),
            ResourceSelection::CreateNew(name) => json!({
                "CreateNew": true,
                "NewName": name,
            }),
            ResourceSelection::Empty => Value::Null,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, ResourceSelection::Empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_input_rejects_mistyped_values() {
        assert_eq!(
            OptionSettingValueType::Int.parse_input("3").unwrap(),
            Value::from(3)
        );
        assert!(OptionSettingValueType::Int.parse_input("3.5").is_err());
        assert!(OptionSettingValueType::Bool.parse_input("yes").is_err());
        assert!(OptionSettingValueType::Object.parse_input("[1,2]").is_err());
        assert_eq!(
            OptionSettingValueType::Bool.parse_input("TRUE").unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn accepts_checks_json_shape() {
        assert!(OptionSettingValueType::Int.accepts(&json!(2)));
        assert!(!OptionSettingValueType::Int.accepts(&json!("2")));
        assert!(OptionSettingValueType::Double.accepts(&json!(2)));
        assert!(OptionSettingValueType::String.accepts(&Value::Null));
    }

    #[test]
    fn existing_reference_wins_over_blank_new_name() {
        let selection =
            ResourceSelection::from_parts(false, Some("arn:cluster/foo"), Some("")).unwrap();
        assert_eq!(
            selection,
            ResourceSelection::Existing("arn:cluster/foo".to_string())
        );

        let value = selection.to_value();
        assert_eq!(value["ExistingResource"], "arn:cluster/foo");
        assert!(value.get("NewName").is_none());
    }

    #[test]
    fn create_new_drops_existing_reference() {
        let selection =
            ResourceSelection::from_parts(true, Some("arn:cluster/foo"), Some("fresh")).unwrap();
        assert_eq!(selection, ResourceSelection::CreateNew("fresh".to_string()));
        assert!(selection.to_value().get("ExistingResource").is_none());
    }

    #[test]
    fn create_new_without_name_is_rejected() {
        assert!(ResourceSelection::from_parts(true, None, Some("  ")).is_err());
    }

    #[test]
    fn value_round_trip_preserves_shape() {
        let selection = ResourceSelection::CreateNew("web".to_string());
        assert_eq!(
            ResourceSelection::from_value(&selection.to_value()),
            Some(selection)
        );
        assert_eq!(ResourceSelection::from_value(&json!("web")), None);
    }
}
