//! Option setting validators
//!
//! Validators run after a setting's value is determined. They never coerce:
//! a value of the wrong shape for a validator is reported, not converted.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type", rename_all_fields = "PascalCase")]
pub enum Validator {
    /// Value must be present and non-blank
    Required,
    /// Numeric value within an inclusive range
    Range {
        #[serde(default)]
        min: Option<f64>,
        #[serde(default)]
        max: Option<f64>,
    },
    /// String value must match `pattern`
    Regex {
        pattern: String,
        #[serde(default)]
        message: Option<String>,
    },
    /// Value must equal one of `values`
    AllowedValues { values: Vec<Value> },
}

impl Validator {
    /// Check a resolved value. Unset (`null`) values only fail `Required`.
    pub fn validate(&self, value: &Value) -> Result<(), String> {
        match self {
            Validator::Required => {
                if is_blank(value) {
                    Err("a value is required".to_string())
                } else {
                    Ok(())
                }
            }
            _ if value.is_null() => Ok(()),
            Validator::Range { min, max } => {
                let number = value
                    .as_f64()
                    .ok_or_else(|| format!("{} is not a number", value))?;
                if let Some(min) = min {
                    if number < *min {
                        return Err(format!("{} is less than the minimum {}", number, min));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Err(format!("{} is greater than the maximum {}", number, max));
                    }
                }
                Ok(())
            }
            Validator::Regex { pattern, message } => {
                let text = value
                    .as_str()
                    .ok_or_else(|| format!("{} is not a string", value))?;
                let re = Regex::new(pattern)
                    .map_err(|e| format!("invalid pattern '{}': {}", pattern, e))?;
                if re.is_match(text) {
                    Ok(())
                } else {
                    Err(message.clone().unwrap_or_else(|| {
                        format!("'{}' does not match the pattern '{}'", text, pattern)
                    }))
                }
            }
            Validator::AllowedValues { values } => {
                if values.contains(value) {
                    Ok(())
                } else {
                    let allowed: Vec<String> = values.iter().map(Value::to_string).collect();
                    Err(format!(
                        "{} is not one of the allowed values: {}",
                        value,
                        allowed.join(", ")
                    ))
                }
            }
        }
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}
