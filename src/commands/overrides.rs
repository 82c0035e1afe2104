//! `--set KEY=VALUE` parsing

use std::collections::BTreeMap;

use stackwright::error::{StackwrightError, StackwrightResult};

/// Parse repeated `--set` values; a later duplicate key wins.
pub fn parse_overrides(raw: &[String]) -> StackwrightResult<BTreeMap<String, String>> {
    let mut overrides = BTreeMap::new();
    for input in raw {
        let Some((key, value)) = input.split_once('=') else {
            return Err(StackwrightError::InvalidOverride {
                input: input.clone(),
            });
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(StackwrightError::InvalidOverride {
                input: input.clone(),
            });
        }
        overrides.insert(key.to_string(), value.to_string());
    }
    Ok(overrides)
}
