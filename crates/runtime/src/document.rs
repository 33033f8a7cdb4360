//! Loading the saved document over the built-in defaults.

use serde_json::{Map, Value};
use shadow_core::{CalculatorConfig, SystemState};

use crate::repository::DocumentRepository;

/// Load the saved document merged over defaults, then repair base state.
///
/// A missing, unreadable or malformed document is logged and replaced by the
/// defaults; this never fails.
pub fn load_with_defaults<R>(repo: &R, config: &CalculatorConfig) -> SystemState
where
    R: DocumentRepository + ?Sized,
{
    let mut state = match repo.load() {
        Ok(Some(saved)) => from_saved(saved).unwrap_or_else(|reason| {
            tracing::warn!("Discarding saved document: {}", reason);
            SystemState::default()
        }),
        Ok(None) => SystemState::default(),
        Err(err) => {
            tracing::warn!("Failed to load document: {}", err);
            SystemState::default()
        }
    };

    state.ensure_base_state(config);
    state
}

fn from_saved(saved: Value) -> Result<SystemState, String> {
    let defaults = serde_json::to_value(SystemState::default()).map_err(|e| e.to_string())?;
    let merged = merge_over_defaults(defaults, saved)?;
    serde_json::from_value(merged).map_err(|e| e.to_string())
}

/// Shallow merge of `saved` over `defaults`.
///
/// Top-level keys of `saved` replace the default value wholesale, except `ui`,
/// whose keys are merged one level deeper. Top-level nulls keep the default.
pub fn merge_over_defaults(defaults: Value, saved: Value) -> Result<Value, String> {
    let Value::Object(mut merged) = defaults else {
        return Err("default document is not an object".to_string());
    };
    let Value::Object(saved) = saved else {
        return Err("saved document is not a JSON object".to_string());
    };

    for (key, value) in saved {
        if value.is_null() {
            continue;
        }
        if key == "ui" {
            let base = match merged.remove("ui") {
                Some(Value::Object(ui)) => ui,
                _ => Map::new(),
            };
            merged.insert(key, Value::Object(merge_ui(base, value)));
        } else {
            merged.insert(key, value);
        }
    }

    Ok(Value::Object(merged))
}

fn merge_ui(mut base: Map<String, Value>, saved: Value) -> Map<String, Value> {
    if let Value::Object(saved) = saved {
        base.extend(saved);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn saved_keys_replace_defaults() {
        let merged = merge_over_defaults(
            json!({ "shadows": [], "corpses": [], "ui": { "buffToolsView": "hide", "lastDc": null } }),
            json!({ "shadows": [{ "id": "shadow-1" }], "ui": { "lastDc": 15 } }),
        )
        .unwrap();

        assert_eq!(merged["shadows"][0]["id"], "shadow-1");
        assert_eq!(merged["corpses"], json!([]));
        assert_eq!(merged["ui"]["buffToolsView"], "hide");
        assert_eq!(merged["ui"]["lastDc"], 15);
    }

    #[test]
    fn non_object_document_is_rejected() {
        assert!(merge_over_defaults(json!({}), json!([1, 2, 3])).is_err());
    }

    #[test]
    fn null_top_level_keeps_default() {
        let merged = merge_over_defaults(json!({ "abilities": [] }), json!({ "abilities": null }))
            .unwrap();
        assert_eq!(merged["abilities"], json!([]));
    }
}
