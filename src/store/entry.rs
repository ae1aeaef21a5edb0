//! Work tab records and the patches merged into them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// State label given to a freshly opened work tab.
pub const DEFAULT_STATE: &str = "準備中";

fn default_state() -> String {
    DEFAULT_STATE.to_string()
}

/// One work tab. `id` is assigned by the caller and never changes once the
/// entry is in a store; extra fields ride along flattened next to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkTabEntry {
    pub id: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl WorkTabEntry {
    pub fn new(id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            state: state.into(),
            fields: Map::new(),
        }
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Shallow merge: every key present in `patch` overwrites, everything else
    /// is left alone. `id` is never taken from a patch. Returns whether the
    /// entry actually changed.
    ///
    /// A `state` given through [`WorkTabPatch::field`] is applied too, as text
    /// when it is not a JSON string. The typed [`WorkTabPatch::state`] wins
    /// when both are given.
    pub fn merge(&mut self, patch: WorkTabPatch) -> bool {
        let WorkTabPatch { state, mut fields } = patch;
        let state = state.or_else(|| fields.remove("state").map(state_label));
        fields.remove("state");

        let mut changed = false;

        if let Some(state) = state {
            if self.state != state {
                self.state = state;
                changed = true;
            }
        }

        for (key, value) in fields {
            if key == "id" {
                continue;
            }
            if self.fields.get(&key) != Some(&value) {
                self.fields.insert(key, value);
                changed = true;
            }
        }

        changed
    }
}

fn state_label(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Fields to merge into an existing [`WorkTabEntry`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkTabPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl WorkTabPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.state = Some(state.into());
        self
    }

    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_none() && self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_merge_overwrites_only_patched_fields() {
        let mut entry = WorkTabEntry::new("a", DEFAULT_STATE);
        entry.fields.insert("owner".into(), json!("kai"));
        entry.fields.insert("progress".into(), json!(10));

        let changed = entry.merge(WorkTabPatch::new().state("完成").field("progress", 90));

        assert!(changed);
        assert_eq!(entry.id, "a");
        assert_eq!(entry.state, "完成");
        assert_eq!(entry.field("progress"), Some(&json!(90)));
        assert_eq!(entry.field("owner"), Some(&json!("kai")));
    }

    #[test]
    fn test_merge_never_changes_id() {
        let mut entry = WorkTabEntry::new("a", DEFAULT_STATE);
        let changed = entry.merge(WorkTabPatch::new().field("id", "b"));
        assert!(!changed);
        assert_eq!(entry.id, "a");
        assert!(entry.field("id").is_none());
    }

    #[test]
    fn test_merge_same_values_is_not_a_change() {
        let mut entry = WorkTabEntry::new("a", "running");
        entry.fields.insert("n".into(), json!(1));
        assert!(!entry.merge(WorkTabPatch::new().state("running").field("n", 1)));
        assert!(!entry.merge(WorkTabPatch::new()));
    }

    #[test]
    fn test_state_through_field_key() {
        let mut entry = WorkTabEntry::new("a", DEFAULT_STATE);
        assert!(entry.merge(WorkTabPatch::new().field("state", "done")));
        assert_eq!(entry.state, "done");
        assert!(entry.field("state").is_none());
    }

    #[test]
    fn test_non_string_state_field_is_applied_as_text() {
        let mut entry = WorkTabEntry::new("a", DEFAULT_STATE);
        assert!(entry.merge(WorkTabPatch::new().field("state", json!(5))));
        assert_eq!(entry.state, "5");
        assert!(entry.merge(WorkTabPatch::new().field("state", json!(true))));
        assert_eq!(entry.state, "true");
        assert!(entry.field("state").is_none());
    }

    #[test]
    fn test_typed_state_wins_over_state_field() {
        let mut entry = WorkTabEntry::new("a", DEFAULT_STATE);
        assert!(entry.merge(WorkTabPatch::new().state("typed").field("state", "field")));
        assert_eq!(entry.state, "typed");
        assert!(entry.field("state").is_none());

        // Same typed value plus a different field value is still no change.
        assert!(!entry.merge(WorkTabPatch::new().state("typed").field("state", "other")));
        assert_eq!(entry.state, "typed");
    }

    #[test]
    fn test_serde_flattens_extra_fields() {
        let mut entry = WorkTabEntry::new("a", "完成");
        entry.fields.insert("progress".into(), json!(100));

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value, json!({"id": "a", "state": "完成", "progress": 100}));
    }

    #[test]
    fn test_missing_state_defaults_on_restore() {
        let entry: WorkTabEntry = serde_json::from_value(json!({"id": "a"})).unwrap();
        assert_eq!(entry.state, DEFAULT_STATE);
        assert!(entry.fields.is_empty());
    }

    #[test]
    fn test_patch_from_json() {
        let patch: WorkTabPatch =
            serde_json::from_value(json!({"state": "完成", "note": "ok"})).unwrap();
        assert_eq!(patch.state.as_deref(), Some("完成"));
        assert_eq!(patch.fields.get("note"), Some(&json!("ok")));
        assert!(!patch.is_empty());
        assert!(WorkTabPatch::new().is_empty());
    }
}
