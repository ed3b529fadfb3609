use std::collections::HashMap;

use serde_json::Value;

/// One submission as handed over by the host form pipeline.
#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct FormEntry {
    #[serde(default)]
    pub id: Option<u64>,
    /// Submitted values keyed by form field id.
    #[serde(default)]
    pub metas: HashMap<String, Value>,
}

#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct FormDefinition {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValue {
    NotSubmitted,
    Empty,
    Submitted(String),
}

impl FormEntry {
    pub fn value(&self, field_id: &str) -> EntryValue {
        let Some(raw) = self.metas.get(field_id) else {
            return EntryValue::NotSubmitted;
        };

        let text = match raw {
            Value::Null => String::new(),
            Value::String(s) => s.trim().to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => n.to_string(),
            // Checkbox style fields submit several values.
            Value::Array(items) => items
                .iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s.trim().to_string()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join(", "),
            Value::Object(_) => String::new(),
        };

        if text.is_empty() {
            EntryValue::Empty
        } else {
            EntryValue::Submitted(text)
        }
    }
}
