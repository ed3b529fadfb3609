use std::collections::BTreeMap;

use super::{ActionConfiguration, EntryValue, FormEntry, SubscriberEmail};

const CUSTOM_FIELD_PREFIX: &str = "custom_fields.";

/// Subscriber attributes derived from one submission.
///
/// Sparse: attributes without a submitted value are left out entirely.
#[derive(serde::Serialize, Debug, Clone, Default, PartialEq)]
pub struct VariableSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<SubscriberEmail>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub custom_fields: BTreeMap<String, String>,
    /// Any other subscriber attribute, e.g. `ad_tracking` or `misc_notes`.
    #[serde(flatten)]
    pub attributes: BTreeMap<String, String>,
}

impl VariableSet {
    pub fn from_submission(action: &ActionConfiguration, entry: &FormEntry) -> Self {
        let mut vars = Self::default();

        for (key, field_id) in action.fields.field_ids() {
            let value = match entry.value(field_id) {
                EntryValue::Submitted(value) => value,
                EntryValue::Empty => {
                    tracing::debug!(attribute = key, field_id, "Submitted value is empty");
                    continue;
                }
                EntryValue::NotSubmitted => {
                    tracing::debug!(attribute = key, field_id, "Field was not submitted");
                    continue;
                }
            };
            vars.set(key, value);
        }

        tracing::debug!(variables = ?vars, "Variables before tags");

        if let Some(expression) = action.fields.tag_expression() {
            vars.tags = vec![expression.to_string()];
        }

        tracing::debug!(variables = ?vars, "Variables after tags");

        vars
    }

    fn set(&mut self, key: &str, value: String) {
        match key {
            "email" => self.email = SubscriberEmail::parse(value).ok(),
            "name" => self.name = Some(value),
            _ => match key.strip_prefix(CUSTOM_FIELD_PREFIX) {
                Some(custom_field) if !custom_field.is_empty() => {
                    self.custom_fields.insert(custom_field.to_string(), value);
                }
                _ => {
                    self.attributes.insert(key.to_string(), value);
                }
            },
        }
    }

    /// Names of the attributes that ended up with a value.
    pub fn field_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        if self.email.is_some() {
            names.push("email".to_string());
        }
        if self.name.is_some() {
            names.push("name".to_string());
        }
        if !self.tags.is_empty() {
            names.push("tags".to_string());
        }
        names.extend(
            self.custom_fields
                .keys()
                .map(|k| format!("{CUSTOM_FIELD_PREFIX}{k}")),
        );
        names.extend(self.attributes.keys().cloned());
        names
    }
}
