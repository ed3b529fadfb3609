use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};

/// Mapping key whose value is the tag expression rather than a form field id.
pub const TAGS_KEY: &str = "tags";

/// Per-form settings of the AWeber action, as saved by the host plugin.
#[derive(serde::Deserialize, Debug, Clone, Default)]
pub struct ActionConfiguration {
    #[serde(default, deserialize_with = "deserialize_optional_id")]
    pub list_id: Option<String>,
    #[serde(default)]
    pub fields: FieldMapping,
}

impl ActionConfiguration {
    pub fn list_id(&self) -> Option<&str> {
        self.list_id.as_deref().and_then(non_blank)
    }
}

/// Logical subscriber attribute name → form field id.
///
/// The `tags` entry is special: it holds the tag expression attached to every
/// subscriber coming through this action.
#[derive(serde::Deserialize, Debug, Clone, Default)]
#[serde(transparent)]
pub struct FieldMapping(
    #[serde(deserialize_with = "deserialize_field_ids")] BTreeMap<String, Option<String>>,
);

impl FieldMapping {
    /// Attribute name and field id pairs, skipping unset ids and the tag expression.
    pub fn field_ids(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0
            .iter()
            .filter(|(key, _)| key.as_str() != TAGS_KEY)
            .filter_map(|(key, field_id)| {
                let field_id = field_id.as_deref().and_then(non_blank)?;
                Some((key.as_str(), field_id))
            })
    }

    pub fn tag_expression(&self) -> Option<&str> {
        self.0
            .get(TAGS_KEY)
            .and_then(|expression| expression.as_deref())
            .and_then(non_blank)
    }
}

/// Ids are saved as strings or numbers depending on the host version.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Text(text) => text,
            RawId::Number(number) => number.to_string(),
        }
    }
}

fn deserialize_optional_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawId>::deserialize(deserializer)?.map(RawId::into_string))
}

fn deserialize_field_ids<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<String, Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, Option<RawId>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|(key, id)| (key, id.map(RawId::into_string)))
        .collect())
}

fn non_blank(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
