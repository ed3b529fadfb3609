use std::collections::BTreeMap;

use uuid::Uuid;

use super::TagList;

/// A subscriber record as represented by the AWeber API.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq)]
pub struct Subscriber {
    #[serde(default)]
    pub id: Option<u64>,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub tags: Option<TagList>,
    #[serde(default)]
    pub custom_fields: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub status: Option<String>,
    pub self_link: String,
    #[serde(default)]
    pub uuid: Option<Uuid>,
}

impl Subscriber {
    /// Current remote tags, empty when the record carries none.
    pub fn existing_tags(&self) -> Vec<String> {
        self.tags.as_ref().map(TagList::to_vec).unwrap_or_default()
    }
}

/// Partial update sent to a subscriber's self link.
#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct SubscriberPatch {
    pub tags: TagChanges,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_fields: Option<BTreeMap<String, String>>,
}

#[derive(serde::Serialize, Debug, Clone, PartialEq)]
pub struct TagChanges {
    pub add: Vec<String>,
    pub remove: Vec<String>,
}

impl SubscriberPatch {
    /// Adds `tags` and leaves every existing tag in place.
    pub fn adding_tags(tags: Vec<String>) -> Self {
        Self {
            tags: TagChanges {
                add: tags,
                remove: Vec::new(),
            },
            name: None,
            custom_fields: None,
        }
    }
}
