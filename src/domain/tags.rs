/// Tags of a remote subscriber record, either comma joined or as a sequence.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum TagList {
    Joined(String),
    Sequence(Vec<String>),
}

impl TagList {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            TagList::Joined(joined) => joined
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_string)
                .collect(),
            TagList::Sequence(tags) => tags.clone(),
        }
    }
}

impl Default for TagList {
    fn default() -> Self {
        TagList::Sequence(Vec::new())
    }
}

/// Tags from `new_tags` that are not in `existing_tags`, in `new_tags` order.
///
/// Never yields anything to remove: the result only ever grows the remote set.
pub fn tags_to_add(new_tags: &[String], existing_tags: &[String]) -> Vec<String> {
    let mut to_add: Vec<String> = Vec::new();
    for tag in new_tags {
        if !existing_tags.contains(tag) && !to_add.contains(tag) {
            to_add.push(tag.clone());
        }
    }
    to_add
}
