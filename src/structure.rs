use serde_yaml::Value;
use tracing::debug;

/// One node of the structure tree described by `setup.yaml`.
///
/// The document disambiguates the three shapes by value type alone, so
/// classification happens once at load time and the builder only ever walks
/// this typed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A directory whose children are named sub-entries, in document order.
    Directory(Vec<(String, Node)>),
    /// A directory described as a flat list of file entries.
    Files(Vec<FileEntry>),
    /// A file whose content is the string itself.
    Content(String),
}

/// One element of a file listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileEntry {
    /// Bare name: an empty file.
    Empty(String),
    /// `name: content` pair: a file with literal content.
    WithContent { name: String, content: String },
    /// Any other shape. The builder matches this arm and moves on; malformed
    /// entries never fail a run.
    Unrecognized,
}

impl Node {
    /// Classify a raw YAML value. Returns `None` for values that fit none of
    /// the three shapes (numbers, booleans, null); callers drop those.
    pub fn from_yaml(value: &Value) -> Option<Node> {
        match value {
            Value::Sequence(entries) => Some(Node::Files(
                entries.iter().flat_map(classify_entry).collect(),
            )),
            Value::Mapping(map) => {
                let mut children = Vec::new();
                for (key, child) in map {
                    let Some(name) = key.as_str() else {
                        debug!("skipping entry with non-string key {:?}", key);
                        continue;
                    };
                    match Node::from_yaml(child) {
                        Some(node) => children.push((name.to_owned(), node)),
                        None => debug!("skipping `{name}`: value is not a recognized shape"),
                    }
                }
                Some(Node::Directory(children))
            }
            Value::String(content) => Some(Node::Content(content.clone())),
            _ => None,
        }
    }
}

/// Classify one listing entry. A mapping entry yields one file per key, so
/// this can produce several entries from a single element.
fn classify_entry(entry: &Value) -> Vec<FileEntry> {
    match entry {
        Value::String(name) => vec![FileEntry::Empty(name.clone())],
        Value::Mapping(map) => map
            .into_iter()
            .map(|(key, content)| match (key.as_str(), content.as_str()) {
                (Some(name), Some(content)) => FileEntry::WithContent {
                    name: name.to_owned(),
                    content: content.to_owned(),
                },
                _ => FileEntry::Unrecognized,
            })
            .collect(),
        _ => vec![FileEntry::Unrecognized],
    }
}
