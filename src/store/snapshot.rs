//! Persisted snapshot format and load outcomes.
//!
//! The stable on-disk shape is:
//!
//! ```json
//! {
//!   "tags": { "music": { "id": "music", "name": "Music", "createdAt": 0,
//!                        "lastUpdatedAt": 0, "contentIds": ["c1"] } },
//!   "normalizedTagMap": { "music": "Music" },
//!   "relatedGraph": { "music": { "jazz": true } }
//! }
//! ```
//!
//! Timestamps are epoch milliseconds. Content IDs are a sorted array. On read,
//! `tags` may also be an array of tag objects and `relatedGraph` an array of
//! `[key, [neighbors]]` pairs; only the map shape is ever written.
//!
//! Older blobs also carry a structural `trie` (`{"isEnd", "children"}` nested
//! one level per character). It is skipped without being built, since the trie
//! is always rebuilt from tag names, but a trie nested deeper than the longest
//! tag could produce is rejected as corrupt.

use crate::domain::{Tag, TagKey};
use serde::de::IgnoredAny;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::value::RawValue;
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The stored text is not a valid snapshot.
    #[error("malformed snapshot: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The in-memory state could not be encoded.
    #[error("failed to encode snapshot: {0}")]
    Encode(#[source] serde_json::Error),

    /// The stored trie nests deeper than any stored tag name allows.
    #[error("malformed snapshot: trie nests {depth} levels, at most {limit} expected")]
    TrieTooDeep { depth: usize, limit: usize },
}

/// Which path a load took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadResult {
    /// A snapshot was read and applied.
    Loaded { tags: usize },
    /// No snapshot was stored, or it could not be read.
    Empty,
    /// A snapshot was stored but could not be parsed.
    Corrupt(String),
}

impl LoadResult {
    /// Returns true if a snapshot was applied.
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadResult::Loaded { .. })
    }
}

/// Full serialized state of a tag store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(deserialize_with = "tags_any_shape")]
    pub tags: BTreeMap<TagKey, Tag>,

    #[serde(default)]
    pub normalized_tag_map: BTreeMap<TagKey, String>,

    #[serde(
        default,
        serialize_with = "graph_as_presence_map",
        deserialize_with = "graph_any_shape"
    )]
    pub related_graph: BTreeMap<TagKey, BTreeSet<TagKey>>,

    /// Nesting depth of a stored legacy trie, zero when absent.
    #[serde(
        default,
        rename = "trie",
        skip_serializing,
        deserialize_with = "trie_nesting"
    )]
    trie_depth: usize,
}

impl Snapshot {
    pub fn new(
        tags: BTreeMap<TagKey, Tag>,
        normalized_tag_map: BTreeMap<TagKey, String>,
        related_graph: BTreeMap<TagKey, BTreeSet<TagKey>>,
    ) -> Self {
        Self {
            tags,
            normalized_tag_map,
            related_graph,
            trie_depth: 0,
        }
    }

    /// Parses a snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Malformed` if the text is not a snapshot, and
    /// `SnapshotError::TrieTooDeep` if a stored trie could not have come
    /// from the stored tags.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_str(json).map_err(SnapshotError::Malformed)?;
        let limit = snapshot.trie_depth_limit();
        if snapshot.trie_depth > limit {
            return Err(SnapshotError::TrieTooDeep {
                depth: snapshot.trie_depth,
                limit,
            });
        }
        Ok(snapshot)
    }

    /// Encodes the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Encode` if serialization fails.
    pub fn to_json(&self) -> Result<String, SnapshotError> {
        serde_json::to_string_pretty(self).map_err(SnapshotError::Encode)
    }

    /// Compares everything except a stored legacy trie.
    pub fn same_content(&self, other: &Snapshot) -> bool {
        self.tags == other.tags
            && self.normalized_tag_map == other.normalized_tag_map
            && self.related_graph == other.related_graph
    }

    // A trie node and its `children` object each add a level, and the
    // longest word gets one node per character below the root.
    fn trie_depth_limit(&self) -> usize {
        let longest = self
            .tags
            .iter()
            .map(|(key, tag)| {
                let by_key = key.as_str().chars().count();
                let by_name = tag.name().to_lowercase().chars().count();
                by_key.max(by_name)
            })
            .max()
            .unwrap_or(0);
        2 * longest + 2
    }
}

fn trie_nesting<'de, D>(deserializer: D) -> Result<usize, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    Ok(nesting_depth(raw.get()))
}

/// Deepest object/array nesting in already-validated JSON text.
fn nesting_depth(json: &str) -> usize {
    let mut depth = 0usize;
    let mut deepest = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for b in json.bytes() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => {
                depth += 1;
                deepest = deepest.max(depth);
            }
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    deepest
}

fn tags_any_shape<'de, D>(deserializer: D) -> Result<BTreeMap<TagKey, Tag>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Map(BTreeMap<TagKey, Tag>),
        List(Vec<Tag>),
    }

    Ok(match Shape::deserialize(deserializer)? {
        Shape::Map(map) => map,
        Shape::List(list) => list.into_iter().map(|t| (t.id().clone(), t)).collect(),
    })
}

fn graph_any_shape<'de, D>(
    deserializer: D,
) -> Result<BTreeMap<TagKey, BTreeSet<TagKey>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Shape {
        Map(BTreeMap<TagKey, BTreeMap<TagKey, IgnoredAny>>),
        List(Vec<(TagKey, Vec<TagKey>)>),
    }

    Ok(match Shape::deserialize(deserializer)? {
        Shape::Map(map) => map
            .into_iter()
            .map(|(k, neighbors)| (k, neighbors.into_keys().collect()))
            .collect(),
        Shape::List(list) => list
            .into_iter()
            .map(|(k, neighbors)| (k, neighbors.into_iter().collect()))
            .collect(),
    })
}

fn graph_as_presence_map<S>(
    graph: &BTreeMap<TagKey, BTreeSet<TagKey>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    struct Presence<'a>(&'a BTreeSet<TagKey>);

    impl Serialize for Presence<'_> {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            let mut map = serializer.serialize_map(Some(self.0.len()))?;
            for key in self.0 {
                map.serialize_entry(key, &true)?;
            }
            map.end()
        }
    }

    let mut map = serializer.serialize_map(Some(graph.len()))?;
    for (key, neighbors) in graph {
        map.serialize_entry(key, &Presence(neighbors))?;
    }
    map.end()
}
