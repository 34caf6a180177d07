//! Tag records keyed by normalized name.

use crate::domain::{Tag, TagKey};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use tracing::warn;

/// Outcome of adding a name to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new tag was created for this key.
    Created,
    /// The key already existed.
    Existing,
}

/// Mapping from normalized key to tag record, plus the key to display-name
/// lookup used to resolve trie results.
#[derive(Debug, Clone, Default)]
pub struct TagRegistry {
    tags: BTreeMap<TagKey, Tag>,
    names: BTreeMap<TagKey, String>,
}

impl TagRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upserts a tag and attaches `content_id` to it.
    ///
    /// The first call for a key fixes the display name; later calls with other
    /// casings only attach content. An empty `content_id` attaches nothing.
    pub fn add(&mut self, name: &str, content_id: &str, now: DateTime<Utc>) -> AddOutcome {
        let key = TagKey::new(name);
        let mut outcome = AddOutcome::Existing;

        let tag = self.tags.entry(key.clone()).or_insert_with(|| {
            outcome = AddOutcome::Created;
            Tag::new(name, now)
        });
        tag.attach(content_id, now);

        if outcome == AddOutcome::Created {
            self.names.insert(key, name.to_string());
        }
        outcome
    }

    /// Restores a tag read from a snapshot, replacing any tag with its key.
    ///
    /// The key is re-derived from the display name so that the trie, the
    /// lookup, and the tag map always agree.
    pub(crate) fn restore(&mut self, mut tag: Tag) {
        let stored = tag.id().clone();
        if tag.rekey() {
            warn!(stored = %stored, key = %tag.id(), "tag id did not match its name; rekeyed");
        }
        self.names.insert(tag.id().clone(), tag.name().to_string());
        self.tags.insert(tag.id().clone(), tag);
    }

    /// Looks up a tag by any casing of its name.
    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.get(TagKey::new(name).as_str())
    }

    /// Resolves a normalized key to its display name.
    pub fn display_name(&self, key: &str) -> Option<&str> {
        self.names.get(key).map(String::as_str)
    }

    /// Iterates over tags in key order.
    pub fn iter(&self) -> impl Iterator<Item = &Tag> {
        self.tags.values()
    }

    /// Iterates over the key to display-name lookup.
    pub fn names(&self) -> impl Iterator<Item = (&TagKey, &str)> {
        self.names.iter().map(|(k, v)| (k, v.as_str()))
    }

    /// Returns the number of tags.
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    /// Returns true if there are no tags.
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.tags.clear();
        self.names.clear();
    }
}
