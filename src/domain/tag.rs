//! Case-insensitive tag keys and the tag record stored per key.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::BTreeSet;
use std::fmt;

/// The normalized identity of a tag.
///
/// Keys are the lowercase form of a tag's display name, making `Travel`,
/// `travel`, and `TRAVEL` the same tag. Callers are expected to pass
/// already-trimmed input; no further normalization is applied.
///
/// # Examples
///
/// ```
/// use tagstore::domain::TagKey;
///
/// let key = TagKey::new("Travel");
/// assert_eq!(key.as_str(), "travel");
/// assert_eq!(key, TagKey::new("TRAVEL"));
/// ```
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagKey(String); // Always stored lowercase

impl TagKey {
    /// Creates a key from a display name by lowercasing it.
    pub fn new(name: &str) -> Self {
        Self(name.to_lowercase())
    }

    /// Returns the normalized key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TagKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for TagKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TagKey(\"{}\")", self.0)
    }
}

impl From<&str> for TagKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Serialize for TagKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for TagKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::new(&s))
    }
}

/// One distinct tag and the content it is attached to.
///
/// The display name is whatever casing was first entered and never changes
/// afterwards. `last_updated_at` moves forward every time a content ID is
/// attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    id: TagKey,
    name: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    last_updated_at: DateTime<Utc>,
    #[serde(default)]
    content_ids: BTreeSet<String>,
}

impl Tag {
    /// Creates a tag with no content attached.
    pub fn new(name: impl Into<String>, now: DateTime<Utc>) -> Self {
        let name = name.into();
        Self {
            id: TagKey::new(&name),
            name,
            created_at: now,
            last_updated_at: now,
            content_ids: BTreeSet::new(),
        }
    }

    /// Returns the normalized key.
    pub fn id(&self) -> &TagKey {
        &self.id
    }

    /// Returns the display name as first entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns when the tag was first created.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns when content was last attached.
    pub fn last_updated_at(&self) -> DateTime<Utc> {
        self.last_updated_at
    }

    /// Returns the content IDs attached to this tag.
    pub fn content_ids(&self) -> &BTreeSet<String> {
        &self.content_ids
    }

    /// Returns how many distinct content IDs carry this tag.
    pub fn content_count(&self) -> usize {
        self.content_ids.len()
    }

    /// Attaches a content ID and bumps `last_updated_at`.
    ///
    /// Empty IDs are ignored. Returns true if the ID was not attached before.
    pub(crate) fn attach(&mut self, content_id: &str, now: DateTime<Utc>) -> bool {
        if content_id.is_empty() {
            return false;
        }
        self.last_updated_at = now;
        self.content_ids.insert(content_id.to_string())
    }

    /// Re-derives `id` from the display name. Returns true if it changed.
    pub(crate) fn rekey(&mut self) -> bool {
        let key = TagKey::new(&self.name);
        if key == self.id {
            return false;
        }
        self.id = key;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    // ===========================================
    // TagKey
    // ===========================================

    #[test]
    fn key_lowercases() {
        assert_eq!(TagKey::new("NeedsReview").as_str(), "needsreview");
    }

    #[test]
    fn key_keeps_inner_whitespace_and_symbols() {
        assert_eq!(TagKey::new("Rust & Go").as_str(), "rust & go");
    }

    #[test]
    fn key_lowercases_unicode() {
        assert_eq!(TagKey::new("ÉTÉ").as_str(), "été");
    }

    #[test]
    fn key_equality_is_case_insensitive() {
        assert_eq!(TagKey::new("Draft"), TagKey::new("DRAFT"));
    }

    #[test]
    fn hashset_deduplicates_case_variants() {
        let mut set = HashSet::new();
        set.insert(TagKey::new("draft"));
        set.insert(TagKey::new("Draft"));
        set.insert(TagKey::new("DRAFT"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn key_debug_format() {
        assert_eq!(format!("{:?}", TagKey::new("Draft")), "TagKey(\"draft\")");
    }

    #[test]
    fn key_deserialize_normalizes() {
        let key: TagKey = serde_json::from_str("\"MUSIC\"").unwrap();
        assert_eq!(key.as_str(), "music");
    }

    // ===========================================
    // Tag record
    // ===========================================

    #[test]
    fn new_tag_preserves_display_name() {
        let tag = Tag::new("Music", at(10));
        assert_eq!(tag.name(), "Music");
        assert_eq!(tag.id().as_str(), "music");
        assert_eq!(tag.created_at(), at(10));
        assert_eq!(tag.last_updated_at(), at(10));
        assert!(tag.content_ids().is_empty());
    }

    #[test]
    fn attach_adds_id_and_bumps_timestamp() {
        let mut tag = Tag::new("Music", at(10));
        assert!(tag.attach("c1", at(20)));
        assert_eq!(tag.content_count(), 1);
        assert_eq!(tag.last_updated_at(), at(20));
        assert_eq!(tag.created_at(), at(10));
    }

    #[test]
    fn attach_duplicate_is_set_noop() {
        let mut tag = Tag::new("Music", at(10));
        tag.attach("c1", at(20));
        assert!(!tag.attach("c1", at(30)));
        assert_eq!(tag.content_count(), 1);
    }

    #[test]
    fn attach_empty_id_is_ignored() {
        let mut tag = Tag::new("Music", at(10));
        assert!(!tag.attach("", at(20)));
        assert_eq!(tag.content_count(), 0);
        assert_eq!(tag.last_updated_at(), at(10));
    }

    #[test]
    fn serializes_with_millisecond_timestamps() {
        let mut tag = Tag::new("Music", at(1));
        tag.attach("c2", at(2));
        tag.attach("c1", at(2));
        let value = serde_json::to_value(&tag).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "id": "music",
                "name": "Music",
                "createdAt": 1000,
                "lastUpdatedAt": 2000,
                "contentIds": ["c1", "c2"],
            })
        );
    }

    #[test]
    fn rekey_repairs_mismatched_id() {
        let json = r#"{"id":"old","name":"Music","createdAt":0,"lastUpdatedAt":0}"#;
        let mut tag: Tag = serde_json::from_str(json).unwrap();
        assert!(tag.rekey());
        assert_eq!(tag.id().as_str(), "music");
        assert!(!tag.rekey());
    }

    #[test]
    fn deserializes_without_content_ids() {
        let json = r#"{"id":"music","name":"Music","createdAt":1000,"lastUpdatedAt":1000}"#;
        let tag: Tag = serde_json::from_str(json).unwrap();
        assert_eq!(tag.content_count(), 0);
    }
}
