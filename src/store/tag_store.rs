//! The tag store: registry, trie, and relation graph behind one API.

use crate::domain::{Tag, TagKey, validate_tag_list};
use crate::infra::KeyValueStorage;
use crate::store::graph::RelationGraph;
use crate::store::registry::{AddOutcome, TagRegistry};
use crate::store::snapshot::{LoadResult, Snapshot, SnapshotError};
use crate::store::trie::Trie;
use chrono::Utc;
use tracing::{debug, info, warn};

/// Storage key the snapshot is kept under.
pub const STORAGE_KEY: &str = "TagStore|v1";

/// Options for [`TagStore::export_json`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportOptions {
    /// Compute the JSON without writing it to storage.
    pub dry_run: bool,
}

impl ExportOptions {
    /// Options that skip the storage write.
    pub fn dry_run() -> Self {
        Self { dry_run: true }
    }
}

/// Tag database with prefix autocomplete, persisted to a key-value store.
///
/// The store owns its registry, trie, and graph outright; every accessor
/// returns copies. State is read once in [`TagStore::open`] and written back
/// after each batch of changes. Persistence failures are logged and absorbed.
///
/// # Examples
///
/// ```
/// use tagstore::infra::MemoryStorage;
/// use tagstore::store::TagStore;
///
/// let mut store = TagStore::open(MemoryStorage::new());
/// store.add_tags(["Travel", "Food"], "post1", None);
/// store.add_tags(["travel"], "post2", None);
///
/// assert_eq!(store.suggest("tra"), vec!["Travel"]);
/// assert_eq!(store.tag("TRAVEL").unwrap().content_count(), 2);
/// ```
#[derive(Debug)]
pub struct TagStore<S> {
    registry: TagRegistry,
    trie: Trie,
    graph: RelationGraph,
    storage: S,
    load_result: LoadResult,
}

impl<S: KeyValueStorage> TagStore<S> {
    /// Creates a store and loads any snapshot found in `storage`.
    ///
    /// A missing, unreadable, or malformed snapshot leaves the store empty;
    /// [`TagStore::load_result`] reports which case applied.
    pub fn open(storage: S) -> Self {
        let mut store = Self {
            registry: TagRegistry::new(),
            trie: Trie::new(),
            graph: RelationGraph::new(),
            storage,
            load_result: LoadResult::Empty,
        };

        store.load_result = match store.storage.get(STORAGE_KEY) {
            Ok(Some(json)) if !json.trim().is_empty() => store.import_json(&json),
            Ok(_) => {
                debug!(key = STORAGE_KEY, "no stored snapshot");
                LoadResult::Empty
            }
            Err(e) => {
                warn!(key = STORAGE_KEY, error = %e, "failed to read snapshot; starting empty");
                LoadResult::Empty
            }
        };
        store
    }

    /// Returns how the initial load went.
    pub fn load_result(&self) -> &LoadResult {
        &self.load_result
    }

    /// Adds a tag and attaches `content_id` to it, without saving.
    ///
    /// `name` must already be trimmed and non-empty. An empty `content_id`
    /// creates or touches the tag without attaching anything.
    pub fn add_tag(&mut self, name: &str, content_id: &str) {
        if self.registry.add(name, content_id, Utc::now()) == AddOutcome::Created {
            self.trie.insert(name);
            debug!(tag = name, "created tag");
        }
    }

    /// Adds every name to `content_id`, then saves once.
    ///
    /// `source` labels where the batch came from and is only logged.
    pub fn add_tags<I, T>(&mut self, names: I, content_id: &str, source: Option<&str>)
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let mut count = 0usize;
        for name in names {
            self.add_tag(name.as_ref(), content_id);
            count += 1;
        }
        info!(
            tags = count,
            content_id,
            source = source.unwrap_or("unknown"),
            "tagged content"
        );
        self.save();
    }

    /// Returns display names of every tag whose key starts with `prefix`.
    ///
    /// Order follows the trie walk and carries no ranking.
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        self.trie
            .suggest(prefix)
            .into_iter()
            .filter_map(|key| self.registry.display_name(&key).map(str::to_string))
            .collect()
    }

    /// Suggests for raw text typed into a comma-separated tag field.
    ///
    /// With a comma present the last tag in the list is completed; a list with
    /// no usable tags yields nothing. Otherwise the trimmed input is used.
    pub fn suggest_for_input(&self, raw: &str) -> Vec<String> {
        if !raw.contains(',') {
            return self.suggest(raw.trim());
        }
        match validate_tag_list(raw) {
            Ok(tags) => tags
                .last()
                .map(|last| self.suggest(last))
                .unwrap_or_default(),
            Err(e) => {
                debug!(error = %e, "no suggestions for invalid tag list");
                Vec::new()
            }
        }
    }

    /// Relates two tags in both directions, then saves.
    ///
    /// Tags are matched case-insensitively and need not exist yet.
    pub fn add_relationship(&mut self, tag1: &str, tag2: &str) {
        self.graph.relate(&TagKey::new(tag1), &TagKey::new(tag2));
        self.save();
    }

    /// Returns the keys related to `tag`, sorted.
    pub fn related(&self, tag: &str) -> Vec<String> {
        self.graph
            .neighbors(TagKey::new(tag).as_str())
            .into_iter()
            .map(|k| k.as_str().to_string())
            .collect()
    }

    /// Returns copies of all tags, ordered by key.
    pub fn all_tags(&self) -> Vec<Tag> {
        self.registry.iter().cloned().collect()
    }

    /// Looks up one tag by any casing of its name.
    pub fn tag(&self, name: &str) -> Option<Tag> {
        self.registry.get(name).cloned()
    }

    /// Builds a snapshot of the current state.
    pub fn snapshot(&self) -> Snapshot {
        let tags = self
            .registry
            .iter()
            .map(|t| (t.id().clone(), t.clone()))
            .collect();
        let normalized_tag_map = self
            .registry
            .names()
            .map(|(k, name)| (k.clone(), name.to_string()))
            .collect();
        let related_graph = self
            .graph
            .iter()
            .map(|(k, set)| (k.clone(), set.clone()))
            .collect();

        Snapshot::new(tags, normalized_tag_map, related_graph)
    }

    /// Serializes the store and, unless `dry_run` is set, writes it under
    /// [`STORAGE_KEY`].
    ///
    /// A failed write is logged and ignored; the JSON is returned either way.
    ///
    /// # Errors
    ///
    /// Returns `SnapshotError::Encode` if the state cannot be serialized.
    pub fn export_json(&mut self, options: ExportOptions) -> Result<String, SnapshotError> {
        let json = self.snapshot().to_json()?;
        debug!(bytes = json.len(), dry_run = options.dry_run, "exported snapshot");

        if !options.dry_run {
            if let Err(e) = self.storage.set(STORAGE_KEY, &json) {
                warn!(key = STORAGE_KEY, error = %e, "failed to persist snapshot");
            }
        }
        Ok(json)
    }

    /// Replaces all state with the snapshot in `json`.
    ///
    /// The trie is rebuilt from tag names rather than read back, and every
    /// relation is re-added in both directions. If `json` is not a valid
    /// snapshot, nothing changes and `LoadResult::Corrupt` is returned.
    pub fn import_json(&mut self, json: &str) -> LoadResult {
        let decoded = match Snapshot::from_json(json) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable snapshot");
                return LoadResult::Corrupt(e.to_string());
            }
        };

        self.registry.clear();
        self.graph.clear();
        self.trie = Trie::new();

        for tag in decoded.tags.values() {
            self.trie.insert(tag.name());
            self.registry.restore(tag.clone());
        }
        for (key, neighbors) in &decoded.related_graph {
            self.graph.touch(key);
            for neighbor in neighbors {
                self.graph.relate(key, neighbor);
            }
        }

        if !self.snapshot().same_content(&decoded) {
            info!("stored snapshot was normalized on import");
        }

        let tags = self.registry.len();
        info!(tags, relations = self.graph.len(), "loaded snapshot");
        LoadResult::Loaded { tags }
    }

    /// Writes the current state to storage, logging any failure.
    pub fn save(&mut self) {
        if let Err(e) = self.export_json(ExportOptions::default()) {
            warn!(error = %e, "failed to save tag store");
        }
    }

    /// Returns the underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store and returns its storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}
