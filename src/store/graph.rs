//! Undirected relations between tag keys.

use crate::domain::TagKey;
use std::collections::{BTreeMap, BTreeSet};

/// Symmetric adjacency between tag keys.
///
/// Edges are only ever created through [`RelationGraph::relate`], which
/// always inserts both directions. Keys need not exist as tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationGraph {
    adjacency: BTreeMap<TagKey, BTreeSet<TagKey>>,
}

impl RelationGraph {
    /// Creates an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Relates two tags in both directions.
    ///
    /// Both keys get a node even when the edge already exists. Relating a tag
    /// to itself records a self-loop once.
    pub fn relate(&mut self, a: &TagKey, b: &TagKey) {
        self.adjacency
            .entry(a.clone())
            .or_default()
            .insert(b.clone());
        self.adjacency
            .entry(b.clone())
            .or_default()
            .insert(a.clone());
    }

    /// Ensures a node exists without adding edges.
    pub(crate) fn touch(&mut self, key: &TagKey) {
        self.adjacency.entry(key.clone()).or_default();
    }

    /// Returns the neighbors of a tag, sorted by key.
    pub fn neighbors(&self, key: &str) -> Vec<TagKey> {
        self.adjacency
            .get(key)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    fn are_related(&self, a: &str, b: &str) -> bool {
        self.adjacency.get(a).is_some_and(|set| set.contains(b))
    }

    /// Iterates over every node with its neighbor set.
    pub fn iter(&self) -> impl Iterator<Item = (&TagKey, &BTreeSet<TagKey>)> {
        self.adjacency.iter()
    }

    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub(crate) fn clear(&mut self) {
        self.adjacency.clear();
    }
}
