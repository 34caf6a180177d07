//! Prefix tree over lowercased tag keys.

use std::fmt;
use tracing::trace;

/// A node in the trie.
///
/// Children are kept in the order their characters were first inserted,
/// which is also the order suggestions come back in.
#[derive(Default)]
struct Node {
    is_end: bool,
    children: Vec<(char, Node)>,
}

impl Node {
    fn child(&self, c: char) -> Option<&Node> {
        self.children
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, node)| node)
    }

    fn child_or_insert(&mut self, c: char) -> &mut Node {
        let idx = match self.children.iter().position(|(ch, _)| *ch == c) {
            Some(idx) => idx,
            None => {
                self.children.push((c, Node::default()));
                self.children.len() - 1
            }
        };
        &mut self.children[idx].1
    }
}

// A tag name is one node per character, so dropping must not recurse.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Node> = self.children.drain(..).map(|(_, node)| node).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain(..).map(|(_, child)| child));
        }
    }
}

/// Prefix tree used for tag autocomplete.
///
/// Words are lowercased on insert and prefixes are lowercased on lookup.
/// The tree only ever grows; rebuilding means starting from a fresh `Trie`.
/// Every walk uses an explicit stack, so word length is bounded by memory
/// rather than by the call stack.
///
/// # Examples
///
/// ```
/// use tagstore::store::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("Travel");
/// trie.insert("Trains");
/// trie.insert("Food");
///
/// let mut found = trie.suggest("TR");
/// found.sort();
/// assert_eq!(found, vec!["trains", "travel"]);
/// assert!(trie.suggest("x").is_empty());
/// ```
#[derive(Default)]
pub struct Trie {
    root: Node,
    words: usize,
}

impl Trie {
    /// Creates an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word, lowercasing it first.
    ///
    /// Inserting the empty string marks the root itself as a word.
    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for c in word.to_lowercase().chars() {
            node = node.child_or_insert(c);
        }
        if !node.is_end {
            node.is_end = true;
            self.words += 1;
        }
    }

    /// Returns true if exactly this word (case-insensitively) was inserted.
    pub fn contains(&self, word: &str) -> bool {
        self.find(&word.to_lowercase()).is_some_and(|node| node.is_end)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }

    /// Returns every inserted word that starts with `prefix`.
    ///
    /// Matching is exact per character after lowercasing; a prefix that
    /// leaves the tree yields an empty list. Results follow a depth-first walk
    /// in child insertion order, not alphabetical or ranked order.
    pub fn suggest(&self, prefix: &str) -> Vec<String> {
        let prefix = prefix.to_lowercase();
        let Some(start) = self.find(&prefix) else {
            trace!(prefix = %prefix, "no trie path for prefix");
            return Vec::new();
        };
        collect(start, prefix)
    }

    fn find(&self, lowered: &str) -> Option<&Node> {
        let mut node = &self.root;
        for c in lowered.chars() {
            node = node.child(c)?;
        }
        Some(node)
    }
}

impl fmt::Debug for Trie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Trie").field("words", &self.words).finish()
    }
}

/// Pre-order walk from `start`. Each stack entry carries the byte length the
/// word had at its parent and the edge leading into it.
fn collect(start: &Node, prefix: String) -> Vec<String> {
    let mut results = Vec::new();
    let mut word = prefix;
    let mut stack: Vec<(&Node, usize, Option<char>)> = vec![(start, word.len(), None)];

    while let Some((node, parent_len, edge)) = stack.pop() {
        word.truncate(parent_len);
        if let Some(c) = edge {
            word.push(c);
        }
        if node.is_end {
            results.push(word.clone());
        }
        let here = word.len();
        for (c, child) in node.children.iter().rev() {
            stack.push((child, here, Some(*c)));
        }
    }
    results
}
