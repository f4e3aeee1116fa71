//! Prefix Trie Implementation
//!
//! This module provides the character trie that drives prefix compression.
//! Every inserted word owns exactly one root-to-node path, and a prefix query
//! returns every word whose path passes through the prefix's node.
//!
//! Each node caches the number of words in its subtree. The cache is kept up
//! to date by [`PrefixTrie::insert`] at O(depth) cost and lets
//! [`PrefixTrie::count_by_prefix`] and [`PrefixTrie::unique_completion`]
//! answer with a single descent, while [`PrefixTrie::get_by_prefix`] still
//! collects the subtree on demand.

mod error;
mod node;

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use error::TrieError;
pub use node::TrieNode;

/// Result type for prefix trie operations
pub type TrieResult<T> = Result<T, TrieError>;

/// The set of characters a trie accepts on its edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alphabet {
    /// Any Unicode scalar value
    #[default]
    Unicode,

    /// Code points U+0000 to U+00FF
    Byte,

    /// Code points U+0000 to U+007F
    Ascii,
}

impl Alphabet {
    /// Whether `ch` may label an edge under this alphabet.
    pub fn permits(self, ch: char) -> bool {
        match self {
            Alphabet::Unicode => true,
            Alphabet::Byte => u32::from(ch) <= 0xFF,
            Alphabet::Ascii => ch.is_ascii(),
        }
    }

    /// Returns the first character of `word` outside this alphabet.
    pub fn first_unsupported(self, word: &str) -> Option<char> {
        word.chars().find(|&ch| !self.permits(ch))
    }
}

impl fmt::Display for Alphabet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Alphabet::Unicode => "unicode",
            Alphabet::Byte => "byte",
            Alphabet::Ascii => "ascii",
        };
        f.write_str(name)
    }
}

/// Configuration options for the prefix trie
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieConfig {
    /// Characters accepted by `insert`
    pub alphabet: Alphabet,
}

/// A character trie over whole words with prefix-complete lookup.
///
/// Key features:
/// * Full Unicode edges by default, with optional narrower alphabets
/// * Ordered children, so walks and snapshots are reproducible
/// * Grows monotonically; nothing is ever removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixTrie {
    /// The sentinel root node
    root: TrieNode,

    /// Total number of nodes, root included
    node_count: usize,

    /// Configuration options
    config: TrieConfig,
}

impl PrefixTrie {
    /// Creates a new empty `PrefixTrie` accepting any Unicode text.
    pub fn new() -> Self {
        Self::with_config(TrieConfig::default())
    }

    /// Creates a new empty `PrefixTrie` with the specified configuration.
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            root: TrieNode::new(),
            node_count: 1,
            config,
        }
    }

    /// Wraps an already assembled node graph, recomputing the cached word
    /// counts. Structural validation is the caller's job.
    pub(crate) fn from_root(mut root: TrieNode, node_count: usize, config: TrieConfig) -> Self {
        root.recount();
        Self {
            root,
            node_count,
            config,
        }
    }

    /// Returns the trie's configuration.
    pub fn config(&self) -> &TrieConfig {
        &self.config
    }

    /// Returns the sentinel root, for walking the full graph.
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Inserts a word into the trie.
    ///
    /// # Arguments
    ///
    /// * `word` - The word to insert. The empty string is stored at the root.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - `true` if the word was new, `false` if it was already present.
    /// * `Err(TrieError)` - If the word has a character outside the alphabet.
    ///   The trie is left unchanged in that case.
    pub fn insert<W>(&mut self, word: W) -> TrieResult<bool>
    where
        W: AsRef<str>,
    {
        let word = word.as_ref();
        let alphabet = self.config.alphabet;
        if let Some(ch) = alphabet.first_unsupported(word) {
            return Err(TrieError::UnsupportedCharacter {
                ch,
                word: word.to_string(),
                alphabet,
            });
        }

        let is_new = !self.contains(word);

        let mut node = &mut self.root;
        for ch in word.chars() {
            if is_new {
                node.increment_word_count();
            }
            if node.child(ch).is_none() {
                self.node_count += 1;
            }
            node = node.ensure_child(ch);
        }

        if is_new {
            node.increment_word_count();
        }
        node.set_terminal_word(word.to_string());

        Ok(is_new)
    }

    /// Follows `prefix` from the root, returning the landing node if every
    /// edge exists.
    fn descend(&self, prefix: &str) -> Option<&TrieNode> {
        prefix.chars().try_fold(&self.root, |node, ch| node.child(ch))
    }

    /// Finds every inserted word that starts with `prefix`.
    ///
    /// The empty prefix returns every word in the trie.
    pub fn get_by_prefix<P>(&self, prefix: P) -> BTreeSet<String>
    where
        P: AsRef<str>,
    {
        let mut words = BTreeSet::new();
        if let Some(node) = self.descend(prefix.as_ref()) {
            node.collect_words(&mut words);
        }
        words
    }

    /// Counts the inserted words that start with `prefix`.
    pub fn count_by_prefix<P>(&self, prefix: P) -> usize
    where
        P: AsRef<str>,
    {
        self.descend(prefix.as_ref())
            .map_or(0, TrieNode::word_count)
    }

    /// Returns the only inserted word starting with `prefix`, or `None` when
    /// zero or several words share it.
    pub fn unique_completion<P>(&self, prefix: P) -> Option<&str>
    where
        P: AsRef<str>,
    {
        let mut node = self.descend(prefix.as_ref())?;
        if node.word_count() != 1 {
            return None;
        }

        // Every node lies on the path of some word, so a subtree holding a
        // single word is a chain leading straight to it.
        loop {
            if let Some(word) = node.terminal_word() {
                return Some(word);
            }
            node = node
                .children()
                .map(|(_, child)| child)
                .find(|child| child.word_count() > 0)?;
        }
    }

    /// Checks whether `word` itself was inserted.
    pub fn contains<W>(&self, word: W) -> bool
    where
        W: AsRef<str>,
    {
        self.descend(word.as_ref())
            .is_some_and(TrieNode::is_terminal)
    }

    /// Returns every word in the trie.
    pub fn words(&self) -> BTreeSet<String> {
        self.get_by_prefix("")
    }

    /// Returns the number of distinct words in the trie.
    pub fn len(&self) -> usize {
        self.root.word_count()
    }

    /// Checks if the trie holds no words.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of nodes, root included.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the length in edges of the longest root-to-node path.
    pub fn max_depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending = vec![(&self.root, 0usize)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children().map(|(_, child)| (child, depth + 1)));
        }
        deepest
    }
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}
