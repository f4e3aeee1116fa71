//! Error types for the prefix trie.
//!
//! This module defines the error types that can occur while inserting into
//! a prefix trie or rebuilding one from a snapshot.

use super::Alphabet;

/// Errors that can occur in prefix trie operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrieError {
    /// A word contains a character the configured alphabet does not cover.
    #[error("Character {ch:?} in word '{word}' is outside the {alphabet} alphabet")]
    UnsupportedCharacter {
        /// The offending character.
        ch: char,
        /// The word that was being inserted.
        word: String,
        /// The alphabet the trie was configured with.
        alphabet: Alphabet,
    },

    /// A reconstructed node graph violates the trie invariants.
    #[error("Corrupt trie: {0}")]
    CorruptTrie(String),
}

impl TrieError {
    pub(crate) fn corrupt<S: Into<String>>(reason: S) -> Self {
        Self::CorruptTrie(reason.into())
    }
}
