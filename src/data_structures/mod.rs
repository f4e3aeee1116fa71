//! Data structures for prefix compression.
//!
//! This module contains the trie that maps every word of a text onto a
//! unique character path. It performs no I/O of its own.

pub mod prefix_trie;

// Re-export common data structures
pub use prefix_trie::{Alphabet, PrefixTrie, TrieConfig, TrieError, TrieNode, TrieResult};
