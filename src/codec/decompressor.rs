//! Prefix decompressor.
//!
//! Expands every compressed prefix back to the one word of the trie that
//! carries it. The expansion is only correct against the exact trie the
//! compressor learned; any other trie silently yields wrong words.

use super::tokenizer::{self, Token};
use crate::data_structures::PrefixTrie;

/// Expands compressed prefixes using a previously built trie.
#[derive(Debug, Clone)]
pub struct TrieDecompressor {
    trie: PrefixTrie,
}

impl TrieDecompressor {
    /// Creates a decompressor over `trie`.
    pub fn new(trie: PrefixTrie) -> Self {
        Self { trie }
    }

    /// Returns the word uniquely identified by `prefix`, or `prefix` itself
    /// when zero or several words carry it.
    pub fn decompress<'a>(&'a self, prefix: &'a str) -> &'a str {
        self.trie.unique_completion(prefix).unwrap_or(prefix)
    }

    /// Expands every word token of `line`, copying separators verbatim.
    pub fn decompress_line(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len() * 2);
        for token in tokenizer::tokenize(line) {
            match token {
                Token::Word(prefix) => out.push_str(self.decompress(prefix)),
                Token::Separator(text) => out.push_str(text),
            }
        }
        out
    }

    /// Returns the trie used for expansion.
    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }
}

impl From<PrefixTrie> for TrieDecompressor {
    fn from(trie: PrefixTrie) -> Self {
        Self::new(trie)
    }
}
