//! Shortest-unique-prefix compressor.
//!
//! The compressor learns every word of a text into its own trie first and
//! only then replaces each word by the shortest prefix no other learned word
//! shares. Words that are a strict prefix of another learned word can never
//! be shortened and are emitted whole.

use super::tokenizer::{self, Token};
use crate::data_structures::{PrefixTrie, TrieConfig, TrieResult};

/// Replaces words by their shortest unique prefix within a private trie.
#[derive(Debug, Clone, Default)]
pub struct TrieCompressor {
    trie: PrefixTrie,
}

impl TrieCompressor {
    /// Creates a compressor with an empty Unicode trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a compressor whose trie uses `config`.
    pub fn with_config(config: TrieConfig) -> Self {
        Self {
            trie: PrefixTrie::with_config(config),
        }
    }

    /// Inserts every token, in order.
    ///
    /// # Returns
    ///
    /// The number of tokens that were not already known.
    pub fn build<I, S>(&mut self, tokens: I) -> TrieResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut added = 0;
        for token in tokens {
            if self.trie.insert(token)? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Tokenizes `text` and inserts its words.
    pub fn learn_text(&mut self, text: &str) -> TrieResult<usize> {
        self.build(tokenizer::words(text))
    }

    /// Returns the shortest prefix of `word` that exactly one learned word
    /// starts with, considering lengths `0..len(word)` in characters. Falls
    /// back to the whole word when none of those prefixes is unique.
    pub fn compress<'w>(&self, word: &'w str) -> &'w str {
        let mut node = self.trie.root();
        for (idx, ch) in word.char_indices() {
            if node.word_count() == 1 {
                return &word[..idx];
            }
            match node.child(ch) {
                Some(child) => node = child,
                None => break,
            }
        }
        word
    }

    /// Compresses every word of `line`, copying separators verbatim.
    pub fn compress_line(&self, line: &str) -> String {
        let mut out = String::with_capacity(line.len());
        for token in tokenizer::tokenize(line) {
            match token {
                Token::Word(word) => out.push_str(self.compress(word)),
                Token::Separator(text) => out.push_str(text),
            }
        }
        out
    }

    /// Returns the learned trie.
    pub fn trie(&self) -> &PrefixTrie {
        &self.trie
    }

    /// Consumes the compressor, returning its trie for persistence.
    pub fn into_trie(self) -> PrefixTrie {
        self.trie
    }
}
