//! Test utilities and fixtures for Prefix Squeeze.
//!
//! This module provides reusable strategies for property-based tests and a
//! temporary-directory fixture for tests that touch the filesystem.

use proptest::prelude::*;
use proptest::strategy::{BoxedStrategy, Strategy};
use std::path::PathBuf;
use tempfile::TempDir;

use crate::data_structures::PrefixTrie;

/// Maximum number of words in a generated vocabulary.
const MAX_VOCABULARY: usize = 40;

/// Create a temporary directory for test files.
pub fn create_test_dir() -> std::io::Result<TempDir> {
    tempfile::tempdir()
}

/// Generate short words over a small alphabet, so that shared prefixes and
/// prefix-of-another-word cases come up often.
pub fn word_strategy() -> BoxedStrategy<String> {
    "[a-d]{1,6}".boxed()
}

/// Generate words that may use any Unicode scalar value.
pub fn unicode_word_strategy() -> BoxedStrategy<String> {
    proptest::collection::vec(proptest::char::any(), 0..8)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .boxed()
}

/// Generate a list of words with repeats allowed.
pub fn vocabulary_strategy() -> BoxedStrategy<Vec<String>> {
    proptest::collection::vec(word_strategy(), 1..MAX_VOCABULARY).boxed()
}

/// Generate multi-line text made of words from a small alphabet, mixed
/// digits and punctuation.
pub fn text_strategy() -> BoxedStrategy<String> {
    let line = proptest::collection::vec(("[a-d0-9]{1,6}", "[ ,.;!?-]{1,3}"), 0..12).prop_map(
        |pairs| {
            pairs
                .into_iter()
                .map(|(word, sep)| format!("{word}{sep}"))
                .collect::<String>()
        },
    );
    proptest::collection::vec(line, 0..6)
        .prop_map(|lines| lines.join("\n"))
        .boxed()
}

/// Build a trie from `words`.
pub fn trie_of<S: AsRef<str>>(words: &[S]) -> PrefixTrie {
    let mut trie = PrefixTrie::new();
    for word in words {
        trie.insert(word.as_ref()).expect("unicode trie accepts every word");
    }
    trie
}

/// Test fixture for tests that read and write files.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: create_test_dir()?,
        })
    }

    /// Path of `name` inside the fixture directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.temp_dir.path().join(name)
    }

    /// Write `contents` to `name` inside the fixture directory.
    pub fn write_file(&self, name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.path(name);
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}
