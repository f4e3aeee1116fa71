//! Test modules for Prefix Squeeze.
//!
//! This module holds tests that span several components:
//! - Property-based tests of the trie laws using proptest
//! - Codec and snapshot round trips over generated text
//! - Configuration loading and error reporting

pub mod config_tests;
pub mod test_utils;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{
    text_strategy, trie_of, unicode_word_strategy, vocabulary_strategy, word_strategy,
    TestFixture,
};
