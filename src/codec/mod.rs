//! Prefix compression codec.
//!
//! [`TrieCompressor`] learns the words of a text and shortens each to its
//! unique prefix; [`TrieDecompressor`] expands those prefixes again using the
//! same trie. Both work line by line on [`tokenizer`] output, so separators
//! and line breaks pass through untouched.

pub mod compressor;
pub mod decompressor;
pub mod tokenizer;

pub use compressor::TrieCompressor;
pub use decompressor::TrieDecompressor;
pub use tokenizer::{tokenize, Token};
