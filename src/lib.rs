//! Prefix Squeeze Library
//!
//! Prefix Squeeze compresses text by replacing every word with the shortest
//! prefix that no other word of the same text shares, and expands such text
//! again from a stored trie of the original words.
//!
//! # Architecture
//!
//! - [`data_structures`]: the trie itself, free of any I/O
//! - [`codec`]: tokenizer, compressor and decompressor working line by line
//! - [`snapshot`]: structural encoding of a trie for storage
//! - [`commands`]: file drivers used by the command-line binary
//! - [`config`] and [`error`]: layered configuration and error types

pub mod codec;
pub mod commands;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod snapshot;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

/// Version information for Prefix Squeeze.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
