//! File drivers behind the command-line interface.
//!
//! These functions own all of the I/O: they stream text line by line through
//! the codec and move trie snapshots to and from disk. The reader/writer
//! variants are generic so tests can drive them from memory.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, info};

use crate::codec::{tokenizer, TrieCompressor, TrieDecompressor};
use crate::config::{SnapshotConfig, SqueezeConfig};
use crate::data_structures::{Alphabet, PrefixTrie, TrieConfig};
use crate::error::{SqueezeError, SqueezeResult};
use crate::snapshot::TrieSnapshot;

/// Figures gathered while compressing a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompressionStats {
    /// Number of lines read
    pub lines: usize,
    /// Number of word tokens compressed
    pub words: usize,
    /// Number of distinct words in the trie
    pub distinct_words: usize,
    /// Bytes of input text
    pub input_bytes: usize,
    /// Bytes of compressed text
    pub output_bytes: usize,
}

impl CompressionStats {
    /// Compressed size over original size; 1.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            1.0
        } else {
            self.output_bytes as f64 / self.input_bytes as f64
        }
    }
}

/// Figures gathered while decompressing a text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecompressionStats {
    /// Number of lines read
    pub lines: usize,
    /// Number of word tokens expanded
    pub words: usize,
    /// Bytes of reconstructed text
    pub output_bytes: usize,
}

/// Summary of a stored trie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrieSummary {
    /// Number of distinct words
    pub words: usize,
    /// Number of nodes, root included
    pub nodes: usize,
    /// Longest root-to-node path
    pub max_depth: usize,
    /// Alphabet the trie accepts
    pub alphabet: Alphabet,
}

impl From<&PrefixTrie> for TrieSummary {
    fn from(trie: &PrefixTrie) -> Self {
        Self {
            words: trie.len(),
            nodes: trie.node_count(),
            max_depth: trie.max_depth(),
            alphabet: trie.config().alphabet,
        }
    }
}

/// Calls `f` for every line of `reader`, line terminators included.
fn for_each_line<R, F>(mut reader: R, mut f: F) -> SqueezeResult<usize>
where
    R: BufRead,
    F: FnMut(&str) -> SqueezeResult<()>,
{
    let mut line = String::new();
    let mut lines = 0;
    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            return Ok(lines);
        }
        lines += 1;
        f(&line)?;
    }
}

/// Learns every word of `reader` into a new compressor.
pub fn learn<R: BufRead>(reader: R, config: &TrieConfig) -> SqueezeResult<TrieCompressor> {
    let mut compressor = TrieCompressor::with_config(config.clone());
    let lines = for_each_line(reader, |line| {
        compressor.learn_text(line)?;
        Ok(())
    })?;
    debug!(lines, words = compressor.trie().len(), "Trie built");
    Ok(compressor)
}

/// Writes the compressed form of every line of `reader` to `writer`.
pub fn compress_stream<R, W>(
    compressor: &TrieCompressor,
    reader: R,
    mut writer: W,
) -> SqueezeResult<CompressionStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = CompressionStats {
        distinct_words: compressor.trie().len(),
        ..CompressionStats::default()
    };

    stats.lines = for_each_line(reader, |line| {
        let compressed = compressor.compress_line(line);
        stats.words += tokenizer::words(line).count();
        stats.input_bytes += line.len();
        stats.output_bytes += compressed.len();
        writer.write_all(compressed.as_bytes())?;
        Ok(())
    })?;

    writer.flush()?;
    Ok(stats)
}

/// Writes the expanded form of every line of `reader` to `writer`.
pub fn decompress_stream<R, W>(
    decompressor: &TrieDecompressor,
    reader: R,
    mut writer: W,
) -> SqueezeResult<DecompressionStats>
where
    R: BufRead,
    W: Write,
{
    let mut stats = DecompressionStats::default();

    stats.lines = for_each_line(reader, |line| {
        let restored = decompressor.decompress_line(line);
        stats.words += tokenizer::words(line).count();
        stats.output_bytes += restored.len();
        writer.write_all(restored.as_bytes())?;
        Ok(())
    })?;

    writer.flush()?;
    Ok(stats)
}

/// Writes `trie` to `path` as a JSON snapshot.
pub fn save_snapshot(trie: &PrefixTrie, path: &Path, config: &SnapshotConfig) -> SqueezeResult<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    TrieSnapshot::capture(trie).write_to(&mut writer, config.pretty)?;
    writer.flush()?;
    debug!(path = %path.display(), "Snapshot written");
    Ok(())
}

/// Reads and validates the snapshot at `path`.
pub fn load_snapshot(path: &Path) -> SqueezeResult<PrefixTrie> {
    let snapshot = TrieSnapshot::read_from(BufReader::new(File::open(path)?))?;
    Ok(snapshot.restore()?)
}

/// Whether `candidate` names the same file as the existing file `existing`.
/// A candidate that does not exist yet cannot be that file.
fn is_same_file(existing: &Path, candidate: &Path) -> SqueezeResult<bool> {
    match candidate.canonicalize() {
        Ok(candidate) => Ok(candidate == existing.canonicalize()?),
        Err(_) => Ok(false),
    }
}

/// Refuses output paths that would overwrite the input or each other.
fn check_distinct_paths(input: &Path, output: &Path, snapshot: &Path) -> SqueezeResult<()> {
    for (role, path) in [("output", output), ("snapshot", snapshot)] {
        if is_same_file(input, path)? {
            return Err(SqueezeError::Custom(format!(
                "{role} path {} is the input file",
                path.display()
            )));
        }
    }
    if output == snapshot || is_same_file(output, snapshot).unwrap_or(false) {
        return Err(SqueezeError::Custom(format!(
            "output and snapshot are both {}",
            output.display()
        )));
    }
    Ok(())
}

/// Compresses the text file `input` into `output` and stores the trie at
/// `snapshot`.
///
/// The input is read twice: once to learn every word, once to compress.
/// Neither `output` nor `snapshot` may name the input file.
pub fn compress_file(
    input: &Path,
    output: &Path,
    snapshot: &Path,
    config: &SqueezeConfig,
) -> SqueezeResult<CompressionStats> {
    check_distinct_paths(input, output, snapshot)?;
    let compressor = learn(BufReader::new(File::open(input)?), &config.trie)?;

    let writer = BufWriter::new(File::create(output)?);
    let stats = compress_stream(&compressor, BufReader::new(File::open(input)?), writer)?;

    save_snapshot(compressor.trie(), snapshot, &config.snapshot)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        snapshot = %snapshot.display(),
        lines = stats.lines,
        words = stats.words,
        distinct_words = stats.distinct_words,
        ratio = stats.ratio(),
        "Compression finished"
    );
    Ok(stats)
}

/// Expands the compressed file `input` with the trie stored at `snapshot`,
/// writing the text to `writer`.
pub fn decompress_file<W: Write>(
    snapshot: &Path,
    input: &Path,
    writer: W,
) -> SqueezeResult<DecompressionStats> {
    let decompressor = TrieDecompressor::new(load_snapshot(snapshot)?);
    let stats = decompress_stream(&decompressor, BufReader::new(File::open(input)?), writer)?;

    info!(
        input = %input.display(),
        snapshot = %snapshot.display(),
        lines = stats.lines,
        words = stats.words,
        "Decompression finished"
    );
    Ok(stats)
}

/// Lists every word of the stored trie that starts with `prefix`.
pub fn query_snapshot(snapshot: &Path, prefix: &str) -> SqueezeResult<Vec<String>> {
    let trie = load_snapshot(snapshot)?;
    Ok(trie.get_by_prefix(prefix).into_iter().collect())
}

/// Summarizes the stored trie.
pub fn inspect_snapshot(snapshot: &Path) -> SqueezeResult<TrieSummary> {
    Ok(TrieSummary::from(&load_snapshot(snapshot)?))
}
