//! Trie snapshots.
//!
//! A snapshot is the trie's node graph flattened in pre-order: every node
//! records the edge that leads to it, its terminal word and how many children
//! follow it. Restoring rebuilds the graph without re-inserting words and
//! rejects any list that does not describe a well-formed trie.

use std::io::{Read, Write};

use serde::{Deserialize, Serialize};

use crate::data_structures::{Alphabet, PrefixTrie, TrieConfig, TrieError, TrieNode, TrieResult};
use crate::error::SqueezeResult;

/// Format version written into every snapshot.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One node of a pre-order trie listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotNode {
    /// Edge character from the parent; absent only for the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edge: Option<char>,

    /// Terminal word stored at this node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub word: Option<String>,

    /// Number of children listed right after this node's subtree starts
    #[serde(default)]
    pub children: usize,
}

/// Serializable form of a whole [`PrefixTrie`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrieSnapshot {
    /// Format version
    pub version: u32,

    /// Alphabet of the captured trie
    pub alphabet: Alphabet,

    /// Number of distinct words in the trie
    pub word_count: usize,

    /// Nodes in pre-order, root first
    pub nodes: Vec<SnapshotNode>,
}

/// A node under construction during restore.
struct Frame {
    node: TrieNode,
    edge: Option<char>,
    remaining: usize,
}

impl TrieSnapshot {
    /// Flattens `trie` into a snapshot.
    pub fn capture(trie: &PrefixTrie) -> Self {
        let mut nodes = Vec::with_capacity(trie.node_count());
        let mut pending = vec![(None, trie.root())];

        while let Some((edge, node)) = pending.pop() {
            nodes.push(SnapshotNode {
                edge,
                word: node.terminal_word().map(str::to_string),
                children: node.child_count(),
            });
            // Reversed so the smallest edge is listed first
            pending.extend(node.children().rev().map(|(ch, child)| (Some(ch), child)));
        }

        Self {
            version: SNAPSHOT_VERSION,
            alphabet: trie.config().alphabet,
            word_count: trie.len(),
            nodes,
        }
    }

    /// Rebuilds the trie described by this snapshot.
    ///
    /// # Returns
    ///
    /// * `Ok(PrefixTrie)` - A trie isomorphic to the captured one.
    /// * `Err(TrieError::CorruptTrie)` - If the listing is not a valid trie.
    pub fn restore(&self) -> TrieResult<PrefixTrie> {
        if self.version != SNAPSHOT_VERSION {
            return Err(TrieError::corrupt(format!(
                "unsupported snapshot version {} (expected {SNAPSHOT_VERSION})",
                self.version
            )));
        }

        let mut entries = self.nodes.iter();
        let root = entries
            .next()
            .ok_or_else(|| TrieError::corrupt("snapshot has no root node"))?;
        if let Some(ch) = root.edge {
            return Err(TrieError::corrupt(format!("root node carries edge {ch:?}")));
        }
        check_word(root.word.as_deref(), "")?;

        let mut path = String::new();
        let mut stack = vec![Frame {
            node: TrieNode::with_word(root.word.clone()),
            edge: None,
            remaining: root.children,
        }];
        let mut node_count = 1;

        let root = loop {
            // Fold every finished frame into its parent
            let finished = match stack.last() {
                Some(top) if top.remaining == 0 => stack.pop(),
                _ => None,
            };
            if let Some(frame) = finished {
                let Some(ch) = frame.edge else {
                    break frame.node;
                };
                if !frame.node.is_terminal() && frame.node.child_count() == 0 {
                    return Err(TrieError::corrupt(format!("dead branch at {path:?}")));
                }
                path.pop();
                let Some(parent) = stack.last_mut() else {
                    return Err(TrieError::corrupt("orphaned node"));
                };
                if !parent.node.attach_child(ch, frame.node) {
                    return Err(TrieError::corrupt(format!(
                        "duplicate edge {ch:?} under {path:?}"
                    )));
                }
                continue;
            }

            let entry = entries
                .next()
                .ok_or_else(|| TrieError::corrupt("node list ends inside the tree"))?;
            let ch = entry
                .edge
                .ok_or_else(|| TrieError::corrupt(format!("node under {path:?} has no edge")))?;
            if !self.alphabet.permits(ch) {
                return Err(TrieError::corrupt(format!(
                    "edge {ch:?} is outside the {} alphabet",
                    self.alphabet
                )));
            }

            if let Some(parent) = stack.last_mut() {
                parent.remaining -= 1;
            }
            path.push(ch);
            check_word(entry.word.as_deref(), &path)?;

            stack.push(Frame {
                node: TrieNode::with_word(entry.word.clone()),
                edge: Some(ch),
                remaining: entry.children,
            });
            node_count += 1;
        };

        let trailing = entries.count();
        if trailing > 0 {
            return Err(TrieError::corrupt(format!(
                "{trailing} node(s) listed after the tree ends"
            )));
        }

        let trie = PrefixTrie::from_root(
            root,
            node_count,
            TrieConfig {
                alphabet: self.alphabet,
            },
        );
        if trie.len() != self.word_count {
            return Err(TrieError::corrupt(format!(
                "snapshot declares {} words but holds {}",
                self.word_count,
                trie.len()
            )));
        }

        tracing::debug!(
            words = trie.len(),
            nodes = trie.node_count(),
            "Restored trie from snapshot"
        );
        Ok(trie)
    }

    /// Writes the snapshot as JSON.
    pub fn write_to<W: Write>(&self, writer: W, pretty: bool) -> SqueezeResult<()> {
        if pretty {
            serde_json::to_writer_pretty(writer, self)?;
        } else {
            serde_json::to_writer(writer, self)?;
        }
        Ok(())
    }

    /// Reads a JSON snapshot. The listing is not validated until
    /// [`TrieSnapshot::restore`].
    pub fn read_from<R: Read>(reader: R) -> SqueezeResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }
}

fn check_word(word: Option<&str>, path: &str) -> TrieResult<()> {
    match word {
        Some(word) if word != path => Err(TrieError::corrupt(format!(
            "word {word:?} stored at path {path:?}"
        ))),
        _ => Ok(()),
    }
}

impl From<&PrefixTrie> for TrieSnapshot {
    fn from(trie: &PrefixTrie) -> Self {
        Self::capture(trie)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_trie() -> PrefixTrie {
        let mut trie = PrefixTrie::new();
        for word in ["and", "andy", "bob"] {
            trie.insert(word).unwrap();
        }
        trie
    }

    fn node(edge: Option<char>, word: Option<&str>, children: usize) -> SnapshotNode {
        SnapshotNode {
            edge,
            word: word.map(str::to_string),
            children,
        }
    }

    /// Snapshot of a trie holding only "ab".
    fn ab_snapshot() -> TrieSnapshot {
        TrieSnapshot {
            version: SNAPSHOT_VERSION,
            alphabet: Alphabet::Unicode,
            word_count: 1,
            nodes: vec![
                node(None, None, 1),
                node(Some('a'), None, 1),
                node(Some('b'), Some("ab"), 0),
            ],
        }
    }

    fn corrupt_reason(snapshot: &TrieSnapshot) -> String {
        match snapshot.restore() {
            Err(TrieError::CorruptTrie(reason)) => reason,
            other => panic!("expected a corrupt trie, got {other:?}"),
        }
    }

    #[test]
    fn test_capture_is_preorder() {
        let snapshot = TrieSnapshot::capture(&scenario_trie());
        let edges: String = snapshot.nodes.iter().filter_map(|n| n.edge).collect();

        assert_eq!(edges, "andybob");
        assert_eq!(snapshot.nodes[0], node(None, None, 2));
        assert_eq!(snapshot.nodes[3], node(Some('d'), Some("and"), 1));
        assert_eq!(snapshot.word_count, 3);
    }

    #[test]
    fn test_restore_is_exact() {
        let trie = scenario_trie();
        let restored = TrieSnapshot::capture(&trie).restore().unwrap();

        assert_eq!(restored, trie);
        assert_eq!(restored.get_by_prefix("a"), trie.get_by_prefix("a"));
        assert_eq!(restored.count_by_prefix("an"), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let mut trie = PrefixTrie::with_config(TrieConfig {
            alphabet: Alphabet::Byte,
        });
        for word in ["", "naïve", "na", "x"] {
            trie.insert(word).unwrap();
        }

        let mut buffer = Vec::new();
        TrieSnapshot::capture(&trie).write_to(&mut buffer, false).unwrap();
        let restored = TrieSnapshot::read_from(buffer.as_slice())
            .unwrap()
            .restore()
            .unwrap();

        assert_eq!(restored, trie);
        assert_eq!(restored.config().alphabet, Alphabet::Byte);
    }

    #[test]
    fn test_valid_listing_restores() {
        let trie = ab_snapshot().restore().unwrap();
        assert!(trie.contains("ab"));
        assert_eq!(trie.node_count(), 3);
    }

    #[test]
    fn test_rejects_wrong_version() {
        let mut snapshot = ab_snapshot();
        snapshot.version = 99;
        assert!(corrupt_reason(&snapshot).contains("version"));
    }

    #[test]
    fn test_rejects_missing_root() {
        let mut snapshot = ab_snapshot();
        snapshot.nodes.clear();
        assert!(corrupt_reason(&snapshot).contains("no root"));

        let mut snapshot = ab_snapshot();
        snapshot.nodes[0].edge = Some('r');
        assert!(corrupt_reason(&snapshot).contains("root"));
    }

    #[test]
    fn test_rejects_inconsistent_word() {
        let mut snapshot = ab_snapshot();
        snapshot.nodes[2].word = Some("ba".to_string());
        assert!(corrupt_reason(&snapshot).contains("\"ba\""));
    }

    #[test]
    fn test_rejects_duplicate_edge() {
        let snapshot = TrieSnapshot {
            word_count: 2,
            nodes: vec![
                node(None, None, 2),
                node(Some('a'), Some("a"), 0),
                node(Some('a'), Some("a"), 0),
            ],
            ..ab_snapshot()
        };
        assert!(corrupt_reason(&snapshot).contains("duplicate edge"));
    }

    #[test]
    fn test_rejects_dead_branch() {
        let snapshot = TrieSnapshot {
            word_count: 0,
            nodes: vec![node(None, None, 1), node(Some('a'), None, 0)],
            ..ab_snapshot()
        };
        assert!(corrupt_reason(&snapshot).contains("dead branch"));
    }

    #[test]
    fn test_rejects_truncated_and_trailing_lists() {
        let mut snapshot = ab_snapshot();
        snapshot.nodes.pop();
        assert!(corrupt_reason(&snapshot).contains("ends inside"));

        let mut snapshot = ab_snapshot();
        snapshot.nodes.push(node(Some('c'), Some("c"), 0));
        assert!(corrupt_reason(&snapshot).contains("after the tree ends"));
    }

    #[test]
    fn test_rejects_missing_edge_and_alphabet_violation() {
        let mut snapshot = ab_snapshot();
        snapshot.nodes[1].edge = None;
        assert!(corrupt_reason(&snapshot).contains("no edge"));

        let mut snapshot = ab_snapshot();
        snapshot.alphabet = Alphabet::Ascii;
        snapshot.nodes[1].edge = Some('é');
        snapshot.nodes[2].word = Some("éb".to_string());
        assert!(corrupt_reason(&snapshot).contains("alphabet"));
    }

    #[test]
    fn test_rejects_word_count_mismatch() {
        let mut snapshot = ab_snapshot();
        snapshot.word_count = 5;
        assert!(corrupt_reason(&snapshot).contains("declares 5 words"));
    }

    #[test]
    fn test_read_rejects_malformed_json() {
        assert!(TrieSnapshot::read_from("{\"version\": 1".as_bytes()).is_err());
    }

    #[test]
    fn test_very_long_word_capture_and_restore() {
        let long = "q".repeat(150_000);
        let mut trie = PrefixTrie::new();
        trie.insert(&long).unwrap();
        trie.insert("qr").unwrap();

        let snapshot = TrieSnapshot::capture(&trie);
        assert_eq!(snapshot.nodes.len(), 150_002);

        let mut buffer = Vec::new();
        snapshot.write_to(&mut buffer, false).unwrap();
        let restored = TrieSnapshot::read_from(buffer.as_slice())
            .unwrap()
            .restore()
            .unwrap();

        assert_eq!(restored, trie);
        assert_eq!(restored.len(), 2);
        assert_eq!(restored.root().word_count(), 2);
        assert_eq!(restored.unique_completion("qq"), Some(long.as_str()));
    }
}
