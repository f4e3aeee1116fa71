//! Node implementation for the prefix trie.
//!
//! Nodes are the building blocks of the trie. Each node owns its children
//! outright, so the whole structure is a plain tree without shared links.
//!
//! A single long word nests one node per character, so nothing here may
//! recurse per level. Cloning, comparing, recounting and dropping all walk
//! the tree with an explicit stack.

use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::fmt;
use std::mem;

/// A node in the prefix trie.
///
/// Each node represents one position in the character-path space. A node
/// whose path spells an inserted word stores that word as its terminal word.
#[derive(Default)]
pub struct TrieNode {
    /// Children keyed by edge character, kept ordered for reproducible walks
    children: BTreeMap<char, TrieNode>,

    /// The inserted word whose path ends here, if any
    terminal_word: Option<String>,

    /// Number of terminal words in this subtree, this node included
    word_count: usize,
}

impl TrieNode {
    /// Creates a new empty trie node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a childless node holding the given terminal word.
    pub(crate) fn with_word(terminal_word: Option<String>) -> Self {
        Self {
            children: BTreeMap::new(),
            terminal_word,
            word_count: 0,
        }
    }

    /// Returns the child reached through `ch`, if present.
    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    /// Returns the child reached through `ch`, creating an empty one first if
    /// it does not exist yet.
    pub fn ensure_child(&mut self, ch: char) -> &mut TrieNode {
        self.children.entry(ch).or_default()
    }

    /// Attaches a fully built child. Returns `false` if an edge for `ch`
    /// already exists, in which case nothing is changed.
    pub(crate) fn attach_child(&mut self, ch: char, child: TrieNode) -> bool {
        if self.children.contains_key(&ch) {
            return false;
        }
        self.children.insert(ch, child);
        true
    }

    /// Gathers every terminal word in this subtree into `into`.
    pub fn collect_words(&self, into: &mut BTreeSet<String>) {
        let mut pending = vec![self];
        while let Some(node) = pending.pop() {
            if let Some(word) = &node.terminal_word {
                into.insert(word.clone());
            }
            pending.extend(node.children.values());
        }
    }

    /// The word stored at this node, if any.
    pub fn terminal_word(&self) -> Option<&str> {
        self.terminal_word.as_deref()
    }

    /// Whether some inserted word ends at this node.
    pub fn is_terminal(&self) -> bool {
        self.terminal_word.is_some()
    }

    /// Iterates over the outgoing edges in character order.
    pub fn children(&self) -> impl DoubleEndedIterator<Item = (char, &TrieNode)> + '_ {
        self.children.iter().map(|(ch, child)| (*ch, child))
    }

    /// Number of outgoing edges.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    /// Number of terminal words in this subtree, this node included.
    pub fn word_count(&self) -> usize {
        self.word_count
    }

    /// Stores `word` as this node's terminal word.
    pub(crate) fn set_terminal_word(&mut self, word: String) {
        self.terminal_word = Some(word);
    }

    pub(crate) fn increment_word_count(&mut self) {
        self.word_count += 1;
    }

    /// Recomputes the cached word counts of the whole subtree and returns the
    /// count of this node.
    pub(crate) fn recount(&mut self) -> usize {
        let mut stack = vec![RecountFrame::open('\0', mem::take(self))];

        while let Some(frame) = stack.last_mut() {
            if let Some((edge, child)) = frame.pending.next() {
                stack.push(RecountFrame::open(edge, child));
                continue;
            }
            if let Some(RecountFrame { edge, node, .. }) = stack.pop() {
                match stack.last_mut() {
                    Some(parent) => {
                        parent.node.word_count += node.word_count;
                        parent.node.children.insert(edge, node);
                    }
                    None => *self = node,
                }
            }
        }

        self.word_count
    }

    /// Copies everything but the children.
    fn detached_copy(&self) -> TrieNode {
        TrieNode {
            children: BTreeMap::new(),
            terminal_word: self.terminal_word.clone(),
            word_count: self.word_count,
        }
    }
}

/// A node taken out of the tree while its children are recounted.
struct RecountFrame {
    edge: char,
    node: TrieNode,
    pending: btree_map::IntoIter<char, TrieNode>,
}

impl RecountFrame {
    fn open(edge: char, mut node: TrieNode) -> Self {
        let pending = mem::take(&mut node.children).into_iter();
        node.word_count = usize::from(node.terminal_word.is_some());
        Self {
            edge,
            node,
            pending,
        }
    }
}

/// A node being copied while its children are still visited.
struct CloneFrame<'a> {
    edge: char,
    copy: TrieNode,
    pending: btree_map::Iter<'a, char, TrieNode>,
}

impl Clone for TrieNode {
    fn clone(&self) -> Self {
        let mut stack = vec![CloneFrame {
            edge: '\0',
            copy: self.detached_copy(),
            pending: self.children.iter(),
        }];
        let mut cloned = TrieNode::new();

        while let Some(frame) = stack.last_mut() {
            if let Some((&edge, child)) = frame.pending.next() {
                stack.push(CloneFrame {
                    edge,
                    copy: child.detached_copy(),
                    pending: child.children.iter(),
                });
                continue;
            }
            if let Some(CloneFrame { edge, copy, .. }) = stack.pop() {
                match stack.last_mut() {
                    Some(parent) => {
                        parent.copy.children.insert(edge, copy);
                    }
                    None => cloned = copy,
                }
            }
        }

        cloned
    }
}

impl PartialEq for TrieNode {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((left, right)) = pending.pop() {
            if left.terminal_word != right.terminal_word
                || left.word_count != right.word_count
                || left.children.len() != right.children.len()
            {
                return false;
            }
            for ((left_edge, left_child), (right_edge, right_child)) in
                left.children.iter().zip(&right.children)
            {
                if left_edge != right_edge {
                    return false;
                }
                pending.push((left_child, right_child));
            }
        }
        true
    }
}

impl Eq for TrieNode {}

impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut pending: Vec<TrieNode> = mem::take(&mut self.children).into_values().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(mem::take(&mut node.children).into_values());
        }
    }
}

impl fmt::Debug for TrieNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Only the outgoing edges, never the subtrees
        f.debug_struct("TrieNode")
            .field("edges", &self.children.keys().collect::<Vec<_>>())
            .field("terminal_word", &self.terminal_word)
            .field("word_count", &self.word_count)
            .finish()
    }
}
