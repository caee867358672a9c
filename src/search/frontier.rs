//! Insertion-ordered, de-duplicated set of live search states.
//!
//! States are keyed by board content. When two paths reach the same
//! board, the one inserted first is kept. Iteration follows insertion
//! order, which makes argmax tie-breaks reproducible.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use crate::game::GameState;

/// A live state and the option indices that produced it from the root.
#[derive(Debug, Clone)]
pub struct Node {
    pub state: GameState,
    pub path: Vec<usize>,
}

#[derive(Debug, Default)]
pub struct Frontier {
    nodes: Vec<Node>,
    /// Content hash -> indices into `nodes` with that hash.
    buckets: HashMap<u64, Vec<usize>>,
}

fn content_hash(state: &GameState) -> u64 {
    let mut h = DefaultHasher::new();
    state.hash(&mut h);
    h.finish()
}

impl Frontier {
    pub fn new() -> Self {
        Frontier::default()
    }

    /// A frontier holding only `root`, reached by the empty path.
    pub fn with_root(root: GameState) -> Self {
        let mut f = Frontier::new();
        f.insert(Node {
            state: root,
            path: Vec::new(),
        });
        f
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Adds `node` unless a state with the same board is already present.
    /// Returns true if the node was added.
    pub fn insert(&mut self, node: Node) -> bool {
        let key = content_hash(&node.state);
        let bucket = self.buckets.entry(key).or_default();
        if bucket.iter().any(|&i| self.nodes[i].state == node.state) {
            return false;
        }
        bucket.push(self.nodes.len());
        self.nodes.push(node);
        true
    }

    /// Drops the lowest-scoring `fraction` of states, rounded down.
    /// Survivors are ordered by descending score; equal scores keep their
    /// insertion order. Returns the number of states dropped.
    pub fn cull(&mut self, fraction: f64) -> usize {
        let drop = (self.nodes.len() as f64 * fraction).floor() as usize;
        if drop == 0 {
            return 0;
        }
        self.nodes.sort_by(|a, b| b.state.score().cmp(&a.state.score()));
        self.nodes.truncate(self.nodes.len() - drop);
        self.rebuild_buckets();
        drop
    }

    fn rebuild_buckets(&mut self) {
        self.buckets.clear();
        for (i, node) in self.nodes.iter().enumerate() {
            self.buckets
                .entry(content_hash(&node.state))
                .or_default()
                .push(i);
        }
    }

    /// The first state holding the highest score.
    pub fn best(&self) -> Option<&Node> {
        let mut best: Option<&Node> = None;
        for node in self.nodes.iter() {
            if best.map_or(true, |b| node.state.score() > b.state.score()) {
                best = Some(node);
            }
        }
        best
    }
}
