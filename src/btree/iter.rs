// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Leaf-chain iterator for in-order traversal and range scans.
//!
//! Walks the singly linked list of leaves left to right, which is where
//! the global key order actually lives once a key has been placed.

use super::tree::BPlusTree;
use super::types::NodeId;

pub struct Iter<'a, K, V> {
    tree: &'a BPlusTree<K, V>,
    current: Option<NodeId>,
    idx: usize,
    hi: Option<K>,
    done: bool,
}

impl<'a, K: Ord + Clone, V> Iter<'a, K, V> {
    pub(super) fn new(
        tree: &'a BPlusTree<K, V>,
        current: Option<NodeId>,
        idx: usize,
        hi: Option<K>,
    ) -> Self {
        Self {
            tree,
            current,
            idx,
            hi,
            done: false,
        }
    }
}

impl<'a, K: Ord + Clone, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        loop {
            let leaf_id = self.current?;
            let leaf = self.tree.get(leaf_id).as_leaf();

            if self.idx >= leaf.keys.len() {
                self.current = leaf.next;
                self.idx = 0;
                if self.current.is_none() {
                    self.done = true;
                    return None;
                }
                continue;
            }

            let key = &leaf.keys[self.idx];
            if let Some(hi) = &self.hi {
                if key > hi {
                    self.done = true;
                    return None;
                }
            }

            let value = &leaf.values[self.idx];
            self.idx += 1;
            return Some((key, value));
        }
    }
}
