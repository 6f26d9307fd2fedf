// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! The B+ tree engine: arena-resident nodes addressed by `NodeId`, with
//! the insertion/split and deletion/coalesce/redistribute protocols.
//!
//! Nodes never move once allocated; a `NodeId` is simply an index into
//! `arena`. This sidesteps the parent/child reference cycle that a
//! pointer-based design would create (see DESIGN.md).

use super::iter::Iter;
use super::node::{InternalNode, LeafNode, Node};
use super::types::{cut, NodeId, Order};

/// An in-memory B+ tree mapping `K` to `V`.
#[derive(Debug)]
pub struct BPlusTree<K, V> {
    arena: Vec<Option<Node<K, V>>>,
    free: Vec<NodeId>,
    root: Option<NodeId>,
    order: Order,
}

impl<K: Ord + Clone, V> BPlusTree<K, V> {
    pub fn new(order: Order) -> Self {
        Self {
            arena: Vec::new(),
            free: Vec::new(),
            root: None,
            order,
        }
    }

    pub fn order(&self) -> Order {
        self.order
    }

    /// Change the configured order. No-op if the tree is not empty, per
    /// the database handle's `order()` contract.
    pub fn set_order(&mut self, order: Order) {
        if self.is_empty() {
            self.order = order;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    // -- arena -----------------------------------------------------------

    fn alloc(&mut self, node: Node<K, V>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.arena[id.0] = Some(node);
            id
        } else {
            self.arena.push(Some(node));
            NodeId(self.arena.len() - 1)
        }
    }

    fn free_node(&mut self, id: NodeId) {
        self.arena[id.0] = None;
        self.free.push(id);
    }

    pub(super) fn get(&self, id: NodeId) -> &Node<K, V> {
        self.arena[id.0].as_ref().expect("dangling NodeId")
    }

    fn get_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        self.arena[id.0].as_mut().expect("dangling NodeId")
    }

    fn leftmost_leaf(&self) -> Option<NodeId> {
        let mut current = self.root?;
        loop {
            match self.get(current) {
                Node::Leaf(_) => return Some(current),
                Node::Internal(n) => current = n.children[0],
            }
        }
    }

    // -- search ------------------------------------------------------------

    /// Descend from the root to the leaf that would hold `key`, without
    /// checking whether `key` is actually present.
    pub fn find_leaf(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root?;
        loop {
            match self.get(current) {
                Node::Leaf(_) => return Some(current),
                Node::Internal(n) => {
                    let idx = n.find_child_index(key);
                    current = n.children[idx];
                }
            }
        }
    }

    pub fn find(&self, key: &K) -> Option<&V> {
        let leaf_id = self.find_leaf(key)?;
        let leaf = self.get(leaf_id).as_leaf();
        let idx = leaf.find_index(key)?;
        Some(&leaf.values[idx])
    }

    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// In-order iterator over the whole tree via the leaf chain.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self, self.leftmost_leaf(), 0, None)
    }

    /// Inclusive range scan. Empty if `lo > hi` or the tree is empty.
    pub fn range(&self, lo: &K, hi: &K) -> Vec<(&K, &V)> {
        if lo > hi {
            return Vec::new();
        }
        let Some(leaf_id) = self.find_leaf(lo) else {
            return Vec::new();
        };
        let leaf = self.get(leaf_id).as_leaf();
        let start_idx = leaf.keys.partition_point(|k| k < lo);
        Iter::new(self, Some(leaf_id), start_idx, Some(hi.clone())).collect()
    }

    /// Number of live keys, computed by walking the leaf chain.
    pub fn count(&self) -> usize {
        let mut total = 0;
        let mut current = self.leftmost_leaf();
        while let Some(id) = current {
            let leaf = self.get(id).as_leaf();
            total += leaf.keys.len();
            current = leaf.next;
        }
        total
    }

    /// Number of edges from the root to a leaf (0 for a single-leaf or
    /// empty tree).
    pub fn height(&self) -> usize {
        let mut depth = 0;
        let mut current = self.root;
        while let Some(id) = current {
            match self.get(id) {
                Node::Leaf(_) => break,
                Node::Internal(n) => {
                    current = Some(n.children[0]);
                    depth += 1;
                }
            }
        }
        depth
    }

    /// Keys grouped by level, root first, for level-order printing.
    ///
    /// Uses a plain `VecDeque` rather than the original source's trick of
    /// repurposing the leaf chain's `next` field as a BFS queue.
    pub fn levels(&self) -> Vec<Vec<Vec<K>>> {
        let mut result = Vec::new();
        let Some(root) = self.root else {
            return result;
        };

        let mut queue: std::collections::VecDeque<NodeId> = std::collections::VecDeque::new();
        queue.push_back(root);
        let mut current_level_size = 1;

        while !queue.is_empty() {
            let mut level = Vec::with_capacity(current_level_size);
            let mut next_level_size = 0;
            for _ in 0..current_level_size {
                let id = queue.pop_front().expect("level size matches queue length");
                let node = self.get(id);
                level.push(node.keys().to_vec());
                if let Node::Internal(n) = node {
                    next_level_size += n.children.len();
                    queue.extend(n.children.iter().copied());
                }
            }
            result.push(level);
            current_level_size = next_level_size;
        }

        result
    }

    // -- insertion -----------------------------------------------------

    /// Insert `(key, value)`. A no-op if `key` is already present.
    pub fn insert(&mut self, key: K, value: V) {
        if self.contains(&key) {
            return;
        }

        if self.root.is_none() {
            let mut leaf = LeafNode::new();
            leaf.insert_sorted(key, value);
            let id = self.alloc(Node::Leaf(leaf));
            self.root = Some(id);
            return;
        }

        let leaf_id = self.find_leaf(&key).expect("non-empty tree has a leaf");
        self.get_mut(leaf_id).as_leaf_mut().insert_sorted(key, value);

        if self.get(leaf_id).num_keys() > self.order.max_keys() {
            self.split_leaf(leaf_id);
        }
    }

    fn split_leaf(&mut self, leaf_id: NodeId) {
        let split_at = cut(self.order.max_keys());
        let (new_keys, new_values, old_next) = {
            let leaf = self.get_mut(leaf_id).as_leaf_mut();
            let new_keys = leaf.keys.split_off(split_at);
            let new_values = leaf.values.split_off(split_at);
            (new_keys, new_values, leaf.next)
        };
        let promoted_key = new_keys[0].clone();

        let mut new_leaf = LeafNode::new();
        new_leaf.keys = new_keys;
        new_leaf.values = new_values;
        new_leaf.next = old_next;
        let new_id = self.alloc(Node::Leaf(new_leaf));

        self.get_mut(leaf_id).as_leaf_mut().next = Some(new_id);
        let parent = self.get(leaf_id).parent();
        self.get_mut(new_id).set_parent(parent);

        self.insert_into_parent(leaf_id, promoted_key, new_id);
    }

    fn split_internal(&mut self, node_id: NodeId) {
        let split_at = cut(self.order.value() as usize) - 1;
        let parent = self.get(node_id).parent();

        let (promoted_key, new_keys, new_children) = {
            let node = self.get_mut(node_id).as_internal_mut();
            let new_keys = node.keys.split_off(split_at + 1);
            let promoted_key = node.keys.pop().expect("internal overflow has a promotable key");
            let new_children = node.children.split_off(split_at + 1);
            (promoted_key, new_keys, new_children)
        };

        let new_id = self.alloc(Node::Internal(InternalNode::new(new_keys, new_children, parent)));
        let moved_children: Vec<NodeId> = self.get(new_id).as_internal().children.clone();
        for child in moved_children {
            self.get_mut(child).set_parent(Some(new_id));
        }

        self.insert_into_parent(node_id, promoted_key, new_id);
    }

    fn insert_into_parent(&mut self, left: NodeId, key: K, right: NodeId) {
        match self.get(left).parent() {
            None => self.insert_into_new_root(left, key, right),
            Some(parent_id) => {
                let pos = self
                    .get(parent_id)
                    .as_internal()
                    .child_position(left)
                    .expect("left child missing from its recorded parent");
                self.get_mut(parent_id)
                    .as_internal_mut()
                    .insert_key_child(pos, key, right);

                if self.get(parent_id).num_keys() > self.order.max_keys() {
                    self.split_internal(parent_id);
                }
            }
        }
    }

    fn insert_into_new_root(&mut self, left: NodeId, key: K, right: NodeId) {
        let node = InternalNode::new(vec![key], vec![left, right], None);
        let root_id = self.alloc(Node::Internal(node));
        self.get_mut(left).set_parent(Some(root_id));
        self.get_mut(right).set_parent(Some(root_id));
        self.root = Some(root_id);
    }

    // -- deletion --------------------------------------------------------

    /// Remove `key` and return its value, if present. A no-op returning
    /// `None` if the key is absent.
    pub fn delete(&mut self, key: &K) -> Option<V> {
        let leaf_id = self.find_leaf(key)?;
        let idx = self.get(leaf_id).as_leaf().find_index(key)?;
        let value = {
            let leaf = self.get_mut(leaf_id).as_leaf_mut();
            leaf.keys.remove(idx);
            leaf.values.remove(idx)
        };
        self.delete_entry(leaf_id, key, None);
        Some(value)
    }

    /// Remove every key. The tree is empty but still usable afterward.
    pub fn purge(&mut self) {
        self.arena.clear();
        self.free.clear();
        self.root = None;
    }

    fn delete_entry(&mut self, node_id: NodeId, key: &K, removed_child: Option<NodeId>) {
        if let Some(child) = removed_child {
            self.get_mut(node_id)
                .as_internal_mut()
                .remove_key_and_child(key, child);
        }

        if self.root == Some(node_id) {
            self.adjust_root();
            return;
        }

        let is_leaf = self.get(node_id).is_leaf();
        let min_keys = if is_leaf {
            self.order.min_leaf_keys()
        } else {
            self.order.min_internal_keys()
        };

        if self.get(node_id).num_keys() >= min_keys {
            return;
        }

        self.handle_underflow(node_id, is_leaf);
    }

    fn adjust_root(&mut self) {
        let root_id = self.root.expect("adjust_root requires a root");
        if self.get(root_id).num_keys() > 0 {
            return;
        }
        if self.get(root_id).is_leaf() {
            self.free_node(root_id);
            self.root = None;
        } else {
            let only_child = self.get(root_id).as_internal().children[0];
            self.get_mut(only_child).set_parent(None);
            self.free_node(root_id);
            self.root = Some(only_child);
        }
    }

    fn handle_underflow(&mut self, node_id: NodeId, is_leaf: bool) {
        let parent_id = self
            .get(node_id)
            .parent()
            .expect("non-root underflow always has a parent");

        let node_index = self
            .get(parent_id)
            .as_internal()
            .child_position(node_id)
            .expect("node missing from its recorded parent");

        // neighbor_index == -1 (node is the leftmost child) means the
        // "neighbor" is the right sibling instead of the usual left one.
        let neighbor_is_left = node_index > 0;
        let neighbor_id = if neighbor_is_left {
            self.get(parent_id).as_internal().children[node_index - 1]
        } else {
            self.get(parent_id).as_internal().children[node_index + 1]
        };

        // Preserved from the source: k_prime_index is 0 when the node is
        // the leftmost child, even though the general rule would be
        // node_index - 1.
        let k_prime_index = if neighbor_is_left { node_index - 1 } else { 0 };
        let k_prime = self.get(parent_id).as_internal().keys[k_prime_index].clone();

        let combined = self.get(neighbor_id).num_keys() + self.get(node_id).num_keys();
        let capacity = if is_leaf {
            self.order.value() as usize
        } else {
            self.order.max_keys()
        };

        if combined < capacity {
            self.coalesce(node_id, neighbor_id, neighbor_is_left, k_prime, parent_id);
        } else {
            self.redistribute(node_id, neighbor_id, neighbor_is_left, k_prime_index, parent_id);
        }
    }

    fn coalesce(
        &mut self,
        node_id: NodeId,
        neighbor_id: NodeId,
        neighbor_is_left: bool,
        k_prime: K,
        parent_id: NodeId,
    ) {
        // The surviving node is always the physically left one; swap
        // roles if `node_id` itself is the leftmost child.
        let (left_id, right_id) = if neighbor_is_left {
            (neighbor_id, node_id)
        } else {
            (node_id, neighbor_id)
        };

        if self.get(right_id).is_leaf() {
            let (moved_keys, moved_values, right_next) = {
                let right = self.get_mut(right_id).as_leaf_mut();
                (
                    std::mem::take(&mut right.keys),
                    std::mem::take(&mut right.values),
                    right.next,
                )
            };
            let left = self.get_mut(left_id).as_leaf_mut();
            left.keys.extend(moved_keys);
            left.values.extend(moved_values);
            left.next = right_next;
        } else {
            let (moved_keys, moved_children) = {
                let right = self.get_mut(right_id).as_internal_mut();
                (
                    std::mem::take(&mut right.keys),
                    std::mem::take(&mut right.children),
                )
            };
            {
                let left = self.get_mut(left_id).as_internal_mut();
                left.keys.push(k_prime.clone());
                left.keys.extend(moved_keys);
                left.children.extend(moved_children.iter().copied());
            }
            for child in moved_children {
                self.get_mut(child).set_parent(Some(left_id));
            }
        }

        self.free_node(right_id);
        self.delete_entry(parent_id, &k_prime, Some(right_id));
    }

    fn redistribute(
        &mut self,
        node_id: NodeId,
        neighbor_id: NodeId,
        neighbor_is_left: bool,
        k_prime_index: usize,
        parent_id: NodeId,
    ) {
        if self.get(node_id).is_leaf() {
            if neighbor_is_left {
                let (key, value) = {
                    let neighbor = self.get_mut(neighbor_id).as_leaf_mut();
                    (
                        neighbor.keys.pop().expect("neighbor has a key to lend"),
                        neighbor.values.pop().expect("neighbor has a value to lend"),
                    )
                };
                {
                    let node = self.get_mut(node_id).as_leaf_mut();
                    node.keys.insert(0, key.clone());
                    node.values.insert(0, value);
                }
                self.get_mut(parent_id).as_internal_mut().keys[k_prime_index] = key;
            } else {
                let (key, value) = {
                    let neighbor = self.get_mut(neighbor_id).as_leaf_mut();
                    (neighbor.keys.remove(0), neighbor.values.remove(0))
                };
                {
                    let node = self.get_mut(node_id).as_leaf_mut();
                    node.keys.push(key);
                    node.values.push(value);
                }
                let new_first = self.get(neighbor_id).as_leaf().keys[0].clone();
                self.get_mut(parent_id).as_internal_mut().keys[k_prime_index] = new_first;
            }
        } else if neighbor_is_left {
            let (moved_key, moved_child) = {
                let neighbor = self.get_mut(neighbor_id).as_internal_mut();
                (
                    neighbor.keys.pop().expect("neighbor has a key to lend"),
                    neighbor.children.pop().expect("neighbor has a child to lend"),
                )
            };
            let k_prime = self.get(parent_id).as_internal().keys[k_prime_index].clone();
            {
                let node = self.get_mut(node_id).as_internal_mut();
                node.keys.insert(0, k_prime);
                node.children.insert(0, moved_child);
            }
            self.get_mut(moved_child).set_parent(Some(node_id));
            self.get_mut(parent_id).as_internal_mut().keys[k_prime_index] = moved_key;
        } else {
            let (moved_key, moved_child) = {
                let neighbor = self.get_mut(neighbor_id).as_internal_mut();
                (neighbor.keys.remove(0), neighbor.children.remove(0))
            };
            let k_prime = self.get(parent_id).as_internal().keys[k_prime_index].clone();
            {
                let node = self.get_mut(node_id).as_internal_mut();
                node.keys.push(k_prime);
                node.children.push(moved_child);
            }
            self.get_mut(moved_child).set_parent(Some(node_id));
            self.get_mut(parent_id).as_internal_mut().keys[k_prime_index] = moved_key;
        }
    }
}

#[cfg(test)]
impl<K: Ord + Clone, V> BPlusTree<K, V> {
    pub(super) fn root_for_test(&self) -> Option<NodeId> {
        self.root
    }

    pub(super) fn node_for_test(&self, id: NodeId) -> &Node<K, V> {
        self.get(id)
    }
}

#[cfg(test)]
#[path = "tree_test.rs"]
mod tree_test;
