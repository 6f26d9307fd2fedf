// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! In-memory B+ tree: the ordered index engine underneath [`crate::database::Database`].
//!
//! Submodules:
//! - [`types`]: `Order` (validated degree) and `NodeId` (arena index).
//! - [`node`]: the tagged `Node` variant (`Internal` / `Leaf`).
//! - [`tree`]: `BPlusTree`, owning the node arena and implementing the
//!   insert/split and delete/coalesce/redistribute protocols.
//! - [`iter`]: leaf-chain iteration for full scans and range queries.

pub mod iter;
pub mod node;
pub mod tree;
pub mod types;

pub use iter::Iter;
pub use node::{InternalNode, LeafNode, Node};
pub use tree::BPlusTree;
pub use types::{cut, NodeId, Order};
