// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! High-level database handle for ytree.
//!
//! `Database` is the facade callers actually use: it owns a
//! [`BPlusTree`] keyed by signed 32-bit integers, plus the bookkeeping the
//! raw tree doesn't know about — the schema slot this handle occupies in
//! its [`crate::env::Environment`] and the optional release hook invoked
//! on blob-typed records when they're freed.
//!
//! ## Quick start
//!
//! ```
//! use ytree::database::{Database, Record};
//!
//! let mut db = Database::open(None).unwrap();
//! db.insert(1, Record::new_int(42));
//! assert_eq!(db.find(&1), Some(&Record::Int(42)));
//! db.delete(&1);
//! assert!(db.is_empty());
//! ```

mod record;

pub use record::Record;

use crate::btree::{BPlusTree, Order};
use crate::error::YtreeResult;

/// Callback invoked exactly once on a blob record's payload at the moment
/// it is freed — during `delete` for that key, or during `purge`/drop.
/// Non-blob records are never passed to the hook.
pub type ReleaseHook = Box<dyn FnMut(&[u8])>;

/// An ordered key -> [`Record`] index, backed by an in-memory B+ tree.
pub struct Database {
    tree: BPlusTree<i32, Record>,
    schema_index: u16,
    release_hook: Option<ReleaseHook>,
}

impl Database {
    /// Open an empty handle at schema slot 0 with the given order (default
    /// 4 when `None`). Mirrors `db_open` with a schema index of zero for
    /// callers that don't go through an [`crate::env::Environment`].
    pub fn open(order: Option<u16>) -> YtreeResult<Self> {
        Self::with_schema(0, order)
    }

    /// Open an empty handle bound to `schema_index` (as assigned by an
    /// environment's schema table).
    pub fn with_schema(schema_index: u16, order: Option<u16>) -> YtreeResult<Self> {
        let order = match order {
            Some(n) => Order::new(n)?,
            None => Order::default_order(),
        };
        Ok(Self {
            tree: BPlusTree::new(order),
            schema_index,
            release_hook: None,
        })
    }

    pub fn schema_index(&self) -> u16 {
        self.schema_index
    }

    pub fn order(&self) -> u16 {
        self.tree.order().value()
    }

    /// Change the configured order. Silently a no-op if the tree already
    /// holds entries, per §4.5.
    pub fn set_order(&mut self, order: u16) -> YtreeResult<()> {
        let order = Order::new(order)?;
        self.tree.set_order(order);
        Ok(())
    }

    /// Install the blob-release callback. Replaces any previously set hook.
    pub fn set_release_hook(&mut self, hook: impl FnMut(&[u8]) + 'static) {
        self.release_hook = Some(Box::new(hook));
    }

    /// Insert `(key, record)`. A no-op if `key` is already present —
    /// duplicates are silently ignored, never reported as an error.
    pub fn insert(&mut self, key: i32, record: Record) {
        self.tree.insert(key, record);
    }

    pub fn find(&self, key: &i32) -> Option<&Record> {
        self.tree.find(key)
    }

    pub fn contains(&self, key: &i32) -> bool {
        self.tree.contains(key)
    }

    /// Remove `key`, if present, freeing its record and invoking the
    /// release hook when the record is a blob. A no-op if absent.
    pub fn delete(&mut self, key: &i32) {
        if let Some(record) = self.tree.delete(key) {
            self.release_if_blob(record);
        }
    }

    /// Inclusive range scan; empty if `lo > hi`.
    pub fn range(&self, lo: i32, hi: i32) -> Vec<(&i32, &Record)> {
        self.tree.range(&lo, &hi)
    }

    /// Full ascending scan via the leaf chain.
    pub fn iter(&self) -> crate::btree::Iter<'_, i32, Record> {
        self.tree.iter()
    }

    /// Empty the tree, invoking the release hook on every blob record
    /// along the way. The handle remains usable afterward.
    pub fn purge(&mut self) {
        if self.release_hook.is_some() {
            let blobs: Vec<Vec<u8>> = self
                .tree
                .iter()
                .filter_map(|(_, record)| match record {
                    Record::Blob(data) => Some(data.clone()),
                    _ => None,
                })
                .collect();
            for data in blobs {
                self.release_if_blob(Record::Blob(data));
            }
        }
        self.tree.purge();
    }

    pub fn count(&self) -> usize {
        self.tree.count()
    }

    pub fn height(&self) -> usize {
        self.tree.height()
    }

    /// Keys grouped by level, root first. Used by the interactive shell's
    /// `t` (print tree) command.
    pub fn levels(&self) -> Vec<Vec<Vec<i32>>> {
        self.tree.levels()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Static crate version string, mirroring `ytree_version()`.
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Render `key`'s record as the shell's `f`/`p` commands do, without
    /// writing anything — the caller decides where the line goes.
    pub fn format_find(&self, key: i32) -> String {
        match self.find(&key) {
            Some(record) => format!("Key: {}  Record: {}", key, Self::format_record(record)),
            None => format!("Key: {}  Record: NULL", key),
        }
    }

    /// Render every record in `[lo, hi]` as the shell's `r` command does.
    pub fn format_range(&self, lo: i32, hi: i32) -> String {
        let results = self.range(lo, hi);
        if results.is_empty() {
            return "None found".to_string();
        }
        results
            .into_iter()
            .map(|(key, record)| format!("Key: {}  Record: {}", key, Self::format_record(record)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render a single record's payload, as the shell prints it.
    pub fn format_record(record: &Record) -> String {
        match record {
            Record::Byte(b) => format!("{}", *b as char),
            Record::Int(i) => i.to_string(),
            Record::Float(f) => f.to_string(),
            Record::Blob(data) => format!("<blob: {} bytes>", data.len()),
        }
    }

    /// Render the tree in level order, one line per level, matching the
    /// shell's `t` command. `"Empty tree"` if there are no entries.
    pub fn render_tree(&self) -> String {
        if self.is_empty() {
            return "Empty tree".to_string();
        }
        self.levels()
            .iter()
            .map(|level| Self::render_level(level))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Render just the leaf row, matching the shell's `l` command.
    /// `"Empty tree."` if there are no entries.
    pub fn render_leaves(&self) -> String {
        if self.is_empty() {
            return "Empty tree.".to_string();
        }
        let leaves = self.levels().pop().unwrap_or_default();
        Self::render_level(&leaves)
    }

    fn render_level(level: &[Vec<i32>]) -> String {
        level
            .iter()
            .map(|keys| {
                keys.iter()
                    .map(|k| k.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    /// Render the `a` command's status block.
    pub fn render_status(&self, verbose: bool) -> String {
        format!(
            "Database status:\n  Schema index {}\n  Index type B+Tree\n  Current order {}\n  Record type INT\n  Verbose output {}\n  Tree height {}\n  Tree empty {}\n  Count {}\n",
            self.schema_index(),
            self.order(),
            if verbose { "on" } else { "off" },
            self.height(),
            if self.is_empty() { "yes" } else { "no" },
            self.count(),
        )
    }

    fn release_if_blob(&mut self, record: Record) {
        if let (Record::Blob(data), Some(hook)) = (&record, self.release_hook.as_mut()) {
            hook(data);
        }
    }
}

impl Drop for Database {
    fn drop(&mut self) {
        self.purge();
    }
}

#[cfg(test)]
#[path = "database_test.rs"]
mod database_test;
