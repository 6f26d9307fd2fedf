// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! ytree - an ordered key -> value index backed by an in-memory B+ tree.
//!
//! ## Quick start
//!
//! ```
//! use ytree::{Database, Record};
//!
//! let mut db = Database::open(None).unwrap();
//! db.insert(1, Record::new_int(100));
//! db.insert(2, Record::new_int(200));
//!
//! assert_eq!(db.find(&1), Some(&Record::Int(100)));
//! assert_eq!(db.count(), 2);
//!
//! db.delete(&1);
//! assert_eq!(db.find(&1), None);
//! ```
//!
//! ## Architecture
//!
//! - [`btree`]: the B+ tree engine itself — node layout, insertion/split,
//!   search, and deletion/coalesce/redistribute. This is the core this
//!   crate is about; everything else is a thin collaborator around it.
//! - [`database`]: [`Database`], the facade wrapping a `BPlusTree<i32, Record>`
//!   with the release-hook and schema-index bookkeeping the raw tree
//!   doesn't know about.
//! - [`env`]: the file-backed environment that owns a schema table of
//!   database handles. The on-disk tree format is intentionally
//!   incomplete — see [`env::Environment::read_tree`].
//! - [`error`]: [`YtreeError`] / [`YtreeResult`], the error type shared by
//!   every public operation.
//!
//! ## Non-goals
//!
//! No concurrency, transactions, crash recovery, durability, variable-length
//! or duplicate keys, secondary indexes, or a network/query interface. See
//! SPEC_FULL.md for the full rationale.

pub mod btree;
pub mod database;
pub mod env;
pub mod error;

pub use btree::{BPlusTree, Order};
pub use database::{Database, Record};
pub use env::Environment;
pub use error::{YtreeError, YtreeResult};
