// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! File-backed environment: the thin, intentionally incomplete on-disk
//! layer sketched in the original source.
//!
//! An [`Environment`] owns one backing file and a schema table sized by
//! its page size; each schema slot can host one [`crate::database::Database`]
//! handle. Per SPEC_FULL.md §6/§9, opening an *existing* file validates
//! only the header — reconstructing a tree from the file is out of scope
//! and [`Environment::read_tree`] always fails with
//! [`crate::error::YtreeError::UnsupportedOnDiskRead`].

pub mod header;

pub use header::flags;

use crate::database::Database;
use crate::error::{YtreeError, YtreeResult};
use header::{Header, HEADER_SIZE, SCHEMA_SLOT_SIZE};
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// A file-backed database environment.
pub struct Environment {
    file: std::fs::File,
    header: Header,
    path: PathBuf,
}

impl Environment {
    /// Open `path`. If the file does not exist, create it with the
    /// `"YTREE01"` header, default page size (1024), and an empty schema
    /// area. If it exists, open it for read+write and validate the
    /// header only — see [`Environment::read_tree`].
    pub fn open(path: impl AsRef<Path>, flags: u8) -> YtreeResult<Self> {
        let path = path.as_ref().to_path_buf();

        if path.exists() {
            let mut file = OpenOptions::new().read(true).write(true).open(&path)?;
            let mut buf = [0u8; HEADER_SIZE];
            file.read_exact(&mut buf)?;
            let header = Header::from_bytes(&buf)?;
            Ok(Self { file, header, path })
        } else {
            let mut file = OpenOptions::new()
                .read(true)
                .write(true)
                .create(true)
                .open(&path)?;
            let header = Header::new(flags);
            file.write_all(&header.to_bytes())?;
            let schema_area = vec![0u8; header.schema_capacity() as usize * SCHEMA_SLOT_SIZE];
            file.write_all(&schema_area)?;
            file.flush()?;
            Ok(Self { file, header, path })
        }
    }

    /// Release the file and any in-memory state. Consumes the handle.
    pub fn close(self) -> YtreeResult<()> {
        self.file.sync_all()?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn page_size(&self) -> u16 {
        self.header.page_size
    }

    pub fn flags(&self) -> u8 {
        self.header.flags
    }

    /// Number of schema slots this environment's page size can hold.
    pub fn schema_capacity(&self) -> u16 {
        self.header.schema_capacity()
    }

    /// Open an empty, in-memory [`Database`] handle at `schema_index`.
    /// `schema_index` must be bounded by [`Environment::schema_capacity`].
    pub fn db_open(&self, schema_index: u16, order: Option<u16>) -> YtreeResult<Database> {
        let capacity = self.schema_capacity();
        if schema_index >= capacity {
            return Err(YtreeError::InvalidSchemaIndex {
                index: schema_index,
                capacity,
            });
        }
        if self.header.flags & flags::INDEX_HASH != 0 {
            return Err(YtreeError::InvariantViolation {
                detail: "hash indexing is unimplemented; only the B+Tree index is supported".to_string(),
            });
        }
        Database::with_schema(schema_index, order)
    }

    /// Reconstruct a tree previously written to this environment's file.
    ///
    /// Deliberately unimplemented: the read path in the original source
    /// is stubbed out with an `assert(0)` and never completed (see
    /// SPEC_FULL.md §9's open questions). Always returns
    /// [`YtreeError::UnsupportedOnDiskRead`].
    pub fn read_tree(&self, _schema_index: u16) -> YtreeResult<Database> {
        Err(YtreeError::UnsupportedOnDiskRead)
    }
}

#[cfg(test)]
#[path = "env_test.rs"]
mod env_test;
