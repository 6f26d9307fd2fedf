// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Error types for ytree operations.

use std::fmt;

/// Standard Result type for all ytree operations.
pub type YtreeResult<T> = Result<T, YtreeError>;

/// Error types for ytree operations.
#[derive(Debug)]
pub enum YtreeError {
    /// Order requested at open/configure time falls outside `[3, 100]`.
    InvalidOrder { order: u16 },

    /// Schema index requested at `db_open` exceeds the environment's schema
    /// capacity.
    InvalidSchemaIndex { index: u16, capacity: u16 },

    /// I/O failure while opening or writing the environment file.
    Io(std::io::Error),

    /// The environment file exists but its header failed validation (bad
    /// magic, truncated, or checksum mismatch).
    CorruptedHeader { reason: String },

    /// Caller asked the environment to reconstruct a tree from an existing
    /// on-disk file. Deliberately unimplemented; see design notes.
    UnsupportedOnDiskRead,

    /// A structural invariant was found violated (a node's parent pointer
    /// does not index back to the node, a leaf chain is broken, etc). This
    /// indicates a bug in the engine rather than bad input.
    InvariantViolation { detail: String },
}

impl fmt::Display for YtreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOrder { order } => {
                write!(f, "invalid order {}: must be in range 3..=100", order)
            }
            Self::InvalidSchemaIndex { index, capacity } => write!(
                f,
                "schema index {} out of bounds for environment capacity {}",
                index, capacity
            ),
            Self::Io(err) => write!(f, "I/O error: {}", err),
            Self::CorruptedHeader { reason } => {
                write!(f, "corrupted environment header: {}", reason)
            }
            Self::UnsupportedOnDiskRead => {
                write!(f, "reading a tree back from an existing environment file is not supported")
            }
            Self::InvariantViolation { detail } => {
                write!(f, "structural invariant violated: {}", detail)
            }
        }
    }
}

impl std::error::Error for YtreeError {}

impl From<std::io::Error> for YtreeError {
    fn from(err: std::io::Error) -> Self {
        YtreeError::Io(err)
    }
}
