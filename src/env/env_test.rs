// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use tempfile::tempdir;

#[test]
fn open_creates_file_with_header_when_missing() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.ydb");
    assert!(!path.exists());

    let env = Environment::open(&path, flags::VERBOSE).unwrap();
    assert!(path.exists());
    assert_eq!(env.page_size(), header::DEFAULT_PAGE_SIZE);
    assert_eq!(env.flags(), flags::VERBOSE);
    env.close().unwrap();
}

#[test]
fn reopening_existing_file_validates_header() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.ydb");

    Environment::open(&path, 0).unwrap().close().unwrap();

    let reopened = Environment::open(&path, 0).unwrap();
    assert_eq!(reopened.page_size(), header::DEFAULT_PAGE_SIZE);
}

#[test]
fn reopening_corrupted_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.ydb");
    std::fs::write(&path, b"not a ytree file at all").unwrap();

    assert!(Environment::open(&path, 0).is_err());
}

#[test]
fn db_open_rejects_out_of_range_schema_index() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.ydb");
    let env = Environment::open(&path, 0).unwrap();

    let capacity = env.schema_capacity();
    assert!(env.db_open(capacity, None).is_err());
    assert!(env.db_open(0, None).is_ok());
}

#[test]
fn db_open_rejects_hash_index_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.ydb");
    let env = Environment::open(&path, flags::INDEX_HASH).unwrap();

    assert!(matches!(
        env.db_open(0, None),
        Err(crate::error::YtreeError::InvariantViolation { .. })
    ));
}

#[test]
fn read_tree_is_unsupported() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("test.ydb");
    let env = Environment::open(&path, 0).unwrap();

    assert!(matches!(
        env.read_tree(0),
        Err(crate::error::YtreeError::UnsupportedOnDiskRead)
    ));
}
