// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! CLI smoke tests for the `ytree` binary's non-interactive surface: argument
//! parsing and validation happen before the interactive shell is entered, so
//! these don't depend on a pseudo-terminal.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_order_and_bulk_insert_args() {
    Command::cargo_bin("ytree")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("ordered key-value index"));
}

#[test]
fn rejects_order_below_minimum() {
    Command::cargo_bin("ytree")
        .unwrap()
        .arg("2")
        .write_stdin("q\n")
        .assert()
        .failure();
}

#[test]
fn rejects_order_above_maximum() {
    Command::cargo_bin("ytree")
        .unwrap()
        .arg("101")
        .write_stdin("q\n")
        .assert()
        .failure();
}

#[test]
fn rejects_non_numeric_order() {
    Command::cargo_bin("ytree")
        .unwrap()
        .arg("not-a-number")
        .write_stdin("q\n")
        .assert()
        .failure();
}

#[test]
fn bulk_insert_rejects_missing_file() {
    Command::cargo_bin("ytree")
        .unwrap()
        .args(["4", "/nonexistent/path/to/keys.txt"])
        .write_stdin("q\n")
        .assert()
        .failure();
}
