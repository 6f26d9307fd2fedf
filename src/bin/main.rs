// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! `ytree` command-line entry point: parses the optional order and
//! bulk-insert-file arguments, then hands off to the interactive shell.

mod shell;

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use ytree::btree::Order;

/// Interactive ytree B+ tree console.
#[derive(Parser, Debug)]
#[command(name = "ytree", version, about = "An ordered key-value index backed by an in-memory B+ tree")]
struct Cli {
    /// Tree order (3..=100). Defaults to 4.
    order: Option<u16>,

    /// Path to a newline-separated list of integer keys to bulk-insert
    /// (each inserted as both key and value) before the prompt appears.
    bulk_insert_path: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(order) = cli.order {
        Order::new(order).with_context(|| format!("invalid order {}", order))?;
    }

    shell::run(cli.order, cli.bulk_insert_path.as_deref())
}
