// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

//! Interactive shell (REPL) implementation.
//!
//! Single-letter commands, one per line, mirroring the original `ytree.c`
//! console: `i k`, `d k`, `f k`, `r k1 k2`, `p k`, `t`, `l`, `v`, `a`, `x`, `q`.

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::fs;
use std::path::Path;
use ytree::{Database, Record};

pub fn run(order: Option<u16>, bulk_insert_path: Option<&Path>) -> Result<()> {
    let mut db = Database::open(order).context("failed to open database")?;
    let mut verbose = false;

    println!("ytree version {}", Database::version());
    println!("{}", db.render_status(verbose));
    print_help();

    if let Some(path) = bulk_insert_path {
        bulk_insert(&mut db, path)
            .with_context(|| format!("failed to bulk-insert from {}", path.display()))?;
        println!("{}", db.render_tree());
    }

    let mut rl = DefaultEditor::new()?;

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if !dispatch(trimmed, &mut db, &mut verbose) {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}

/// Returns `false` when the shell should exit (the `q` command).
fn dispatch(line: &str, db: &mut Database, verbose: &mut bool) -> bool {
    let mut parts = line.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };

    match command {
        "i" => match require_int(parts.next()) {
            Some(key) => {
                db.insert(key, Record::new_int(key));
                println!("{}", db.render_tree());
            }
            None => println!("usage: i <key>"),
        },
        "d" => match require_int(parts.next()) {
            Some(key) => {
                db.delete(&key);
                println!("{}", db.render_tree());
            }
            None => println!("usage: d <key>"),
        },
        "f" | "p" => match require_int(parts.next()) {
            Some(key) => println!("{}", db.format_find(key)),
            None => println!("usage: {} <key>", command),
        },
        "r" => {
            let lo = require_int(parts.next());
            let hi = require_int(parts.next());
            match (lo, hi) {
                (Some(lo), Some(hi)) => println!("{}", db.format_range(lo.min(hi), lo.max(hi))),
                _ => println!("usage: r <key1> <key2>"),
            }
        }
        "l" => println!("{}", db.render_leaves()),
        "t" => println!("{}", db.render_tree()),
        "v" => {
            *verbose = !*verbose;
            println!("Verbose output: {}", *verbose);
        }
        "a" => println!("{}", db.render_status(*verbose)),
        "x" => db.purge(),
        "q" => return false,
        _ => print_help(),
    }

    true
}

fn require_int(token: Option<&str>) -> Option<i32> {
    token.and_then(|t| t.parse().ok())
}

fn print_help() {
    println!("Enter any of the following commands after the prompt >>:");
    println!("  i <k>\t\tInsert <k> as both key and value");
    println!("  f <k>\t\tFind the value under key <k>");
    println!("  p <k>\t\tSame as f <k>");
    println!("  r <k1> <k2>\tPrint the keys and values found in the range [<k1>, <k2>]");
    println!("  d <k>\t\tDelete key <k> and its associated value");
    println!("  x\t\tDestroy the whole tree. Start again with an empty tree of the same order");
    println!("  t\t\tPrint the tree in level order");
    println!("  l\t\tPrint the keys of the leaves (bottom row of the tree)");
    println!("  v\t\tToggle verbose status output");
    println!("  a\t\tPrint status");
    println!("  q\t\tQuit (or Ctrl-D)");
}

fn bulk_insert(db: &mut Database, path: &Path) -> Result<()> {
    let contents = fs::read_to_string(path)?;
    for line in contents.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let key: i32 = line
            .parse()
            .with_context(|| format!("invalid integer key: {:?}", line))?;
        db.insert(key, Record::new_int(key));
    }
    Ok(())
}
