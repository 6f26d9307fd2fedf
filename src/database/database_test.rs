// Copyright 2025 Vivian Voss. Licensed under the Apache License, Version 2.0.
// SPDX-License-Identifier: Apache-2.0

use super::*;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn open_defaults_to_order_four_and_schema_zero() {
    let db = Database::open(None).unwrap();
    assert_eq!(db.order(), 4);
    assert_eq!(db.schema_index(), 0);
    assert!(db.is_empty());
}

#[test]
fn open_rejects_invalid_order() {
    assert!(Database::open(Some(2)).is_err());
    assert!(Database::open(Some(101)).is_err());
}

#[test]
fn duplicate_insert_keeps_first_value() {
    let mut db = Database::open(None).unwrap();
    db.insert(7, Record::new_int(1));
    db.insert(7, Record::new_int(2));
    assert_eq!(db.find(&7), Some(&Record::Int(1)));
}

#[test]
fn delete_absent_key_is_noop() {
    let mut db = Database::open(None).unwrap();
    db.delete(&42);
    assert_eq!(db.count(), 0);
}

#[test]
fn release_hook_fires_once_per_blob_on_delete() {
    let released: Rc<RefCell<Vec<Vec<u8>>>> = Rc::new(RefCell::new(Vec::new()));
    let released_clone = released.clone();

    let mut db = Database::open(None).unwrap();
    db.set_release_hook(move |bytes| released_clone.borrow_mut().push(bytes.to_vec()));

    db.insert(1, Record::new_blob(vec![1, 2, 3]));
    db.insert(2, Record::new_int(9));

    db.delete(&2);
    assert!(released.borrow().is_empty(), "non-blob records never reach the hook");

    db.delete(&1);
    assert_eq!(*released.borrow(), vec![vec![1, 2, 3]]);

    db.delete(&1);
    assert_eq!(released.borrow().len(), 1, "second delete of an absent key must not re-fire");
}

#[test]
fn release_hook_fires_on_purge() {
    let released: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
    let released_clone = released.clone();

    let mut db = Database::open(None).unwrap();
    db.set_release_hook(move |_| *released_clone.borrow_mut() += 1);

    db.insert(1, Record::new_blob(vec![0]));
    db.insert(2, Record::new_blob(vec![1]));
    db.insert(3, Record::new_int(5));

    db.purge();

    assert_eq!(*released.borrow(), 2);
    assert!(db.is_empty());
}

#[test]
fn set_order_noop_once_populated() {
    let mut db = Database::open(Some(4)).unwrap();
    db.insert(1, Record::new_int(1));
    db.set_order(10).unwrap();
    assert_eq!(db.order(), 4);
}

#[test]
fn range_and_iter_reflect_tree_contents() {
    let mut db = Database::open(Some(4)).unwrap();
    for k in 1..=10 {
        db.insert(k, Record::new_int(k));
    }
    let keys: Vec<i32> = db.iter().map(|(k, _)| *k).collect();
    assert_eq!(keys, (1..=10).collect::<Vec<_>>());

    let ranged: Vec<i32> = db.range(3, 7).into_iter().map(|(k, _)| *k).collect();
    assert_eq!(ranged, (3..=7).collect::<Vec<_>>());
}
