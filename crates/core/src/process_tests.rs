// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::collections::HashMap;

#[test]
fn display_joins_fields() {
    let key = ProcessKey::new("alpha", 4, "hdfs", "namenode");
    assert_eq!(key.to_string(), "alpha/4/hdfs/namenode");
}

#[test]
fn usable_as_map_key() {
    let mut map = HashMap::new();
    map.insert(ProcessKey::new("c", 1, "a", "r"), 100);
    assert_eq!(map.get(&ProcessKey::new("c", 1, "a", "r")), Some(&100));
    assert_eq!(map.get(&ProcessKey::new("c", 2, "a", "r")), None);
}

#[test]
fn revision_distinguishes_keys() {
    let a = ProcessKey::new("c", 1, "a", "r");
    let b = ProcessKey::new("c", 2, "a", "r");
    assert_ne!(a, b);
}
