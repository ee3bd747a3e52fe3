//! Bounded memo for shortened hash/address display strings

use std::collections::{HashMap, VecDeque};

/// Insertion-order bounded cache: at capacity, inserting a new key evicts
/// the oldest inserted key. Re-inserting an existing key replaces its value
/// without counting as a new insertion.
#[derive(Debug)]
pub struct DisplayCache {
    capacity: usize,
    entries: HashMap<String, String>,
    order: VecDeque<String>,
}

impl DisplayCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|s| s.as_str())
    }

    pub fn insert(&mut self, key: &str, value: String) {
        if self.entries.insert(key.to_string(), value).is_some() {
            return;
        }
        self.order.push_back(key.to_string());
        while self.order.len() > self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
    }

    /// Fetch the memoized rendering for `key`, computing and caching it on
    /// a miss.
    pub fn get_or_insert_with<F>(&mut self, key: &str, render: F) -> String
    where
        F: FnOnce() -> String,
    {
        if let Some(hit) = self.entries.get(key) {
            return hit.clone();
        }
        let value = render();
        self.insert(key, value.clone());
        value
    }
}

/// Shorten a 0x-prefixed hash or address to `0xabcd…ef12` form. Snapshot
/// strings are arbitrary user input, so slicing stays on char boundaries;
/// values too short to shorten come back unchanged.
pub fn short_hex(value: &str) -> String {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    if stripped.chars().count() <= 10 {
        return value.to_string();
    }
    let prefix: String = stripped.chars().take(6).collect();
    let suffix: String = {
        let tail: Vec<char> = stripped.chars().rev().take(4).collect();
        tail.into_iter().rev().collect()
    };
    format!("0x{prefix}…{suffix}")
}
