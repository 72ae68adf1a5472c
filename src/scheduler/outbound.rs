// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The Outbound Routing Map: a lookup relation from a local producer vertex
//! to the peer vertices that subscribed to its output. Populated during
//! partitioning, while Local tasklets that will hold an `Arc` to this same
//! map are still being constructed, so recording uses a `RwLock` rather
//! than requiring `&mut self` -- reads and writes are both cheap and never
//! held across an `.await`.

use std::collections::HashMap;
use std::sync::RwLock;

#[derive(Debug, Default)]
pub struct OutboundRoutingMap {
    destinations: RwLock<HashMap<String, Vec<String>>>,
}

impl OutboundRoutingMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `consumer` (a non-local vertex) subscribes to `producer`'s
    /// (a local vertex's) output.
    pub fn record(&self, producer: impl Into<String>, consumer: impl Into<String>) {
        self.destinations
            .write()
            .unwrap()
            .entry(producer.into())
            .or_default()
            .push(consumer.into());
    }

    /// The peers subscribed to `producer`'s output, if any. An absent entry
    /// and an empty list mean the same thing, so we only ever insert
    /// non-empty lists.
    pub fn destinations_for(&self, producer: &str) -> Option<Vec<String>> {
        self.destinations.read().unwrap().get(producer).cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.destinations.read().unwrap().is_empty()
    }

    pub fn len(&self) -> usize {
        self.destinations.read().unwrap().len()
    }
}
