// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-host scheduling core for a distributed Root Cause Analysis (RCA)
//! computation graph.
//!
//! Given a static RCA graph, a host identity, and a network transport
//! facade, this crate (a) partitions the graph into locally-executable
//! vertices and remote-proxy placeholders, (b) arranges them into
//! dependency levels, (c) injects subscription intents for remote data and
//! registers local vertices whose outputs peers want, and (d) on every
//! scheduler tick drives one full evaluation pass with bounded concurrency,
//! advances each vertex's own tick cadence, and persists results.
//!
//! What this crate does *not* own: the metric-reader data source, the
//! on-disk result store, the network hopper's wire protocol and peer
//! discovery, individual vertex evaluation logic, and result persistence
//! schemas. Those are the [`collab`] traits this crate consumes; callers
//! supply concrete implementations.

pub mod collab;
pub mod errors;
pub mod graph;
pub mod host;
pub mod observability;
pub mod scheduler;

#[cfg(test)]
pub mod testing;

pub use errors::SchedulerError;
pub use scheduler::Scheduler;
