// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for Partitioner and Intent Router events, emitted once
//! during scheduler construction.

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// Partitioning of a connected component started.
pub struct PartitionStarted {
    pub component_index: usize,
    pub vertex_count: usize,
}

impl Display for PartitionStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "partitioning component {}: {} vertices",
            self.component_index, self.vertex_count
        )
    }
}

impl StructuredLog for PartitionStarted {
    fn log(&self) {
        tracing::info!(
            component_index = self.component_index,
            vertex_count = self.vertex_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "partition",
            span_name = name,
            component_index = self.component_index,
            vertex_count = self.vertex_count,
        )
    }
}

/// A vertex was classified as Local or RemoteProxy.
pub struct VertexClassified<'a> {
    pub vertex: &'a str,
    pub local: bool,
}

impl Display for VertexClassified<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "vertex '{}' classified as {}",
            self.vertex,
            if self.local { "local" } else { "remote-proxy" }
        )
    }
}

impl StructuredLog for VertexClassified<'_> {
    fn log(&self) {
        tracing::debug!(vertex = self.vertex, local = self.local, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "vertex_classified",
            span_name = name,
            vertex = self.vertex,
            local = self.local,
        )
    }
}

/// A subscription intent was sent to a peer for a non-local upstream.
pub struct IntentSent<'a> {
    pub consumer: &'a str,
    pub producer: &'a str,
}

impl Display for IntentSent<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "sent intent: consumer '{}' subscribing to producer '{}'",
            self.consumer, self.producer
        )
    }
}

impl StructuredLog for IntentSent<'_> {
    fn log(&self) {
        tracing::info!(consumer = self.consumer, producer = self.producer, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "intent_sent",
            span_name = name,
            consumer = self.consumer,
            producer = self.producer,
        )
    }
}

/// Sending a subscription intent failed. Logged rather than propagated --
/// a single unreachable peer shouldn't prevent the scheduler from
/// constructing the rest of its graph.
pub struct IntentSendFailed<'a> {
    pub consumer: &'a str,
    pub producer: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for IntentSendFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "failed to send intent for consumer '{}' / producer '{}': {}",
            self.consumer, self.producer, self.error
        )
    }
}

impl StructuredLog for IntentSendFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            consumer = self.consumer,
            producer = self.producer,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "intent_send_failed",
            span_name = name,
            consumer = self.consumer,
            producer = self.producer,
            error = %self.error,
        )
    }
}

/// Partitioning completed for the whole graph.
pub struct PartitionCompleted {
    pub local_count: usize,
    pub proxy_count: usize,
    pub level_count: usize,
}

impl Display for PartitionCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "partitioned graph into {} levels: {} local tasklets, {} remote-proxy tasklets",
            self.level_count, self.local_count, self.proxy_count
        )
    }
}

impl StructuredLog for PartitionCompleted {
    fn log(&self) {
        tracing::info!(
            local_count = self.local_count,
            proxy_count = self.proxy_count,
            level_count = self.level_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "partition_completed",
            span_name = name,
            local_count = self.local_count,
            proxy_count = self.proxy_count,
            level_count = self.level_count,
        )
    }
}
