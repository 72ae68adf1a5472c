// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for outbound flow-unit delivery, emitted at tick time
//! after a Local tasklet produces a flow unit that peers subscribed to.

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A produced flow unit was handed to the network facade for delivery.
pub struct FlowUnitPublished<'a> {
    pub producer: &'a str,
    pub destinations: &'a [String],
}

impl Display for FlowUnitPublished<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "published flow unit from '{}' to {} destinations",
            self.producer,
            self.destinations.len()
        )
    }
}

impl StructuredLog for FlowUnitPublished<'_> {
    fn log(&self) {
        tracing::debug!(
            producer = self.producer,
            destination_count = self.destinations.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "flow_unit_published",
            span_name = name,
            producer = self.producer,
            destination_count = self.destinations.len(),
        )
    }
}

/// Persisting a flow unit failed. Logged and swallowed — the tick continues
/// rather than aborting over a store outage.
pub struct PersistFailed<'a> {
    pub vertex: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for PersistFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "persisting flow unit for '{}' failed: {}", self.vertex, self.error)
    }
}

impl StructuredLog for PersistFailed<'_> {
    fn log(&self) {
        tracing::warn!(vertex = self.vertex, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "persist_failed",
            span_name = name,
            vertex = self.vertex,
            error = %self.error,
        )
    }
}

/// Handing a flow unit to the network facade for delivery failed. Logged
/// and swallowed — a forwarding failure to one peer must not stall the
/// tasklet's own result or any other destination.
pub struct FlowUnitForwardFailed<'a> {
    pub producer: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for FlowUnitForwardFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "forwarding flow unit from '{}' failed: {}",
            self.producer, self.error
        )
    }
}

impl StructuredLog for FlowUnitForwardFailed<'_> {
    fn log(&self) {
        tracing::warn!(producer = self.producer, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "flow_unit_forward_failed",
            span_name = name,
            producer = self.producer,
            error = %self.error,
        )
    }
}
