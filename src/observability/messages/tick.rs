// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for Tick Executor lifecycle events, emitted on every
//! `run()` invocation.

use std::fmt::{Display, Formatter};
use std::time::Duration;
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A scheduler tick began.
pub struct TickStarted {
    pub tick: u32,
    pub max_ticks: u32,
}

impl Display for TickStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "tick {} of {} started", self.tick, self.max_ticks)
    }
}

impl StructuredLog for TickStarted {
    fn log(&self) {
        tracing::debug!(tick = self.tick, max_ticks = self.max_ticks, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "tick",
            span_name = name,
            tick = self.tick,
            max_ticks = self.max_ticks,
        )
    }
}

/// A tasklet's evaluator threw and was suppressed.
pub struct TaskletFailed<'a> {
    pub vertex: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TaskletFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "tasklet '{}' evaluator failed, emitting empty flow unit: {}",
            self.vertex, self.error
        )
    }
}

impl StructuredLog for TaskletFailed<'_> {
    fn log(&self) {
        tracing::warn!(vertex = self.vertex, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "tasklet_failed",
            span_name = name,
            vertex = self.vertex,
            error = %self.error,
        )
    }
}

/// A worker-pool task failed to join -- the tick continues rather than
/// propagating the panic.
pub struct TaskletJoinFailed<'a> {
    pub vertex: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for TaskletJoinFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "tasklet '{}' worker task failed to join: {}",
            self.vertex, self.error
        )
    }
}

impl StructuredLog for TaskletJoinFailed<'_> {
    fn log(&self) {
        tracing::error!(vertex = self.vertex, error = %self.error, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "tasklet_join_failed",
            span_name = name,
            vertex = self.vertex,
            error = %self.error,
        )
    }
}

/// A tick completed.
pub struct TickCompleted {
    pub tick: u32,
    pub wall_time: Duration,
    pub muted_count: usize,
}

impl Display for TickCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "tick {} completed in {:?}, {} muted nodes",
            self.tick, self.wall_time, self.muted_count
        )
    }
}

impl StructuredLog for TickCompleted {
    fn log(&self) {
        tracing::info!(
            tick = self.tick,
            wall_time_ms = self.wall_time.as_millis() as u64,
            muted_count = self.muted_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "tick_completed",
            span_name = name,
            tick = self.tick,
            wall_time = ?self.wall_time,
            muted_count = self.muted_count,
        )
    }
}

/// `currTick` wrapped back to 0 and every tasklet's tick counter was reset.
pub struct TickCounterWrapped {
    pub max_ticks: u32,
}

impl Display for TickCounterWrapped {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "tick counter wrapped after {} ticks; all tasklet counters reset",
            self.max_ticks
        )
    }
}

impl StructuredLog for TickCounterWrapped {
    fn log(&self) {
        tracing::info!(max_ticks = self.max_ticks, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "tick_counter_wrapped",
            span_name = name,
            max_ticks = self.max_ticks,
        )
    }
}
