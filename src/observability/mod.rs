// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging, tracing, and metrics.
//!
//! Centralized message types for all diagnostic and operational logging
//! throughout the scheduler. Message types follow a struct-based pattern
//! with a `Display` impl (human-readable line) and a `StructuredLog` impl
//! (field-structured `tracing` emission), so that:
//!
//! * No magic strings are scattered through the partitioner/tasklet/tick
//!   executor.
//! * Log fields are queryable without string parsing.
//! * Every loggable event has exactly one place that defines its shape.
//!
//! # Architecture
//!
//! Messages are organized by subsystem, mirroring the scheduler's own
//! structure:
//! * `messages::partition` - Partitioner and Intent Router events
//! * `messages::tick` - Tick Executor lifecycle events
//! * `messages::routing` - outbound data routing events

pub mod messages;
