// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging and distributed tracing.
//!
//! Each message type implements:
//!
//! * `Display` - human-readable output (supports future i18n)
//! * `StructuredLog` - machine-readable fields + span creation
//!
//! # Organization
//!
//! * `partition` - Partitioner/Intent Router events, emitted once at construction
//! * `tick` - Tick Executor lifecycle events, emitted every `run()`
//! * `routing` - outbound flow-unit delivery events
//!
//! # Usage
//!
//! ```
//! use rca_scheduler::observability::messages::{StructuredLog, tick::TickStarted};
//!
//! let msg = TickStarted { tick: 1, max_ticks: 10 };
//! msg.log();
//! ```

pub mod partition;
pub mod routing;
pub mod tick;

use tracing::Span;

/// Messages that support structured logging and distributed tracing.
pub trait StructuredLog {
    /// Emit a log event: human-readable message plus machine-readable fields.
    fn log(&self);

    /// Create a span with this message's fields as attributes.
    fn span(&self, name: &str) -> Span;
}
