// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::collections::HashMap;
use std::error::Error as StdError;

use crate::collab::flow_unit::FlowUnit;

/// A subscription request from a consumer host to a producer host.
///
/// Sent once per (local-consumer, remote-producer) pair during partitioning.
/// Duplicate intents for the same pair are permitted — the facade is
/// assumed idempotent.
#[derive(Debug, Clone, PartialEq)]
pub struct IntentMsg {
    pub consumer: String,
    pub producer: String,
    pub producer_tags: HashMap<String, String>,
}

/// The network hopper: peer discovery, wire serialization, and framing are
/// all out of scope here — this trait is only the three operations the
/// scheduler core calls through.
#[async_trait]
pub trait NetworkFacade: Send + Sync {
    /// Idempotent subscription. A send failure is logged at partition time
    /// and does not abort construction.
    async fn send_intent(&self, intent: &IntentMsg) -> Result<(), Box<dyn StdError + Send + Sync>>;

    /// Non-blocking read of the most recently cached peer data for `vertex`.
    /// Returns `None` if nothing has arrived yet.
    async fn fetch_remote(&self, vertex: &str) -> Option<FlowUnit>;

    /// Fire-and-forget delivery of `flow_unit` to `destinations`. The router
    /// does not block on acknowledgement — this method may still be `async`
    /// to hand off to an outbound queue — but a synchronous handoff failure
    /// (the queue is full, the peer connection is already known dead) is
    /// reported back so the caller can log it instead of silently dropping
    /// the flow unit.
    async fn publish(
        &self,
        vertex: &str,
        flow_unit: FlowUnit,
        destinations: &[String],
    ) -> Result<(), Box<dyn StdError + Send + Sync>>;
}
