// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;
use std::error::Error as StdError;

use crate::collab::flow_unit::FlowUnit;

/// The on-disk result store, injected and shared across tasklets.
///
/// Persistence errors are non-fatal to the scheduler: a tasklet logs and
/// swallows a `write` failure rather than propagating it,
/// so the returned error type only needs to carry enough to log — it never
/// needs to be matched on by the scheduler.
#[async_trait]
pub trait Store: Send + Sync {
    async fn write(&self, flow_unit: &FlowUnit) -> Result<(), Box<dyn StdError + Send + Sync>>;
}
