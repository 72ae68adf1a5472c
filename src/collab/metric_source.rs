// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use async_trait::async_trait;

use crate::collab::flow_unit::MetricBatch;

/// The metric-reader data source, injected and shared across tasklets.
///
/// Out of scope per the core's purpose: this crate never implements a real
/// metric backend, only the trait a Local evaluator reads through.
/// `read_metric` may block internally (it is async so the driver thread is
/// never blocked) and is permitted to return `None` without that being an
/// error — an absent reading is not a failure, it simply yields an empty
/// flow unit downstream.
#[async_trait]
pub trait MetricSource: Send + Sync {
    /// Read the named fields for `vertex`. Returns `None` if no reading is
    /// currently available.
    async fn read_metric(&self, vertex: &str, fields: &[String]) -> Option<MetricBatch>;
}
