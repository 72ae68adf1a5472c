// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Collaborator traits: the four external capabilities the core consumes,
//! plus the `FlowUnit`/`MetricBatch` value types passed across them.
//! Concrete metric readers, persistence stores, network hoppers, and vertex
//! evaluators are all out of scope here — this module only fixes the
//! interfaces.

pub mod evaluator;
pub mod flow_unit;
pub mod metric_source;
pub mod network;
pub mod store;

pub use evaluator::{EvaluatorRegistry, VertexEvaluator};
pub use flow_unit::{FlowUnit, MetricBatch};
pub use metric_source::MetricSource;
pub use network::{IntentMsg, NetworkFacade};
pub use store::Store;
