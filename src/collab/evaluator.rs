// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Individual vertex evaluation logic is explicitly out of scope here — the
//! actual RCA math (threshold comparisons, summarization, whatever a given
//! vertex kind computes) is supplied by the caller, not this crate. What the
//! scheduler core owns is the *contract* a Local tasklet evaluates through,
//! and a small registry for wiring vertex kinds to evaluator instances,
//! mirroring a name-to-implementation factory pattern of mapping a
//! configured name to an `Arc<dyn Processor>`.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::collab::flow_unit::{FlowUnit, MetricBatch};
use crate::errors::EvaluationError;
use crate::graph::Vertex;

/// Computes a vertex's flow unit from its upstream inputs and (optionally)
/// a metric reading. Implementations are provided by the caller; the
/// scheduler only ever invokes this trait, catches any error it returns, and
/// converts it to an empty flow unit.
#[async_trait]
pub trait VertexEvaluator: Send + Sync {
    async fn evaluate(
        &self,
        vertex: &Vertex,
        inputs: &[FlowUnit],
        metrics: Option<MetricBatch>,
    ) -> Result<FlowUnit, EvaluationError>;
}

/// Maps a vertex's `kind` tag to the `VertexEvaluator` that computes it.
///
/// Built once at partition time and shared read-only thereafter — keyed by
/// evaluator kind rather than by vertex name, since many vertices typically
/// share one evaluator implementation (e.g. every "metric" vertex uses the
/// same threshold-comparison evaluator).
#[derive(Clone, Default)]
pub struct EvaluatorRegistry {
    by_kind: HashMap<String, Arc<dyn VertexEvaluator>>,
}

impl EvaluatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: impl Into<String>, evaluator: Arc<dyn VertexEvaluator>) {
        self.by_kind.insert(kind.into(), evaluator);
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn VertexEvaluator>> {
        self.by_kind.get(kind).cloned()
    }
}

impl fmt::Debug for EvaluatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluatorRegistry")
            .field("kinds", &self.by_kind.keys().collect::<Vec<_>>())
            .finish()
    }
}
