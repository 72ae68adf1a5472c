// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! In-memory stand-ins for the four collaborator traits, used by this
//! crate's own tests. Mirrors a `backends::stub` module --
//! `StubProcessor`/`FailingProcessor`/`NoOutcomeProcessor` become evaluators
//! here, plus equivalents for the metric source, store, and network facade.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::collab::{FlowUnit, IntentMsg, MetricBatch, MetricSource, NetworkFacade, Store, VertexEvaluator};
use crate::errors::EvaluationError;
use crate::graph::Vertex;

/// Always succeeds and discards the flow unit.
pub struct NoopStore;

#[async_trait]
impl Store for NoopStore {
    async fn write(&self, _flow_unit: &FlowUnit) -> Result<(), Box<dyn StdError + Send + Sync>> {
        Ok(())
    }
}

/// Records every flow unit handed to it, for assertions.
#[derive(Default)]
pub struct InMemoryStore {
    written: Mutex<Vec<FlowUnit>>,
}

impl InMemoryStore {
    pub fn written(&self) -> Vec<FlowUnit> {
        self.written.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for InMemoryStore {
    async fn write(&self, flow_unit: &FlowUnit) -> Result<(), Box<dyn StdError + Send + Sync>> {
        self.written.lock().unwrap().push(flow_unit.clone());
        Ok(())
    }
}

#[derive(Debug)]
struct StubWriteError;

impl fmt::Display for StubWriteError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "stub store write failure")
    }
}

impl StdError for StubWriteError {}

/// Always fails to persist -- exercises the "logged, swallowed" path so a
/// store outage never aborts a tick.
pub struct FailingStore;

#[async_trait]
impl Store for FailingStore {
    async fn write(&self, _flow_unit: &FlowUnit) -> Result<(), Box<dyn StdError + Send + Sync>> {
        Err(Box::new(StubWriteError))
    }
}

/// A metric source backed by a settable table, keyed by vertex name.
#[derive(Default)]
pub struct StubMetricSource {
    readings: Mutex<HashMap<String, MetricBatch>>,
}

impl StubMetricSource {
    pub fn set(&self, vertex: impl Into<String>, batch: MetricBatch) {
        self.readings.lock().unwrap().insert(vertex.into(), batch);
    }
}

#[async_trait]
impl MetricSource for StubMetricSource {
    async fn read_metric(&self, vertex: &str, _fields: &[String]) -> Option<MetricBatch> {
        self.readings.lock().unwrap().get(vertex).cloned()
    }
}

/// Records sent intents and published flow units; serves configured
/// `fetch_remote` responses. Never talks to an actual network.
#[derive(Default)]
pub struct NoopNetwork {
    sent_intents: Mutex<Vec<IntentMsg>>,
    cached: Mutex<HashMap<String, FlowUnit>>,
    published: Mutex<Vec<(String, FlowUnit, Vec<String>)>>,
}

impl NoopNetwork {
    /// Seed a cached reading so a RemoteProxy tasklet's `fetch_remote` call
    /// resolves to something other than `None`.
    pub fn seed(&self, vertex: impl Into<String>, flow_unit: FlowUnit) {
        self.cached.lock().unwrap().insert(vertex.into(), flow_unit);
    }

    pub fn sent_intents(&self) -> Vec<IntentMsg> {
        self.sent_intents.lock().unwrap().clone()
    }

    pub fn published(&self) -> Vec<(String, FlowUnit, Vec<String>)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl NetworkFacade for NoopNetwork {
    async fn send_intent(&self, intent: &IntentMsg) -> Result<(), Box<dyn StdError + Send + Sync>> {
        self.sent_intents.lock().unwrap().push(intent.clone());
        Ok(())
    }

    async fn fetch_remote(&self, vertex: &str) -> Option<FlowUnit> {
        self.cached.lock().unwrap().get(vertex).cloned()
    }

    async fn publish(
        &self,
        vertex: &str,
        flow_unit: FlowUnit,
        destinations: &[String],
    ) -> Result<(), Box<dyn StdError + Send + Sync>> {
        self.published
            .lock()
            .unwrap()
            .push((vertex.to_string(), flow_unit, destinations.to_vec()));
        Ok(())
    }
}

#[derive(Debug)]
struct StubPublishError;

impl fmt::Display for StubPublishError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "stub network publish failure")
    }
}

impl StdError for StubPublishError {}

/// Subscribes and caches normally but always fails to forward -- exercises
/// the tasklet's "logged, swallowed" handling of a dead outbound connection.
#[derive(Default)]
pub struct FailingPublishNetwork {
    cached: Mutex<HashMap<String, FlowUnit>>,
}

impl FailingPublishNetwork {
    pub fn seed(&self, vertex: impl Into<String>, flow_unit: FlowUnit) {
        self.cached.lock().unwrap().insert(vertex.into(), flow_unit);
    }
}

#[async_trait]
impl NetworkFacade for FailingPublishNetwork {
    async fn send_intent(&self, _intent: &IntentMsg) -> Result<(), Box<dyn StdError + Send + Sync>> {
        Ok(())
    }

    async fn fetch_remote(&self, vertex: &str) -> Option<FlowUnit> {
        self.cached.lock().unwrap().get(vertex).cloned()
    }

    async fn publish(
        &self,
        _vertex: &str,
        _flow_unit: FlowUnit,
        _destinations: &[String],
    ) -> Result<(), Box<dyn StdError + Send + Sync>> {
        Err(Box::new(StubPublishError))
    }
}

/// Reports how many inputs it was given -- deterministic, side-effect-free,
/// useful for asserting that a tasklet actually ran and saw its
/// predecessors' output.
pub struct EchoEvaluator;

#[async_trait]
impl VertexEvaluator for EchoEvaluator {
    async fn evaluate(
        &self,
        vertex: &Vertex,
        inputs: &[FlowUnit],
        _metrics: Option<MetricBatch>,
    ) -> Result<FlowUnit, EvaluationError> {
        let mut fields = HashMap::new();
        fields.insert("input_count".to_string(), inputs.len().to_string());
        Ok(FlowUnit::with_fields(vertex.name.clone(), fields))
    }
}

/// Always fails -- exercises failure containment: one tasklet's evaluator
/// error must not stall its siblings or downstream consumers.
pub struct FailingEvaluator;

#[async_trait]
impl VertexEvaluator for FailingEvaluator {
    async fn evaluate(
        &self,
        vertex: &Vertex,
        _inputs: &[FlowUnit],
        _metrics: Option<MetricBatch>,
    ) -> Result<FlowUnit, EvaluationError> {
        Err(EvaluationError::Failed {
            vertex: vertex.name.clone(),
            reason: "stub evaluator always fails".to_string(),
        })
    }
}

/// Records which upstream vertices it actually saw flow units from, and how
/// many of those were empty -- lets a test assert a tasklet observed a
/// *specific* predecessor's output (by name) rather than just a count, and
/// distinguish "predecessor produced nothing" from "predecessor produced
/// something".
pub struct UpstreamNameCollectorEvaluator;

#[async_trait]
impl VertexEvaluator for UpstreamNameCollectorEvaluator {
    async fn evaluate(
        &self,
        vertex: &Vertex,
        inputs: &[FlowUnit],
        _metrics: Option<MetricBatch>,
    ) -> Result<FlowUnit, EvaluationError> {
        let mut fields = HashMap::new();
        let saw: Vec<String> = inputs.iter().map(|fu| fu.vertex.clone()).collect();
        let empty_count = inputs.iter().filter(|fu| fu.is_empty()).count();
        fields.insert("saw_upstreams".to_string(), saw.join(","));
        fields.insert("empty_count".to_string(), empty_count.to_string());
        Ok(FlowUnit::with_fields(vertex.name.clone(), fields))
    }
}
