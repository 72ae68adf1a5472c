// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The Tasklet: the runtime unit bound to a vertex. Holds predecessor
//! links, a tick counter, and an evaluator chosen once at partition time
//! (a tagged variant rather than a runtime lookup by string). Predecessor
//! synchronization uses `futures::future::Shared` wrapping a boxed future
//! so every dependent can await one predecessor's result without consuming
//! it or re-running its evaluation -- grounded on the `futures` crate
//! already used for this purpose elsewhere in the retrieval pack (e.g.
//! `Binghong-Leo-Li-fusion-framework`, `pcastone-orca`).

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex};

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex as AsyncMutex;

use crate::collab::{FlowUnit, MetricBatch, MetricSource, NetworkFacade, Store, VertexEvaluator};
use crate::graph::{Vertex, VertexKind};
use crate::observability::messages::routing::{FlowUnitForwardFailed, FlowUnitPublished, PersistFailed};
use crate::observability::messages::tick::{TaskletFailed, TaskletJoinFailed};
use crate::observability::messages::StructuredLog;
use crate::scheduler::outbound::OutboundRoutingMap;
use crate::scheduler::pool::WorkerPool;

/// A tasklet's output future, shared so every dependent can await it without
/// consuming it: it resolves only after every predecessor's future has
/// resolved.
pub type TaskletFuture = Shared<BoxFuture<'static, FlowUnit>>;

static NEXT_TASKLET_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one tasklet instance, not one vertex -- the same vertex can be
/// bound to more than one RemoteProxy tasklet: an `aggregate-upstream` edge
/// creates a second, distinct proxy for an upstream already represented by
/// a Local tasklet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskletId(u64);

impl TaskletId {
    fn next() -> Self {
        Self(NEXT_TASKLET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Local,
    RemoteProxy,
}

enum TaskletKind {
    Local { evaluator: Arc<dyn VertexEvaluator> },
    RemoteProxy,
}

/// The runtime binding of a vertex to an evaluator and its predecessors.
/// One instance is created per scheduled occurrence of a vertex at
/// partition time and reused for every tick thereafter.
pub struct Tasklet {
    id: TaskletId,
    vertex: Arc<Vertex>,
    kind: TaskletKind,
    /// Predecessor tasklets in the order their flow units are fed to the
    /// evaluator: primary upstreams in `vertex.upstream` order, followed by
    /// any `aggregate-upstream` proxies -- appended rather than substituted,
    /// so an upstream already wired as a Local tasklet keeps feeding this
    /// one directly even once a remote copy is also aggregated in.
    predecessors: Vec<Arc<Tasklet>>,
    metric_source: StdMutex<Arc<dyn MetricSource>>,
    store: Arc<dyn Store>,
    network: Arc<dyn NetworkFacade>,
    outbound: Arc<OutboundRoutingMap>,
    tick_counter: AtomicU32,
    last_flow_unit: AsyncMutex<FlowUnit>,
}

impl Tasklet {
    pub fn new_local(
        vertex: Arc<Vertex>,
        evaluator: Arc<dyn VertexEvaluator>,
        predecessors: Vec<Arc<Tasklet>>,
        metric_source: Arc<dyn MetricSource>,
        store: Arc<dyn Store>,
        network: Arc<dyn NetworkFacade>,
        outbound: Arc<OutboundRoutingMap>,
    ) -> Arc<Self> {
        Self::new(
            vertex,
            TaskletKind::Local { evaluator },
            predecessors,
            metric_source,
            store,
            network,
            outbound,
        )
    }

    pub fn new_remote_proxy(
        vertex: Arc<Vertex>,
        metric_source: Arc<dyn MetricSource>,
        store: Arc<dyn Store>,
        network: Arc<dyn NetworkFacade>,
        outbound: Arc<OutboundRoutingMap>,
    ) -> Arc<Self> {
        Self::new(
            vertex,
            TaskletKind::RemoteProxy,
            Vec::new(),
            metric_source,
            store,
            network,
            outbound,
        )
    }

    fn new(
        vertex: Arc<Vertex>,
        kind: TaskletKind,
        predecessors: Vec<Arc<Tasklet>>,
        metric_source: Arc<dyn MetricSource>,
        store: Arc<dyn Store>,
        network: Arc<dyn NetworkFacade>,
        outbound: Arc<OutboundRoutingMap>,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: TaskletId::next(),
            last_flow_unit: AsyncMutex::new(FlowUnit::empty(vertex.name.clone())),
            vertex,
            kind,
            predecessors,
            metric_source: StdMutex::new(metric_source),
            store,
            network,
            outbound,
            tick_counter: AtomicU32::new(0),
        })
    }

    pub fn id(&self) -> TaskletId {
        self.id
    }

    pub fn vertex(&self) -> &Arc<Vertex> {
        &self.vertex
    }

    pub fn classification(&self) -> Classification {
        match self.kind {
            TaskletKind::Local { .. } => Classification::Local,
            TaskletKind::RemoteProxy => Classification::RemoteProxy,
        }
    }

    pub fn predecessors(&self) -> &[Arc<Tasklet>] {
        &self.predecessors
    }

    /// Test-only metric-source swap: applied by the driver thread at tick
    /// entry, before any task for the new tick is submitted, which
    /// establishes happens-before with every task that reads it this tick.
    pub fn set_metric_source(&self, source: Arc<dyn MetricSource>) {
        *self.metric_source.lock().unwrap() = source;
    }

    pub fn reset_tick_counter(&self) {
        self.tick_counter.store(0, Ordering::SeqCst);
    }

    pub fn tick_counter(&self) -> u32 {
        self.tick_counter.load(Ordering::SeqCst)
    }

    pub async fn last_flow_unit(&self) -> FlowUnit {
        self.last_flow_unit.lock().await.clone()
    }

    /// Builds the composite future for this tick: it resolves only after
    /// every predecessor's future has resolved, then schedules this
    /// tasklet's own evaluation on `pool`. Predecessors missing from
    /// `futures_map` (shouldn't happen given level ordering) default to an
    /// already-resolved empty flow unit.
    pub fn execute(
        self: &Arc<Self>,
        pool: &WorkerPool,
        futures_map: &HashMap<TaskletId, TaskletFuture>,
    ) -> TaskletFuture {
        let predecessor_futures: Vec<TaskletFuture> = self
            .predecessors
            .iter()
            .map(|predecessor| {
                futures_map.get(&predecessor.id).cloned().unwrap_or_else(|| {
                    let name = predecessor.vertex.name.clone();
                    futures::future::ready(FlowUnit::empty(name)).boxed().shared()
                })
            })
            .collect();

        let this = self.clone();
        let pool = pool.clone();
        let future: BoxFuture<'static, FlowUnit> = async move {
            let inputs = futures::future::join_all(predecessor_futures).await;
            let worker_this = this.clone();
            let handle = pool.spawn(async move { worker_this.run_once(inputs).await });
            match handle.await {
                Ok(flow_unit) => flow_unit,
                Err(join_error) => {
                    TaskletJoinFailed {
                        vertex: &this.vertex.name,
                        error: &join_error,
                    }
                    .log();
                    FlowUnit::empty(this.vertex.name.clone())
                }
            }
        }
        .boxed();

        future.shared()
    }

    /// One tasklet's work for one tick -- cadence check, evaluation, persist,
    /// and outbound forwarding -- run on the worker pool.
    async fn run_once(self: Arc<Self>, inputs: Vec<FlowUnit>) -> FlowUnit {
        let counter = self.tick_counter.fetch_add(1, Ordering::SeqCst);
        if counter % self.vertex.tick_period != 0 {
            let empty = FlowUnit::empty(self.vertex.name.clone());
            *self.last_flow_unit.lock().await = empty.clone();
            return empty;
        }

        let flow_unit = match &self.kind {
            TaskletKind::Local { evaluator } => self.evaluate_local(evaluator.as_ref(), &inputs).await,
            TaskletKind::RemoteProxy => self.evaluate_remote_proxy().await,
        };

        if matches!(self.kind, TaskletKind::Local { .. }) {
            if let Some(destinations) = self.outbound.destinations_for(&self.vertex.name) {
                FlowUnitPublished {
                    producer: &self.vertex.name,
                    destinations: &destinations,
                }
                .log();
                if let Err(error) = self
                    .network
                    .publish(&self.vertex.name, flow_unit.clone(), &destinations)
                    .await
                {
                    FlowUnitForwardFailed {
                        producer: &self.vertex.name,
                        error: error.as_ref(),
                    }
                    .log();
                }
            }
        }

        *self.last_flow_unit.lock().await = flow_unit.clone();
        flow_unit
    }

    async fn evaluate_local(&self, evaluator: &dyn VertexEvaluator, inputs: &[FlowUnit]) -> FlowUnit {
        let metrics: Option<MetricBatch> = if self.vertex.kind == VertexKind::MetricSource {
            let fields = self.metric_fields();
            let source = self.metric_source.lock().unwrap().clone();
            source.read_metric(&self.vertex.name, &fields).await
        } else {
            None
        };

        let flow_unit = match evaluator.evaluate(&self.vertex, inputs, metrics).await {
            Ok(flow_unit) => flow_unit,
            Err(error) => {
                TaskletFailed {
                    vertex: &self.vertex.name,
                    error: &error,
                }
                .log();
                FlowUnit::empty(self.vertex.name.clone())
            }
        };

        if let Err(error) = self.store.write(&flow_unit).await {
            PersistFailed {
                vertex: &self.vertex.name,
                error: error.as_ref(),
            }
            .log();
        }

        flow_unit
    }

    async fn evaluate_remote_proxy(&self) -> FlowUnit {
        self.network
            .fetch_remote(&self.vertex.name)
            .await
            .unwrap_or_else(|| FlowUnit::empty(self.vertex.name.clone()))
    }

    /// Field names to request from the metric source. Not specified by the
    /// evaluator contract, since vertex evaluation logic is supplied by the
    /// caller, so we read an optional `metric-fields` tag (comma-separated)
    /// and fall back to a single field named after the vertex itself.
    fn metric_fields(&self) -> Vec<String> {
        self.vertex
            .tags
            .get("metric-fields")
            .map(|value| {
                value
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec![self.vertex.name.clone()])
    }
}
