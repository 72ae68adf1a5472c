// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The Partitioner and Intent Router: walks each connected component level
//! by level, classifies every vertex as Local or RemoteProxy against the
//! host's configured loci, wires up predecessor tasklets, sends
//! subscription intents for non-local upstreams, and records the Outbound
//! Routing Map. Runs once, at scheduler construction.

use std::collections::HashMap;
use std::sync::Arc;

use crate::collab::{EvaluatorRegistry, IntentMsg, MetricSource, NetworkFacade, Store};
use crate::errors::{ConfigurationError, SchedulerError};
use crate::graph::{Graph, Vertex};
use crate::host::HostConfig;
use crate::observability::messages::partition::{
    IntentSendFailed, IntentSent, PartitionCompleted, PartitionStarted, VertexClassified,
};
use crate::observability::messages::StructuredLog;
use crate::scheduler::outbound::OutboundRoutingMap;
use crate::scheduler::tasklet::{Classification, Tasklet};

/// The immutable result of partitioning: an ordered list of levels, each a
/// list of tasklets, plus the routing map built alongside it.
pub struct ScheduledGraph {
    pub levels: Vec<Vec<Arc<Tasklet>>>,
    pub outbound: Arc<OutboundRoutingMap>,
}

impl ScheduledGraph {
    pub fn local_count(&self) -> usize {
        self.levels
            .iter()
            .flatten()
            .filter(|t| t.classification() == Classification::Local)
            .count()
    }

    pub fn proxy_count(&self) -> usize {
        self.levels
            .iter()
            .flatten()
            .filter(|t| t.classification() == Classification::RemoteProxy)
            .count()
    }
}

/// Builds the Scheduled Graph. Async because sending subscription intents
/// goes through the network facade.
pub async fn partition(
    graph: &Graph,
    host: &HostConfig,
    evaluators: &EvaluatorRegistry,
    metric_source: Arc<dyn MetricSource>,
    store: Arc<dyn Store>,
    network: Arc<dyn NetworkFacade>,
) -> Result<ScheduledGraph, SchedulerError> {
    if host.loci.is_empty() {
        return Err(SchedulerError::Configuration(ConfigurationError::NoLociConfigured));
    }

    let all_vertices: HashMap<&str, Arc<Vertex>> = graph
        .components
        .iter()
        .flat_map(|c| c.levels.iter().flatten())
        .map(|v| (v.name.as_str(), v.clone()))
        .collect();

    let outbound = Arc::new(OutboundRoutingMap::new());
    let mut per_component_levels: Vec<Vec<Vec<Arc<Tasklet>>>> = Vec::new();

    for (component_index, component) in graph.components.iter().enumerate() {
        PartitionStarted {
            component_index,
            vertex_count: component.vertex_count(),
        }
        .log();

        let mut locally_executable: HashMap<String, Arc<Tasklet>> = HashMap::new();
        let mut output_levels: Vec<Vec<Arc<Tasklet>>> = Vec::new();

        for level in &component.levels {
            let mut current_level: Vec<Arc<Tasklet>> = Vec::new();
            let mut proxies_from_this_level: Vec<Arc<Tasklet>> = Vec::new();

            for vertex in level {
                let local = vertex.is_local_to(&host.loci);
                VertexClassified {
                    vertex: &vertex.name,
                    local,
                }
                .log();

                if local {
                    let tasklet = build_local_tasklet(
                        vertex,
                        host,
                        evaluators,
                        &locally_executable,
                        &all_vertices,
                        &metric_source,
                        &store,
                        &network,
                        &outbound,
                        &mut proxies_from_this_level,
                    )
                    .await?;

                    locally_executable.insert(vertex.name.clone(), tasklet.clone());
                    current_level.push(tasklet);
                } else {
                    for upstream in &vertex.upstream {
                        if locally_executable.contains_key(upstream) {
                            outbound.record(upstream.clone(), vertex.name.clone());
                        }
                    }
                }
            }

            let previous_index = output_levels.len();
            if !proxies_from_this_level.is_empty() {
                if previous_index > 0 {
                    output_levels[previous_index - 1].extend(proxies_from_this_level);
                } else {
                    output_levels.insert(0, proxies_from_this_level);
                }
            }
            if !current_level.is_empty() {
                output_levels.push(current_level);
            }
        }

        per_component_levels.push(output_levels);
    }

    let levels = merge_levels(per_component_levels);
    let scheduled = ScheduledGraph { levels, outbound };

    PartitionCompleted {
        local_count: scheduled.local_count(),
        proxy_count: scheduled.proxy_count(),
        level_count: scheduled.levels.len(),
    }
    .log();

    Ok(scheduled)
}

#[allow(clippy::too_many_arguments)]
async fn build_local_tasklet(
    vertex: &Arc<Vertex>,
    host: &HostConfig,
    evaluators: &EvaluatorRegistry,
    locally_executable: &HashMap<String, Arc<Tasklet>>,
    all_vertices: &HashMap<&str, Arc<Vertex>>,
    metric_source: &Arc<dyn MetricSource>,
    store: &Arc<dyn Store>,
    network: &Arc<dyn NetworkFacade>,
    outbound: &Arc<OutboundRoutingMap>,
    proxies_from_this_level: &mut Vec<Arc<Tasklet>>,
) -> Result<Arc<Tasklet>, SchedulerError> {
    if host.vertex_params(&vertex.name).is_none() {
        return Err(SchedulerError::Configuration(ConfigurationError::MissingVertexConfig {
            vertex: vertex.name.clone(),
        }));
    }

    let evaluator = evaluators
        .get(vertex.kind.as_str())
        .ok_or_else(|| {
            SchedulerError::Configuration(ConfigurationError::MissingEvaluator {
                vertex: vertex.name.clone(),
                kind: vertex.kind.as_str().to_string(),
            })
        })?;

    let mut predecessors: Vec<Arc<Tasklet>> = Vec::new();

    for upstream_name in &vertex.upstream {
        if let Some(upstream_tasklet) = locally_executable.get(upstream_name) {
            predecessors.push(upstream_tasklet.clone());

            if let Some(aggregate_locus) = vertex.aggregate_upstream() {
                if upstream_tasklet.vertex().locus().contains(aggregate_locus) {
                    let proxy = Tasklet::new_remote_proxy(
                        upstream_tasklet.vertex().clone(),
                        metric_source.clone(),
                        store.clone(),
                        network.clone(),
                        outbound.clone(),
                    );
                    predecessors.push(proxy.clone());
                    proxies_from_this_level.push(proxy);
                }
            }
        } else {
            let upstream_vertex = all_vertices
                .get(upstream_name.as_str())
                .expect("graph validation guarantees every upstream resolves")
                .clone();

            send_intent(network, &vertex.name, &upstream_vertex).await;

            let proxy = Tasklet::new_remote_proxy(
                upstream_vertex,
                metric_source.clone(),
                store.clone(),
                network.clone(),
                outbound.clone(),
            );
            predecessors.push(proxy.clone());
            proxies_from_this_level.push(proxy);
        }
    }

    Ok(Tasklet::new_local(
        vertex.clone(),
        evaluator,
        predecessors,
        metric_source.clone(),
        store.clone(),
        network.clone(),
        outbound.clone(),
    ))
}

async fn send_intent(network: &Arc<dyn NetworkFacade>, consumer: &str, producer: &Vertex) {
    let intent = IntentMsg {
        consumer: consumer.to_string(),
        producer: producer.name.clone(),
        producer_tags: producer.tags.clone(),
    };

    match network.send_intent(&intent).await {
        Ok(()) => {
            IntentSent {
                consumer,
                producer: &producer.name,
            }
            .log();
        }
        Err(error) => {
            IntentSendFailed {
                consumer,
                producer: &producer.name,
                error: error.as_ref(),
            }
            .log();
        }
    }
}

/// Merges each component's leveled tasklet list index-wise: the longer
/// list absorbs the shorter one's entries at matching depths.
fn merge_levels(component_levels: Vec<Vec<Vec<Arc<Tasklet>>>>) -> Vec<Vec<Arc<Tasklet>>> {
    let max_len = component_levels.iter().map(Vec::len).max().unwrap_or(0);
    let mut merged: Vec<Vec<Arc<Tasklet>>> = vec![Vec::new(); max_len];
    for levels in component_levels {
        for (index, level) in levels.into_iter().enumerate() {
            merged[index].extend(level);
        }
    }
    merged
}
