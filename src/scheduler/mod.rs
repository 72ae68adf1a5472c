// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The Tick Executor and the scheduler's public surface: construction runs
//! the Partitioner and Intent Router once, producing the immutable
//! [`partitioner::ScheduledGraph`] this module drives on every `run()`.

pub mod metrics;
pub mod outbound;
pub mod partitioner;
pub mod pool;
pub mod tasklet;


use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Instant;

use crate::collab::{EvaluatorRegistry, MetricSource, NetworkFacade, Store};
use crate::errors::SchedulerError;
use crate::graph::Graph;
use crate::host::HostConfig;
use crate::observability::messages::tick::{TickCompleted, TickCounterWrapped, TickStarted};
use crate::observability::messages::StructuredLog;
use crate::scheduler::partitioner::{partition, ScheduledGraph};
use crate::scheduler::pool::WorkerPool;
use crate::scheduler::tasklet::{TaskletFuture, TaskletId};

/// Extension hook called once per tick, after every tasklet has been
/// submitted and before the final join. Default is a no-op; preserved for
/// subclass-style extension in callers that want one.
pub trait PreWaitHook: Send + Sync {
    fn pre_wait(&self) {}
}

#[derive(Default)]
struct NoopPreWait;
impl PreWaitHook for NoopPreWait {}

/// The scheduler: an immutable [`ScheduledGraph`] plus the tick-local state
/// the Tick Executor drives on every `run()`.
///
/// Constructed once per host; `run()` is invoked by an external scheduler
/// (a cron-like driver, a timer loop) on its own cadence -- this crate has
/// no opinion on that cadence, only on what one invocation does.
pub struct Scheduler {
    max_ticks: u32,
    curr_tick: AtomicU32,
    pool: WorkerPool,
    graph: ScheduledGraph,
    /// Test-only metric-source swap, staged here and drained by the driver
    /// thread at tick entry, so the hot path never takes a lock to check
    /// whether a swap is pending.
    pending_metric_source: StdMutex<Option<Arc<dyn MetricSource>>>,
    pre_wait: Arc<dyn PreWaitHook>,
}

impl Scheduler {
    /// Runs the Partitioner and Intent Router once and returns a scheduler
    /// ready to be ticked. Fails only with a construction-time
    /// [`SchedulerError`] -- once built, a `Scheduler` never errors again.
    #[allow(clippy::too_many_arguments)]
    pub async fn new(
        max_ticks: u32,
        pool: WorkerPool,
        components: &Graph,
        evaluators: &EvaluatorRegistry,
        metric_source: Arc<dyn MetricSource>,
        store: Arc<dyn Store>,
        host: &HostConfig,
        network: Arc<dyn NetworkFacade>,
    ) -> Result<Self, SchedulerError> {
        let graph = partition(components, host, evaluators, metric_source, store, network).await?;
        Ok(Self {
            max_ticks: max_ticks.max(1),
            curr_tick: AtomicU32::new(0),
            pool,
            graph,
            pending_metric_source: StdMutex::new(None),
            pre_wait: Arc::new(NoopPreWait),
        })
    }

    /// Install a `preWait()` extension hook, replacing the default no-op.
    pub fn with_pre_wait_hook(mut self, hook: Arc<dyn PreWaitHook>) -> Self {
        self.pre_wait = hook;
        self
    }

    /// Test-only: swap every tasklet's metric source starting with the
    /// *next* `run()`, not the one in flight.
    pub fn set_metric_source_for_next_tick(&self, source: Arc<dyn MetricSource>) {
        *self.pending_metric_source.lock().unwrap() = Some(source);
    }

    /// `currTick` as of the last completed `run()`.
    pub fn current_tick(&self) -> u32 {
        self.curr_tick.load(Ordering::SeqCst)
    }

    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    pub fn scheduled_graph(&self) -> &ScheduledGraph {
        &self.graph
    }

    /// Drives one full evaluation pass. Never returns an error: every
    /// within-tick failure is contained and logged instead of propagated.
    pub async fn run(&self) {
        let tick = self.curr_tick.fetch_add(1, Ordering::SeqCst) + 1;
        let start = Instant::now();

        let total_nodes = self.graph.levels.iter().map(Vec::len).sum::<usize>();
        TickStarted {
            tick,
            max_ticks: self.max_ticks,
        }
        .log();
        metrics::record_graph_nodes(total_nodes);

        if let Some(source) = self.pending_metric_source.lock().unwrap().take() {
            for tasklet in self.graph.levels.iter().flatten() {
                tasklet.set_metric_source(source.clone());
            }
        }

        let mut futures_map: HashMap<TaskletId, TaskletFuture> = HashMap::with_capacity(total_nodes);
        let mut last_level_futures: Vec<TaskletFuture> = Vec::new();

        for level in &self.graph.levels {
            if level.is_empty() {
                continue;
            }
            let mut this_level = Vec::with_capacity(level.len());
            for tasklet in level {
                let future = tasklet.execute(&self.pool, &futures_map);
                futures_map.insert(tasklet.id(), future.clone());
                this_level.push(future);
            }
            last_level_futures = this_level;
        }

        self.pre_wait.pre_wait();

        // Waiting on the last level is sufficient for the whole tick: every
        // earlier tasklet is a transitive dependency of it through
        // `futures_map`. The per-tasklet muted count below still
        // needs every tasklet's result, but by the time the last level has
        // resolved, all of them already have -- these awaits do not block.
        futures::future::join_all(last_level_futures).await;

        let mut muted_count = 0;
        for future in futures_map.values() {
            if future.clone().await.is_empty() {
                muted_count += 1;
            }
        }

        if tick == self.max_ticks {
            for tasklet in self.graph.levels.iter().flatten() {
                tasklet.reset_tick_counter();
            }
            self.curr_tick.store(0, Ordering::SeqCst);
            TickCounterWrapped {
                max_ticks: self.max_ticks,
            }
            .log();
        }

        let wall_time = start.elapsed();
        metrics::record_muted_nodes(muted_count);
        metrics::record_tick_wall_time(wall_time);
        TickCompleted {
            tick,
            wall_time,
            muted_count,
        }
        .log();
    }
}
