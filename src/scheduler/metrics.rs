// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Metrics & Lifecycle: the counters the Tick Executor updates on every
//! `run()` -- total graph nodes, muted-node count, and per-tick wall
//! time -- emitted through the `metrics` facade rather than returned or
//! logged as data. No recorder is installed here or anywhere else in this
//! library; that belongs to the binary that embeds this crate. Without one
//! installed, every call below is an inert no-op, exactly as `tracing`
//! calls are inert without a subscriber.

use std::time::Duration;

const GRAPH_NODES: &str = "rca_scheduler_graph_nodes";
const MUTED_NODES: &str = "rca_scheduler_muted_nodes";
const TICK_WALL_TIME_SECONDS: &str = "rca_scheduler_tick_wall_time_seconds";
const TICKS_COMPLETED_TOTAL: &str = "rca_scheduler_ticks_completed_total";

/// Total tasklets in the scheduled graph (Local + RemoteProxy), refreshed
/// at the start of every tick.
pub fn record_graph_nodes(count: usize) {
    metrics::gauge!(GRAPH_NODES).set(count as f64);
}

/// Tasklets that emitted an empty flow unit this tick (cadence skip,
/// evaluator failure, or a remote-proxy miss), reset every tick.
pub fn record_muted_nodes(count: usize) {
    metrics::gauge!(MUTED_NODES).set(count as f64);
}

/// Wall-clock time for one full tick, from `currTick` increment to the
/// final join.
pub fn record_tick_wall_time(wall_time: Duration) {
    metrics::histogram!(TICK_WALL_TIME_SECONDS).record(wall_time.as_secs_f64());
    metrics::counter!(TICKS_COMPLETED_TOTAL).increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics_util::debugging::DebuggingRecorder;

    #[test]
    fn emits_gauges_and_histogram_without_a_global_recorder() {
        let recorder = DebuggingRecorder::new();
        let snapshotter = recorder.snapshotter();

        metrics::with_local_recorder(&recorder, || {
            record_graph_nodes(5);
            record_muted_nodes(2);
            record_tick_wall_time(Duration::from_millis(12));
        });

        let snapshot = snapshotter.snapshot().into_vec();
        assert!(!snapshot.is_empty());
    }

    #[test]
    fn calling_without_any_recorder_installed_does_not_panic() {
        record_graph_nodes(3);
        record_muted_nodes(0);
        record_tick_wall_time(Duration::from_millis(1));
    }
}
