// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};

use serde::Deserialize;

/// What kind of evaluator a vertex needs at run time.
///
/// Decided once, from configuration, and never inspected again at runtime:
/// a tagged variant chosen at partition time rather than a runtime lookup
/// by string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VertexKind {
    /// Reads a metric batch and produces a flow unit from it directly.
    MetricSource,
    /// Computes a flow unit purely from upstream flow units.
    Computed,
    /// Summarizes/aggregates several upstream flow units into one.
    Summarizer,
}

impl VertexKind {
    /// The evaluator-registry key for this kind, matching the `kind` values
    /// accepted in graph configuration documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            VertexKind::MetricSource => "metric_source",
            VertexKind::Computed => "computed",
            VertexKind::Summarizer => "summarizer",
        }
    }
}

/// Static description of one RCA graph node.
#[derive(Debug, Clone)]
pub struct Vertex {
    pub name: String,
    pub tags: HashMap<String, String>,
    pub upstream: Vec<String>,
    pub tick_period: u32,
    pub kind: VertexKind,
}

impl Vertex {
    /// The `|`-separated `locus` tag, parsed into a set. Missing or empty is
    /// treated as the empty set, never as "local everywhere".
    pub fn locus(&self) -> HashSet<&str> {
        self.tags
            .get("locus")
            .map(|v| v.split('|').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// The single `aggregate-upstream` locus name, if tagged.
    pub fn aggregate_upstream(&self) -> Option<&str> {
        self.tags
            .get("aggregate-upstream")
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    /// True iff this vertex's locus set intersects the host's configured loci.
    pub fn is_local_to(&self, host_loci: &HashSet<String>) -> bool {
        self.locus().iter().any(|l| host_loci.contains(*l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(tags: &[(&str, &str)]) -> Vertex {
        Vertex {
            name: "v".to_string(),
            tags: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            upstream: vec![],
            tick_period: 1,
            kind: VertexKind::Computed,
        }
    }

    #[test]
    fn missing_locus_is_empty_set() {
        let v = vertex(&[]);
        assert!(v.locus().is_empty());
        let host = HashSet::from(["data".to_string()]);
        assert!(!v.is_local_to(&host));
    }

    #[test]
    fn locus_parses_pipe_separated_values() {
        let v = vertex(&[("locus", "data|cluster")]);
        assert_eq!(v.locus(), HashSet::from(["data", "cluster"]));
    }

    #[test]
    fn empty_locus_string_is_not_local_anywhere() {
        let v = vertex(&[("locus", "")]);
        assert!(v.locus().is_empty());
    }

    #[test]
    fn aggregate_upstream_reads_single_tag() {
        let v = vertex(&[("aggregate-upstream", "data")]);
        assert_eq!(v.aggregate_upstream(), Some("data"));
        assert_eq!(vertex(&[]).aggregate_upstream(), None);
    }

    #[test]
    fn kind_as_str_matches_config_spelling() {
        assert_eq!(VertexKind::MetricSource.as_str(), "metric_source");
        assert_eq!(VertexKind::Computed.as_str(), "computed");
        assert_eq!(VertexKind::Summarizer.as_str(), "summarizer");
    }
}
