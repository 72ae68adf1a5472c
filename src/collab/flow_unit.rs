// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// The diagnostic record a vertex produces on a tick.
///
/// The real schema for RCA output (symptoms, suspected resources, confidence
/// scores, and so on) lives in the summary/result data classes that this
/// crate treats as an out-of-scope collaborator — see [`crate::collab::evaluator`].
/// `FlowUnit` only carries enough structure for the scheduler itself to route,
/// persist, and forward it without understanding its contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FlowUnit {
    /// Name of the vertex that produced this flow unit.
    pub vertex: String,
    /// Opaque diagnostic fields; interpretation belongs to the vertex evaluator
    /// and the (out-of-scope) persistence schema.
    pub fields: HashMap<String, String>,
}

impl FlowUnit {
    /// An empty flow unit for `vertex` — what a muted tasklet or an absent
    /// remote read produces.
    pub fn empty(vertex: impl Into<String>) -> Self {
        Self {
            vertex: vertex.into(),
            fields: HashMap::new(),
        }
    }

    /// A flow unit carrying the given fields.
    pub fn with_fields(vertex: impl Into<String>, fields: HashMap<String, String>) -> Self {
        Self {
            vertex: vertex.into(),
            fields,
        }
    }

    /// True for flow units produced by a muted tasklet, a remote-proxy miss,
    /// or a suppressed evaluator failure.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A batch of metric readings for a single vertex, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricBatch {
    pub values: HashMap<String, f64>,
}

impl MetricBatch {
    pub fn new(values: HashMap<String, f64>) -> Self {
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_flow_unit_has_no_fields() {
        let fu = FlowUnit::empty("vertex-a");
        assert_eq!(fu.vertex, "vertex-a");
        assert!(fu.is_empty());
    }

    #[test]
    fn flow_unit_with_fields_is_not_empty() {
        let mut fields = HashMap::new();
        fields.insert("severity".to_string(), "high".to_string());
        let fu = FlowUnit::with_fields("vertex-a", fields);
        assert!(!fu.is_empty());
    }
}
