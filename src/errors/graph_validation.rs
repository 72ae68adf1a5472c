// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while turning a [`crate::graph::config::GraphConfig`] into
/// an immutable [`crate::graph::Graph`]. A cycle in upstreams is a
/// programming error and is rejected here, before the Partitioner ever
/// runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GraphValidationError {
    /// Two vertices in the document share a name.
    #[error("duplicate vertex name: '{name}'")]
    DuplicateVertex { name: String },

    /// A vertex names an upstream that does not exist in the document.
    #[error("vertex '{vertex}' depends on unresolved upstream '{upstream}'")]
    UnresolvedUpstream { vertex: String, upstream: String },

    /// The upstream relation contains a cycle.
    #[error("cyclic upstream dependency: {}", cycle.join(" -> "))]
    CyclicDependency { cycle: Vec<String> },
}
