// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Raised from the scheduler's constructor when a local vertex's
/// configuration cannot be resolved. Fatal to construction — this is the
/// one error category the scheduler ever surfaces to its caller.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    /// A vertex classified as local has no matching entry (thresholds,
    /// parameters) in the host configuration.
    #[error("vertex '{vertex}' is local to this host but has no host configuration entry")]
    MissingVertexConfig { vertex: String },

    /// The host configuration declares no loci at all, so every vertex in
    /// the graph would be non-local — almost certainly a misconfiguration
    /// rather than an intentional all-remote deployment.
    #[error("host configuration declares no loci; this host would execute nothing locally")]
    NoLociConfigured,

    /// A local vertex's `kind` has no registered evaluator.
    #[error("vertex '{vertex}' is local to this host but no evaluator is registered for kind '{kind}'")]
    MissingEvaluator { vertex: String, kind: String },
}
