// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Raised from inside a Local tasklet's evaluator. Never escapes the
/// tasklet: caught at the call site, logged, and converted into an empty
/// flow unit so downstream tasklets are not starved.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    #[error("evaluator for vertex '{vertex}' failed: {reason}")]
    Failed { vertex: String, reason: String },

    #[error("no evaluator registered for vertex kind '{kind}' (vertex '{vertex}')")]
    NoEvaluator { vertex: String, kind: String },
}
