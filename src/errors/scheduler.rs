// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::{ConfigurationError, GraphValidationError};

/// The union of everything the scheduler's constructor can fail with.
/// Construction-time errors are the only ones that surface out of this
/// crate -- per-tick failures are contained and logged instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SchedulerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    GraphValidation(#[from] GraphValidationError),
}
