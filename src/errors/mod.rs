// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod configuration;
mod evaluation;
mod graph_validation;
mod scheduler;

pub use configuration::ConfigurationError;
pub use evaluation::EvaluationError;
pub use graph_validation::GraphValidationError;
pub use scheduler::SchedulerError;
