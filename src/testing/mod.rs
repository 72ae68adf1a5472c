// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test-only in-memory collaborators. Not part of the public API -- gated
//! behind `cfg(test)` in `lib.rs`.

pub mod stubs;
