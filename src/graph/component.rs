// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::graph::vertex::Vertex;

/// A maximal weakly connected subgraph, precomputed as topological levels.
/// Level 0 has no upstreams within the component; level *k* depends only
/// on levels `< k`.
#[derive(Debug, Clone, Default)]
pub struct ConnectedComponent {
    pub levels: Vec<Vec<Arc<Vertex>>>,
}

impl ConnectedComponent {
    pub fn vertex_count(&self) -> usize {
        self.levels.iter().map(Vec::len).sum()
    }
}
