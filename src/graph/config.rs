// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! YAML-deserializable description of an RCA graph, the way a
//! `config::loader` deserializes a processor DAG. This is the in-process
//! construction path for the Graph Model -- peer discovery, wire protocols,
//! and any outer CLI/bootstrap layer are left to the caller.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::graph::vertex::VertexKind;

/// Top-level RCA graph document: every vertex in the deployment, regardless
/// of which host ultimately executes it.
#[derive(Debug, Deserialize)]
pub struct GraphConfig {
    pub vertices: Vec<VertexConfig>,
}

/// One vertex entry in the graph document.
#[derive(Debug, Deserialize)]
pub struct VertexConfig {
    pub name: String,
    #[serde(default)]
    pub tags: HashMap<String, String>,
    #[serde(default)]
    pub upstream: Vec<String>,
    #[serde(default = "default_tick_period")]
    pub tick_period: u32,
    pub kind: VertexKind,
}

fn default_tick_period() -> u32 {
    1
}

/// Load a `GraphConfig` from a YAML file. Validation (cycles, duplicate
/// names, unresolved references) is a separate step -- see
/// [`crate::graph::validation`].
pub fn load_graph_config<P: AsRef<Path>>(path: P) -> Result<GraphConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let cfg: GraphConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_vertex() {
        let yaml = r#"
vertices:
  - name: a
    kind: metric_source
"#;
        let cfg: GraphConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.vertices.len(), 1);
        assert_eq!(cfg.vertices[0].tick_period, 1);
        assert!(cfg.vertices[0].tags.is_empty());
        assert!(cfg.vertices[0].upstream.is_empty());
    }

    #[test]
    fn parses_full_vertex() {
        let yaml = r#"
vertices:
  - name: b
    tags:
      locus: "data|cluster"
      aggregate-upstream: data
    upstream: [a]
    tick_period: 3
    kind: computed
"#;
        let cfg: GraphConfig = serde_yaml::from_str(yaml).unwrap();
        let v = &cfg.vertices[0];
        assert_eq!(v.name, "b");
        assert_eq!(v.tags.get("locus"), Some(&"data|cluster".to_string()));
        assert_eq!(v.upstream, vec!["a".to_string()]);
        assert_eq!(v.tick_period, 3);
        assert_eq!(v.kind, VertexKind::Computed);
    }
}
