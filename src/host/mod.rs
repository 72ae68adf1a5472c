// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Host configuration: the set of loci this host serves, plus per-vertex
//! thresholds/parameters for whichever vertices turn out to be local.
//! Loaded the same way as the Graph Model -- a `serde_yaml` document --
//! but it is a distinct collaborator, not part of the Graph Model itself.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use serde::Deserialize;

/// Opaque per-vertex thresholds/parameters. The scheduler core never
/// interprets these -- it only looks them up and hands them to the
/// (out-of-scope) vertex evaluator.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VertexParams {
    #[serde(flatten)]
    pub values: HashMap<String, serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostConfig {
    /// The loci this host serves, e.g. `{"data"}` or `{"cluster-manager"}`.
    pub loci: HashSet<String>,
    /// Per-vertex parameter overrides, keyed by vertex name.
    #[serde(default)]
    pub vertices: HashMap<String, VertexParams>,
}

impl HostConfig {
    pub fn vertex_params(&self, vertex_name: &str) -> Option<&VertexParams> {
        self.vertices.get(vertex_name)
    }
}

pub fn load_host_config<P: AsRef<Path>>(path: P) -> Result<HostConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)?;
    let cfg: HostConfig = serde_yaml::from_str(&content)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_loci_and_vertex_params() {
        let yaml = r#"
loci: ["data"]
vertices:
  cpu_saturation:
    threshold: 0.9
    window_seconds: 60
"#;
        let cfg: HostConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.loci, HashSet::from(["data".to_string()]));
        assert!(cfg.vertex_params("cpu_saturation").is_some());
        assert!(cfg.vertex_params("missing").is_none());
    }

    #[test]
    fn defaults_to_no_vertex_params() {
        let yaml = r#"
loci: ["cluster"]
"#;
        let cfg: HostConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(cfg.vertices.is_empty());
    }
}
