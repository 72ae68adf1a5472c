// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Turns a [`crate::graph::config::GraphConfig`] into an immutable
//! [`crate::graph::Graph`]: duplicate-name and unresolved-reference checks,
//! cycle detection, connected-component grouping, and per-component
//! leveling. Grounded on a `config::validation` pipeline and
//! `DependencyGraph::topological_sort_dfs`/`topological_sort_with_counts`
//! (DFS recursion-stack cycle detection, Kahn's-algorithm leveling) --
//! generalized from a single flat DAG to one DAG per connected component.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::errors::GraphValidationError;
use crate::graph::component::ConnectedComponent;
use crate::graph::config::GraphConfig;
use crate::graph::vertex::Vertex;
use crate::graph::Graph;

pub fn build_graph(config: &GraphConfig) -> Result<Graph, GraphValidationError> {
    let mut seen = HashSet::new();
    for vc in &config.vertices {
        if !seen.insert(vc.name.clone()) {
            return Err(GraphValidationError::DuplicateVertex {
                name: vc.name.clone(),
            });
        }
    }

    let names: HashSet<&str> = config.vertices.iter().map(|v| v.name.as_str()).collect();
    for vc in &config.vertices {
        for upstream in &vc.upstream {
            if !names.contains(upstream.as_str()) {
                return Err(GraphValidationError::UnresolvedUpstream {
                    vertex: vc.name.clone(),
                    upstream: upstream.clone(),
                });
            }
        }
    }

    let mut vertices: HashMap<String, Arc<Vertex>> = HashMap::new();
    for vc in &config.vertices {
        vertices.insert(
            vc.name.clone(),
            Arc::new(Vertex {
                name: vc.name.clone(),
                tags: vc.tags.clone(),
                upstream: vc.upstream.clone(),
                tick_period: vc.tick_period.max(1),
                kind: vc.kind,
            }),
        );
    }

    detect_cycle(&vertices)?;

    let components_by_name = group_connected_components(&vertices);
    let mut components: Vec<ConnectedComponent> = components_by_name
        .into_values()
        .map(|names| build_component(&vertices, &names))
        .collect();

    components.sort_by(|a, b| first_name(a).cmp(&first_name(b)));

    Ok(Graph { components })
}

fn first_name(component: &ConnectedComponent) -> String {
    component
        .levels
        .first()
        .and_then(|level| level.first())
        .map(|v| v.name.clone())
        .unwrap_or_default()
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    Visiting,
    Visited,
}

fn detect_cycle(vertices: &HashMap<String, Arc<Vertex>>) -> Result<(), GraphValidationError> {
    fn visit(
        name: &str,
        vertices: &HashMap<String, Arc<Vertex>>,
        state: &mut HashMap<String, VisitState>,
        path: &mut Vec<String>,
    ) -> Result<(), GraphValidationError> {
        match state.get(name).copied().unwrap_or(VisitState::Unvisited) {
            VisitState::Visiting => {
                let start = path.iter().position(|n| n == name).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(name.to_string());
                return Err(GraphValidationError::CyclicDependency { cycle });
            }
            VisitState::Visited => return Ok(()),
            VisitState::Unvisited => {}
        }

        state.insert(name.to_string(), VisitState::Visiting);
        path.push(name.to_string());
        if let Some(vertex) = vertices.get(name) {
            for upstream in &vertex.upstream {
                visit(upstream, vertices, state, path)?;
            }
        }
        path.pop();
        state.insert(name.to_string(), VisitState::Visited);
        Ok(())
    }

    let mut state = HashMap::new();
    let mut names: Vec<&String> = vertices.keys().collect();
    names.sort();
    for name in names {
        if state.get(name).copied().unwrap_or(VisitState::Unvisited) == VisitState::Unvisited {
            visit(name, vertices, &mut state, &mut Vec::new())?;
        }
    }
    Ok(())
}

/// Union-find over the undirected "shares an edge" relation, to split the
/// graph into its weakly connected components.
struct UnionFind {
    parent: HashMap<String, String>,
}

impl UnionFind {
    fn new(names: impl Iterator<Item = String>) -> Self {
        let parent = names.map(|n| (n.clone(), n)).collect();
        Self { parent }
    }

    fn find(&mut self, name: &str) -> String {
        let next = self.parent.get(name).cloned().unwrap_or_else(|| name.to_string());
        if next == name {
            name.to_string()
        } else {
            let root = self.find(&next);
            self.parent.insert(name.to_string(), root.clone());
            root
        }
    }

    fn union(&mut self, a: &str, b: &str) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            self.parent.insert(ra, rb);
        }
    }
}

fn group_connected_components(
    vertices: &HashMap<String, Arc<Vertex>>,
) -> HashMap<String, Vec<String>> {
    let mut uf = UnionFind::new(vertices.keys().cloned());
    for (name, vertex) in vertices {
        for upstream in &vertex.upstream {
            uf.union(name, upstream);
        }
    }

    let mut groups: HashMap<String, Vec<String>> = HashMap::new();
    let mut names: Vec<&String> = vertices.keys().collect();
    names.sort();
    for name in names {
        let root = uf.find(name);
        groups.entry(root).or_default().push(name.clone());
    }
    groups
}

/// Level a single connected component with a batched Kahn's algorithm: all
/// vertices whose remaining in-degree drops to zero in the same round land
/// in the same level, preserving the invariant that every edge goes from a
/// lower to a strictly higher level.
fn build_component(vertices: &HashMap<String, Arc<Vertex>>, names: &[String]) -> ConnectedComponent {
    let member: HashSet<&str> = names.iter().map(String::as_str).collect();

    let mut dependents: HashMap<&str, Vec<&str>> = HashMap::new();
    let mut in_degree: HashMap<&str, usize> = HashMap::new();
    for name in &member {
        dependents.entry(name).or_default();
        in_degree.entry(name).or_insert(0);
    }
    for name in names {
        let vertex = &vertices[name];
        for upstream in &vertex.upstream {
            dependents.entry(upstream.as_str()).or_default().push(name.as_str());
            *in_degree.entry(name.as_str()).or_insert(0) += 1;
        }
    }

    let mut levels: Vec<Vec<Arc<Vertex>>> = Vec::new();
    let mut remaining = in_degree;
    let mut frontier: Vec<&str> = remaining
        .iter()
        .filter(|&(_, &count)| count == 0)
        .map(|(&name, _)| name)
        .collect();
    frontier.sort();

    while !frontier.is_empty() {
        let mut level: Vec<Arc<Vertex>> = frontier.iter().map(|n| vertices[*n].clone()).collect();
        level.sort_by(|a, b| a.name.cmp(&b.name));
        levels.push(level);

        let mut next: HashSet<&str> = HashSet::new();
        for name in &frontier {
            for &dependent in dependents.get(name).map(|v| v.as_slice()).unwrap_or(&[]) {
                if let Some(count) = remaining.get_mut(dependent) {
                    *count -= 1;
                    if *count == 0 {
                        next.insert(dependent);
                    }
                }
            }
        }
        frontier = next.into_iter().collect();
        frontier.sort();
    }

    ConnectedComponent { levels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::config::VertexConfig;
    use crate::graph::vertex::VertexKind;

    fn vc(name: &str, upstream: &[&str]) -> VertexConfig {
        VertexConfig {
            name: name.to_string(),
            tags: HashMap::new(),
            upstream: upstream.iter().map(|s| s.to_string()).collect(),
            tick_period: 1,
            kind: VertexKind::Computed,
        }
    }

    #[test]
    fn detects_duplicate_vertex_names() {
        let cfg = GraphConfig {
            vertices: vec![vc("a", &[]), vc("a", &[])],
        };
        let err = build_graph(&cfg).unwrap_err();
        assert_eq!(
            err,
            GraphValidationError::DuplicateVertex { name: "a".into() }
        );
    }

    #[test]
    fn detects_unresolved_upstream() {
        let cfg = GraphConfig {
            vertices: vec![vc("a", &["missing"])],
        };
        let err = build_graph(&cfg).unwrap_err();
        assert_eq!(
            err,
            GraphValidationError::UnresolvedUpstream {
                vertex: "a".into(),
                upstream: "missing".into()
            }
        );
    }

    #[test]
    fn detects_cycle() {
        let cfg = GraphConfig {
            vertices: vec![vc("a", &["b"]), vc("b", &["a"])],
        };
        let err = build_graph(&cfg).unwrap_err();
        assert!(matches!(err, GraphValidationError::CyclicDependency { .. }));
    }

    #[test]
    fn linear_chain_has_three_levels_in_one_component() {
        let cfg = GraphConfig {
            vertices: vec![vc("a", &[]), vc("b", &["a"]), vc("c", &["b"])],
        };
        let graph = build_graph(&cfg).unwrap();
        assert_eq!(graph.components.len(), 1);
        let levels = &graph.components[0].levels;
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0][0].name, "a");
        assert_eq!(levels[1][0].name, "b");
        assert_eq!(levels[2][0].name, "c");
    }

    #[test]
    fn disconnected_vertices_form_separate_components() {
        let cfg = GraphConfig {
            vertices: vec![vc("a", &[]), vc("b", &[])],
        };
        let graph = build_graph(&cfg).unwrap();
        assert_eq!(graph.components.len(), 2);
    }

    #[test]
    fn diamond_pattern_levels_by_depth() {
        let cfg = GraphConfig {
            vertices: vec![
                vc("a", &[]),
                vc("b", &["a"]),
                vc("c", &["a"]),
                vc("d", &["b", "c"]),
            ],
        };
        let graph = build_graph(&cfg).unwrap();
        let levels = &graph.components[0].levels;
        assert_eq!(levels.len(), 3);
        assert_eq!(levels[0][0].name, "a");
        assert_eq!(levels[1].len(), 2);
        assert_eq!(levels[2][0].name, "d");
    }
}
