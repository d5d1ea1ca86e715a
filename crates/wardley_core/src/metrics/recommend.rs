//! Per-component and structural strategic recommendations.
//!
//! # Responsibility
//! - Score each component by position and graph role.
//! - Flag structural problems: isolated components, dependency cycles and
//!   clusters of highly visible components.
//!
//! # Invariants
//! - Only live relationships take part in the graph.
//! - Output order is fixed: per-component rules in snapshot order, then
//!   isolated, cycle and cluster findings.

use crate::classify::EvolutionStage;
use crate::metrics::{classified, live_relationships, ClassifiedComponent};
use crate::model::canvas::CanvasGeometry;
use crate::model::component::{ComponentId, Relationship};
use crate::model::snapshot::MapSnapshot;
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// Normalized Y above which a component counts as strategic.
pub const STRATEGIC_VISIBILITY: f64 = 0.75;

/// Betweenness a component must exceed to be a bottleneck candidate.
pub const BOTTLENECK_MIN_BETWEENNESS: f64 = 0.1;

/// At most this many of the most central components are flagged.
pub const BOTTLENECK_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    InvestInEvolution,
    Outsource,
    Bottleneck,
    Evolve,
    Isolated,
    CircularDependency,
    StrategicCluster,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategicRecommendation {
    pub kind: RecommendationKind,
    pub component_id: ComponentId,
    pub recommendation: String,
    pub priority: Priority,
    pub impact: f64,
    pub effort: f64,
    pub rationale: String,
    /// Other members of a cycle or cluster; empty for single-component rules.
    pub related: Vec<ComponentId>,
}

impl StrategicRecommendation {
    fn new(kind: RecommendationKind, component_id: &ComponentId) -> Self {
        let (recommendation, priority, impact, effort, rationale) = match kind {
            RecommendationKind::InvestInEvolution => (
                "Consider investing in R&D to evolve this strategic component",
                Priority::High,
                0.9,
                0.8,
                "High-value components in genesis stage need rapid evolution",
            ),
            RecommendationKind::Outsource => (
                "Consider outsourcing or using existing solutions",
                Priority::Medium,
                0.7,
                0.5,
                "High-value commodity could be replaced with existing solutions",
            ),
            RecommendationKind::Bottleneck => (
                "Consider breaking down or duplicating this component",
                Priority::High,
                0.8,
                0.7,
                "Component is a potential bottleneck in the value chain",
            ),
            RecommendationKind::Evolve => (
                "Consider evolving to the next stage",
                Priority::Medium,
                0.6,
                0.6,
                "Natural evolution path available",
            ),
            RecommendationKind::Isolated => (
                "Consider integrating this isolated component",
                Priority::Medium,
                0.5,
                0.4,
                "Isolated components may indicate missed opportunities",
            ),
            RecommendationKind::CircularDependency => (
                "Consider breaking circular dependency",
                Priority::High,
                0.8,
                0.7,
                "Circular dependencies can cause maintenance issues",
            ),
            RecommendationKind::StrategicCluster => (
                "Consider creating a dedicated team for this strategic cluster",
                Priority::High,
                0.9,
                0.8,
                "Strategic components should be managed together",
            ),
        };
        Self {
            kind,
            component_id: component_id.clone(),
            recommendation: recommendation.to_string(),
            priority,
            impact,
            effort,
            rationale: rationale.to_string(),
            related: Vec::new(),
        }
    }

    fn evolve(component_id: &ComponentId, next: EvolutionStage) -> Self {
        let stage = next.as_str().to_lowercase();
        Self {
            recommendation: format!("Consider evolving to {stage} stage"),
            rationale: format!("Natural evolution path available to {stage}"),
            ..Self::new(RecommendationKind::Evolve, component_id)
        }
    }

    fn with_related(mut self, related: Vec<ComponentId>) -> Self {
        self.related = related;
        self
    }
}

/// Index-based view of the live dependency graph.
struct Graph {
    successors: Vec<Vec<usize>>,
    degree: Vec<usize>,
}

impl Graph {
    fn build(components: &[ClassifiedComponent], live: &[&Relationship]) -> Self {
        let index: HashMap<&ComponentId, usize> = components
            .iter()
            .enumerate()
            .map(|(i, entry)| (&entry.component.id, i))
            .collect();
        let mut successors = vec![Vec::new(); components.len()];
        let mut degree = vec![0; components.len()];
        for relationship in live {
            if let (Some(&source), Some(&target)) =
                (index.get(&relationship.source), index.get(&relationship.target))
            {
                successors[source].push(target);
                degree[source] += 1;
                degree[target] += 1;
            }
        }
        Self { successors, degree }
    }

    fn len(&self) -> usize {
        self.successors.len()
    }

    /// Brandes betweenness, normalized by `(n-1)(n-2)` like a directed graph.
    fn betweenness(&self) -> Vec<f64> {
        let n = self.len();
        let mut centrality = vec![0.0_f64; n];
        for source in 0..n {
            let mut order = Vec::with_capacity(n);
            let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
            let mut paths = vec![0.0_f64; n];
            let mut distance: Vec<Option<usize>> = vec![None; n];
            paths[source] = 1.0;
            distance[source] = Some(0);
            let mut queue = VecDeque::from([source]);
            while let Some(node) = queue.pop_front() {
                order.push(node);
                let Some(step) = distance[node].map(|d| d + 1) else {
                    continue;
                };
                for &next in &self.successors[node] {
                    if distance[next].is_none() {
                        distance[next] = Some(step);
                        queue.push_back(next);
                    }
                    if distance[next] == Some(step) {
                        paths[next] += paths[node];
                        predecessors[next].push(node);
                    }
                }
            }
            let mut dependency = vec![0.0_f64; n];
            while let Some(node) = order.pop() {
                for &previous in &predecessors[node] {
                    dependency[previous] += paths[previous] / paths[node] * (1.0 + dependency[node]);
                }
                if node != source {
                    centrality[node] += dependency[node];
                }
            }
        }
        if n > 2 {
            let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
            for value in &mut centrality {
                *value *= scale;
            }
        }
        centrality
    }

    fn reachable_from(&self, start: usize) -> Vec<bool> {
        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::from([start]);
        while let Some(node) = queue.pop_front() {
            for &next in &self.successors[node] {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    /// Strongly connected groups with more than one member, each listed in
    /// component order.
    fn cycles(&self) -> Vec<Vec<usize>> {
        let reach: Vec<Vec<bool>> = (0..self.len()).map(|i| self.reachable_from(i)).collect();
        let mut assigned = vec![false; self.len()];
        let mut groups = Vec::new();
        for node in 0..self.len() {
            if assigned[node] || !reach[node][node] {
                continue;
            }
            let group: Vec<usize> = (0..self.len())
                .filter(|&other| other == node || (reach[node][other] && reach[other][node]))
                .collect();
            for &member in &group {
                assigned[member] = true;
            }
            groups.push(group);
        }
        groups
    }
}

/// Strategic recommendations for `snapshot`, also carried by `MapMetrics`.
pub fn recommend(snapshot: &MapSnapshot, geometry: &CanvasGeometry) -> Vec<StrategicRecommendation> {
    let components = classified(snapshot, geometry);
    derive_recommendations(&components, &live_relationships(snapshot))
}

pub(crate) fn derive_recommendations(
    components: &[ClassifiedComponent],
    live: &[&Relationship],
) -> Vec<StrategicRecommendation> {
    let graph = Graph::build(components, live);
    let id = |index: usize| &components[index].component.id;

    let centrality = graph.betweenness();
    let mut central: Vec<usize> = (0..graph.len())
        .filter(|&i| centrality[i] > BOTTLENECK_MIN_BETWEENNESS)
        .collect();
    // sort_by is stable, ties keep component order
    central.sort_by(|&a, &b| centrality[b].total_cmp(&centrality[a]));
    central.truncate(BOTTLENECK_LIMIT);

    let mut recommendations = Vec::new();
    for (index, entry) in components.iter().enumerate() {
        let classification = &entry.classification;
        let strategic = classification.normalized_y > STRATEGIC_VISIBILITY;
        if strategic && classification.normalized_x < 0.25 {
            recommendations.push(StrategicRecommendation::new(
                RecommendationKind::InvestInEvolution,
                id(index),
            ));
        }
        if strategic && classification.normalized_x > 0.75 {
            recommendations.push(StrategicRecommendation::new(
                RecommendationKind::Outsource,
                id(index),
            ));
        }
        if central.contains(&index) {
            recommendations.push(StrategicRecommendation::new(
                RecommendationKind::Bottleneck,
                id(index),
            ));
        }
        if let Some(next) = classification.evolution_stage.next() {
            recommendations.push(StrategicRecommendation::evolve(id(index), next));
        }
    }

    for index in (0..graph.len()).filter(|&i| graph.degree[i] == 0) {
        recommendations.push(StrategicRecommendation::new(
            RecommendationKind::Isolated,
            id(index),
        ));
    }

    for group in graph.cycles() {
        let related = group[1..].iter().map(|&i| id(i).clone()).collect();
        recommendations.push(
            StrategicRecommendation::new(RecommendationKind::CircularDependency, id(group[0]))
                .with_related(related),
        );
    }

    let is_strategic =
        |index: usize| components[index].classification.normalized_y > STRATEGIC_VISIBILITY;
    for index in (0..graph.len()).filter(|&i| is_strategic(i)) {
        let mut neighbours: Vec<usize> = graph.successors[index]
            .iter()
            .copied()
            .filter(|&next| is_strategic(next))
            .collect();
        neighbours.dedup();
        if neighbours.is_empty() {
            continue;
        }
        let related = neighbours.iter().map(|&i| id(i).clone()).collect();
        recommendations.push(
            StrategicRecommendation::new(RecommendationKind::StrategicCluster, id(index))
                .with_related(related),
        );
    }

    recommendations
}

#[cfg(test)]
mod tests {
    use super::Graph;

    fn graph(n: usize, edges: &[(usize, usize)]) -> Graph {
        let mut successors = vec![Vec::new(); n];
        let mut degree = vec![0; n];
        for &(a, b) in edges {
            successors[a].push(b);
            degree[a] += 1;
            degree[b] += 1;
        }
        Graph { successors, degree }
    }

    #[test]
    fn chain_middle_nodes_carry_betweenness() {
        let scores = graph(4, &[(0, 1), (1, 2), (2, 3)]).betweenness();
        assert_eq!(scores[0], 0.0);
        assert!((scores[1] - 2.0 / 6.0).abs() < 1e-12);
        assert!((scores[2] - 2.0 / 6.0).abs() < 1e-12);
        assert_eq!(scores[3], 0.0);
    }

    #[test]
    fn parallel_paths_split_betweenness() {
        // 0 -> {1, 2} -> 3
        let scores = graph(4, &[(0, 1), (0, 2), (1, 3), (2, 3)]).betweenness();
        assert!((scores[1] - scores[2]).abs() < 1e-12);
        assert!((scores[1] - 0.5 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn cycles_group_mutually_reachable_nodes() {
        let cycles = graph(5, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 4)]).cycles();
        assert_eq!(cycles, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        assert!(graph(3, &[(0, 1), (1, 2), (0, 2)]).cycles().is_empty());
    }
}
