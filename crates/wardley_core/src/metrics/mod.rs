//! Map metrics: distributions, fan-in ranking, density, insights and
//! strategic recommendations.
//!
//! # Responsibility
//! - Derive every analysis figure from a `MapSnapshot` without mutating it.
//!
//! # Invariants
//! - Only live relationships (both endpoints resolve) are counted.
//! - Empty maps produce zero counts, never a division by zero.
//! - Fan-in ranking is stable: ties keep snapshot order.

pub mod insight;
pub mod recommend;

use crate::classify::{classify_component, Classification, EvolutionStage, VisibilityLevel};
use crate::model::canvas::CanvasGeometry;
use crate::model::component::{Component, ComponentId, Relationship};
use crate::model::snapshot::MapSnapshot;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

pub use insight::{Insight, InsightComponent, InsightKind};
pub use recommend::{recommend, Priority, RecommendationKind, StrategicRecommendation};

/// Minimum bar fraction so empty buckets stay visible.
pub const MIN_BAR_FRACTION: f64 = 0.05;

/// Number of ranked components shown as "top connected".
pub const TOP_CONNECTED_LIMIT: usize = 4;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedComponent {
    pub component: Component,
    pub classification: Classification,
}

/// One distribution bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bucket<K> {
    pub key: K,
    pub count: usize,
    /// `count / total`, `0.0` for an empty map.
    pub share: f64,
}

impl<K> Bucket<K> {
    pub fn percent(&self) -> i64 {
        (self.share * 100.0).round() as i64
    }

    /// Display height of the bucket bar.
    pub fn bar_fraction(&self) -> f64 {
        self.share.max(MIN_BAR_FRACTION)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DependencyRank {
    pub id: ComponentId,
    pub name: String,
    pub dependency_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetworkDensity {
    pub ratio: f64,
    pub connections_per_component: f64,
}

impl NetworkDensity {
    /// Rounded percentage capped at 100.
    pub fn percent(&self) -> i64 {
        (self.ratio * 100.0).round().min(100.0) as i64
    }
}

/// Full analysis of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMetrics {
    pub component_count: usize,
    pub relationship_count: usize,
    pub components: Vec<ClassifiedComponent>,
    pub evolution: Vec<Bucket<EvolutionStage>>,
    pub visibility: Vec<Bucket<VisibilityLevel>>,
    pub ranking: Vec<DependencyRank>,
    pub density: NetworkDensity,
    pub insights: Vec<Insight>,
    pub recommendations: Vec<StrategicRecommendation>,
}

impl MapMetrics {
    pub fn top_connected(&self, limit: usize) -> &[DependencyRank] {
        &self.ranking[..limit.min(self.ranking.len())]
    }

    pub fn dependency_count(&self, id: &ComponentId) -> usize {
        self.ranking
            .iter()
            .find(|rank| &rank.id == id)
            .map_or(0, |rank| rank.dependency_count)
    }
}

/// Analyzes `snapshot` against `geometry`.
pub fn analyze(snapshot: &MapSnapshot, geometry: &CanvasGeometry) -> MapMetrics {
    let components = classified(snapshot, geometry);
    let total = components.len();

    let evolution = EvolutionStage::ALL
        .iter()
        .map(|stage| {
            let count = components
                .iter()
                .filter(|entry| entry.classification.evolution_stage == *stage)
                .count();
            bucket(*stage, count, total)
        })
        .collect();
    let visibility = VisibilityLevel::ALL
        .iter()
        .map(|level| {
            let count = components
                .iter()
                .filter(|entry| entry.classification.visibility_level == *level)
                .count();
            bucket(*level, count, total)
        })
        .collect();

    let live = live_relationships(snapshot);

    let mut fan_in: HashMap<&ComponentId, usize> = HashMap::new();
    for relationship in &live {
        *fan_in.entry(&relationship.target).or_insert(0) += 1;
    }
    let mut ranking: Vec<DependencyRank> = snapshot
        .components
        .iter()
        .map(|component| DependencyRank {
            id: component.id.clone(),
            name: component.name.clone(),
            dependency_count: fan_in.get(&component.id).copied().unwrap_or(0),
        })
        .collect();
    // sort_by is stable
    ranking.sort_by(|a, b| b.dependency_count.cmp(&a.dependency_count));

    let relationship_count = live.len();
    let max_edges = (total * total.saturating_sub(1) / 2).max(1);
    let density = NetworkDensity {
        ratio: relationship_count as f64 / max_edges as f64,
        connections_per_component: relationship_count as f64 / total.max(1) as f64,
    };

    let insights = insight::derive_insights(&components, &ranking);
    let recommendations = recommend::derive_recommendations(&components, &live);

    MapMetrics {
        component_count: total,
        relationship_count,
        components,
        evolution,
        visibility,
        ranking,
        density,
        insights,
        recommendations,
    }
}

fn classified(snapshot: &MapSnapshot, geometry: &CanvasGeometry) -> Vec<ClassifiedComponent> {
    snapshot
        .components
        .iter()
        .map(|component| ClassifiedComponent {
            component: component.clone(),
            classification: classify_component(component, geometry),
        })
        .collect()
}

fn live_relationships(snapshot: &MapSnapshot) -> Vec<&Relationship> {
    let live_ids: HashSet<&ComponentId> = snapshot.components.iter().map(|c| &c.id).collect();
    snapshot
        .relationships
        .iter()
        .filter(|rel| live_ids.contains(&rel.source) && live_ids.contains(&rel.target))
        .collect()
}

fn bucket<K>(key: K, count: usize, total: usize) -> Bucket<K> {
    let share = if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    };
    Bucket { key, count, share }
}
