//! Rule-based strategic insights.
//!
//! Each rule is an independent predicate; all matching rules are emitted in
//! fixed order and none suppresses another.

use crate::classify::EvolutionStage;
use crate::metrics::{ClassifiedComponent, DependencyRank};
use crate::model::component::ComponentId;
use serde::Serialize;

/// Number of bottleneck components listed by the connectivity insight.
const BOTTLENECK_LIMIT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    HighVisibilityEarlyEvolution,
    CommodityCandidates,
    HighlyConnected,
    FullEvolutionSpectrum,
}

/// Affected component reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsightComponent {
    pub id: ComponentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub kind: InsightKind,
    pub title: &'static str,
    pub description: &'static str,
    pub recommendation: &'static str,
    /// Empty for portfolio-level observations.
    pub components: Vec<InsightComponent>,
}

impl Insight {
    fn new(kind: InsightKind, components: Vec<InsightComponent>) -> Self {
        let (title, description, recommendation) = text(kind);
        Self {
            kind,
            title,
            description,
            recommendation,
            components,
        }
    }
}

fn text(kind: InsightKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        InsightKind::HighVisibilityEarlyEvolution => (
            "High Visibility Components in Early Evolution",
            "You have highly visible components that are still in early evolution stages. These may represent innovation opportunities but also potential user experience risks.",
            "Consider accelerating the evolution of these components or managing user expectations carefully.",
        ),
        InsightKind::CommodityCandidates => (
            "Commodity Components",
            "You have components that have reached commodity status and could potentially be outsourced or replaced with utilities.",
            "Consider using third-party services, cloud solutions, or utilities for these components to reduce costs and maintenance burden.",
        ),
        InsightKind::HighlyConnected => (
            "Highly Connected Components",
            "Some components have multiple dependencies and may represent bottlenecks or critical points of failure.",
            "Ensure these components are reliable and consider redundancy strategies for critical components.",
        ),
        InsightKind::FullEvolutionSpectrum => (
            "Full Evolution Spectrum",
            "Your value chain spans the full evolution spectrum from Genesis to Commodity, which indicates a mature approach to innovation and efficiency.",
            "Continue balancing innovation (Genesis) with efficiency (Commodity) to maintain competitive advantage.",
        ),
    }
}

pub(crate) fn derive_insights(
    components: &[ClassifiedComponent],
    ranking: &[DependencyRank],
) -> Vec<Insight> {
    let mut insights = Vec::new();

    let early_visible = collect(components, |entry| {
        entry.classification.visibility_level.is_high()
            && entry.classification.evolution_stage.is_early()
    });
    if !early_visible.is_empty() {
        insights.push(Insight::new(
            InsightKind::HighVisibilityEarlyEvolution,
            early_visible,
        ));
    }

    let commodity = collect(components, |entry| {
        entry.classification.evolution_stage == EvolutionStage::Commodity
    });
    if !commodity.is_empty() {
        insights.push(Insight::new(InsightKind::CommodityCandidates, commodity));
    }

    let connected: Vec<InsightComponent> = ranking
        .iter()
        .filter(|rank| rank.dependency_count > 1)
        .take(BOTTLENECK_LIMIT)
        .map(|rank| InsightComponent {
            id: rank.id.clone(),
            name: rank.name.clone(),
        })
        .collect();
    if !connected.is_empty() {
        insights.push(Insight::new(InsightKind::HighlyConnected, connected));
    }

    let has_stage = |stage: EvolutionStage| {
        components
            .iter()
            .any(|entry| entry.classification.evolution_stage == stage)
    };
    if has_stage(EvolutionStage::Genesis) && has_stage(EvolutionStage::Commodity) {
        insights.push(Insight::new(InsightKind::FullEvolutionSpectrum, Vec::new()));
    }

    insights
}

fn collect(
    components: &[ClassifiedComponent],
    predicate: impl Fn(&ClassifiedComponent) -> bool,
) -> Vec<InsightComponent> {
    components
        .iter()
        .filter(|entry| predicate(entry))
        .map(|entry| InsightComponent {
            id: entry.component.id.clone(),
            name: entry.component.name.clone(),
        })
        .collect()
}
