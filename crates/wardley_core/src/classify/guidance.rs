//! Static strategic text keyed by evolution stage and visibility band.
//!
//! This is declarative data: every lookup is a table index, not a rule engine.

use crate::classify::stage::{Classification, EvolutionStage, VisibilityBand};

/// Detail-panel text for one classified component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrategicGuidance {
    pub stage_summary: &'static str,
    pub characteristics: &'static [&'static str],
    pub market_properties: &'static [&'static str],
    pub recommendations: Vec<&'static str>,
}

/// Looks up the strategic text for `classification`.
pub fn strategic_guidance(classification: &Classification) -> StrategicGuidance {
    let stage = classification.evolution_stage;
    let band = classification.visibility_band();

    let mut recommendations = stage_recommendations(stage).to_vec();
    recommendations.extend_from_slice(visibility_recommendations(band, stage.is_early()));

    StrategicGuidance {
        stage_summary: stage_summary(stage),
        characteristics: characteristics(stage),
        market_properties: market_properties(stage),
        recommendations,
    }
}

pub fn stage_summary(stage: EvolutionStage) -> &'static str {
    match stage {
        EvolutionStage::Genesis => "Genesis (I) - Novel, unmodeled, and uncertain",
        EvolutionStage::Custom => "Custom (II) - Emerging, divergent, with rapid learning",
        EvolutionStage::Product => {
            "Product (III) - Convergent, good fit for purpose, increasing certainty"
        }
        EvolutionStage::Commodity => {
            "Commodity/Utility (IV) - Accepted, modeled, and standardized"
        }
    }
}

pub fn characteristics(stage: EvolutionStage) -> &'static [&'static str] {
    match stage {
        EvolutionStage::Genesis => &[
            "Uniquity: Unique/rare",
            "Certainty: Poorly understood/exploring the unknown",
            "Market: Undefined market",
            "Knowledge management: Uncertain",
            "Market perception: Chaotic/non-linear/domain of the unknown",
        ],
        EvolutionStage::Custom => &[
            "Uniquity: Slowly increasing",
            "Certainty: Rapid increases in learning/discovery becoming refining",
            "Market: Forming market with competing forms and different models",
            "Knowledge management: Learning on use/focused on testing prediction",
            "Market perception: Domain of 'experts'",
        ],
        EvolutionStage::Product => &[
            "Uniquity: Rapidly increasing",
            "Certainty: Rapid increases in use/increasing fit for purpose",
            "Market: Growing market/consolidation to a few competing but accepted forms",
            "Knowledge management: Learning on operation/using prediction for verification",
            "Market perception: Increasing expectation of use/domain of 'professionals'",
        ],
        EvolutionStage::Commodity => &[
            "Uniquity: Widespread in applicable market ecosystem",
            "Certainty: Commonly understood (in terms of use)",
            "Market: Mature market stabilized to an accepted form",
            "Knowledge management: Known/accepted",
            "Market perception: Ordered/perceived as being linear/domain to be applied",
        ],
    }
}

pub fn market_properties(stage: EvolutionStage) -> &'static [&'static str] {
    match stage {
        EvolutionStage::Genesis => &[
            "User perception: Different/confusing/exciting/surprising/dangerous",
            "Perception in industry: Future source of competitive advantage/unpredictable/unknown",
            "Focus of value: High future worth but immediate investment",
            "Failure: High/tolerated/assumed to be wrong",
            "Market action: Gambling/driven by gut",
            "Decision drivers: Heritage/culture",
        ],
        EvolutionStage::Custom => &[
            "User perception: Leading edge/emerging/uncertainty over results",
            "Perception in industry: Seen as competitive advantage/differential/looking for ROI",
            "Focus of value: Seeking ways to profit/ROI seeking confirmation of value",
            "Failure: Moderate/unsurprising if wrong but disappointing",
            "Market action: Exploring a 'found' value",
            "Decision drivers: Analysis & synthesis",
        ],
        EvolutionStage::Product => &[
            "User perception: Increasingly common/disappointed if not used or available/trailing edge if not",
            "Perception in industry: Advantage through implementation/features/this model is better than that",
            "Focus of value: High profitability per unit/valuable model/feeling of understanding/focus on optimization",
            "Failure: Not tolerated/assumed to be due to lack of improvement/resistance to change in the model",
            "Market action: Market analysis/listening to customers",
            "Decision drivers: Analysis & synthesis",
        ],
        EvolutionStage::Commodity => &[
            "User perception: Standard/expected/feeling of shock if not used",
            "Perception in industry: Cost of doing business/operational/specific accepted models",
            "Focus of value: High volume/reducing margin/essential but increasingly invisible component of something more complex",
            "Failure: Surprised by failure/focus on operational efficiency",
            "Market action: Metric driven/build what is needed",
            "Decision drivers: Previous experience",
        ],
    }
}

fn stage_recommendations(stage: EvolutionStage) -> &'static [&'static str] {
    match stage {
        EvolutionStage::Genesis => &[
            "Invest in research and exploration of this novel component",
            "Expect and tolerate high failure rates",
            "Focus on learning and discovery rather than efficiency",
            "Consider in-house development to maintain control of intellectual property",
        ],
        EvolutionStage::Custom => &[
            "Begin standardizing practices around this component",
            "Document learning and establish best practices",
            "Consider building for reuse within the organization",
            "Measure ROI and validate value proposition",
        ],
        EvolutionStage::Product => &[
            "Focus on feature differentiation and implementation quality",
            "Consider buying products rather than building custom solutions",
            "Optimize for operational efficiency",
            "Establish metrics and KPIs for performance",
        ],
        EvolutionStage::Commodity => &[
            "Outsource or use utility services where possible",
            "Focus on cost reduction and operational excellence",
            "Standardize interfaces and integration points",
            "Automate management and maintenance",
        ],
    }
}

fn visibility_recommendations(band: VisibilityBand, early_stage: bool) -> &'static [&'static str] {
    match (band, early_stage) {
        (VisibilityBand::High, true) => &[
            "This component is highly visible to users - prioritize user experience and reliability",
            "Consider how to manage user expectations with this evolving component",
        ],
        (VisibilityBand::High, false) => &[
            "This component is highly visible to users - prioritize user experience and reliability",
        ],
        (VisibilityBand::Low, true) => &[
            "This component has low visibility to users - focus on operational efficiency and cost",
            "Be cautious of hidden technical debt in this evolving infrastructure component",
        ],
        (VisibilityBand::Low, false) => &[
            "This component has low visibility to users - focus on operational efficiency and cost",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::strategic_guidance;
    use crate::classify::stage::classify;
    use crate::model::canvas::CanvasGeometry;

    #[test]
    fn early_high_visibility_gets_expectation_advice() {
        let geometry = CanvasGeometry::default();
        let guidance = strategic_guidance(&classify(100.0, 60.0, &geometry));
        assert_eq!(guidance.recommendations.len(), 6);
        assert!(guidance.recommendations[0].starts_with("Invest in research"));
        assert!(guidance.recommendations[5].contains("manage user expectations"));
    }

    #[test]
    fn late_low_visibility_gets_single_visibility_line() {
        let geometry = CanvasGeometry::default();
        let guidance = strategic_guidance(&classify(740.0, 550.0, &geometry));
        assert_eq!(guidance.recommendations.len(), 5);
        assert!(guidance.stage_summary.starts_with("Commodity/Utility"));
        assert!(guidance.recommendations[4].contains("low visibility"));
    }
}
