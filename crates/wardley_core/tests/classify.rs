use wardley_core::classify::{classify, strategic_guidance, EvolutionStage, VisibilityLevel};
use wardley_core::CanvasGeometry;

fn canvas_x(normalized: f64) -> f64 {
    40.0 + normalized * 720.0
}

fn canvas_y(normalized: f64) -> f64 {
    560.0 - normalized * 520.0
}

#[test]
fn stage_boundaries_are_exclusive_low() {
    let geometry = CanvasGeometry::default();
    let stage = |nx: f64| classify(canvas_x(nx), 300.0, &geometry).evolution_stage;

    assert_eq!(stage(0.0), EvolutionStage::Genesis);
    assert_eq!(stage(0.25), EvolutionStage::Custom);
    assert_eq!(stage(0.5), EvolutionStage::Product);
    assert_eq!(stage(0.75), EvolutionStage::Commodity);
}

#[test]
fn everything_right_of_three_quarters_is_commodity() {
    let geometry = CanvasGeometry::default();
    for step in 0..=40 {
        let nx = 0.75 + f64::from(step) * 0.01;
        assert_eq!(
            classify(canvas_x(nx), 300.0, &geometry).evolution_stage,
            EvolutionStage::Commodity,
            "nx={nx}"
        );
    }
}

#[test]
fn visibility_levels_follow_upward_axis() {
    let geometry = CanvasGeometry::default();
    let level = |ny: f64| classify(400.0, canvas_y(ny), &geometry).visibility_level;

    assert_eq!(level(0.9), VisibilityLevel::VeryHigh);
    assert_eq!(level(0.75), VisibilityLevel::High);
    assert_eq!(level(0.6), VisibilityLevel::High);
    assert_eq!(level(0.5), VisibilityLevel::Medium);
    assert_eq!(level(0.25), VisibilityLevel::Low);
    assert_eq!(level(-0.2), VisibilityLevel::Low);
}

#[test]
fn normalization_uses_the_inset_plot_area() {
    let classification = classify(400.0, 300.0, &CanvasGeometry::default());
    assert!((classification.normalized_x - 0.5).abs() < 1e-12);
    assert!((classification.normalized_y - 0.5).abs() < 1e-12);
    assert_eq!(classification.evolution_percent(), 50);
    assert_eq!(classification.visibility_percent(), 50);
}

#[test]
fn out_of_plot_positions_are_still_classified() {
    let classification = classify(-100.0, 700.0, &CanvasGeometry::default());
    assert_eq!(classification.evolution_stage, EvolutionStage::Genesis);
    assert_eq!(classification.visibility_level, VisibilityLevel::Low);
}

#[test]
fn level_labels_match_display_text() {
    assert_eq!(VisibilityLevel::VeryHigh.to_string(), "Very High");
    assert_eq!(EvolutionStage::Commodity.to_string(), "Commodity");
}

#[test]
fn guidance_depends_on_stage_and_visibility_band() {
    let geometry = CanvasGeometry::default();
    let visible_genesis = strategic_guidance(&classify(canvas_x(0.1), canvas_y(0.9), &geometry));
    let hidden_genesis = strategic_guidance(&classify(canvas_x(0.1), canvas_y(0.1), &geometry));

    assert_eq!(visible_genesis.stage_summary, hidden_genesis.stage_summary);
    assert_eq!(visible_genesis.characteristics, hidden_genesis.characteristics);
    assert_ne!(visible_genesis.recommendations, hidden_genesis.recommendations);
    assert!(!visible_genesis.market_properties.is_empty());
}

#[test]
fn next_stage_walks_the_axis_and_stops_at_commodity() {
    assert_eq!(EvolutionStage::Genesis.next(), Some(EvolutionStage::Custom));
    assert_eq!(EvolutionStage::Product.next(), Some(EvolutionStage::Commodity));
    assert_eq!(EvolutionStage::Commodity.next(), None);
}
