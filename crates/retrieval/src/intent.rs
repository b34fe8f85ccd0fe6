//! Chart family suggested by the wording of a query

use domain::VisualizationHint;

const HINT_TRIGGERS: [(VisualizationHint, &[&str]); 3] = [
    (
        VisualizationHint::Comparison,
        &["compare", "comparison", "versus", "vs"],
    ),
    (
        VisualizationHint::Pie,
        &["pie", "breakdown", "distribution", "percentage"],
    ),
    (
        VisualizationHint::Trend,
        &["trend", "over time", "historical", "growth"],
    ),
];

/// Substring match, first family wins; tables otherwise
pub fn detect_visualization(query: &str) -> VisualizationHint {
    let query = query.to_lowercase();
    HINT_TRIGGERS
        .iter()
        .find(|(_, triggers)| triggers.iter().any(|t| query.contains(t)))
        .map(|(hint, _)| *hint)
        .unwrap_or(VisualizationHint::Table)
}
