//! Local performance report rendering
//!
//! Fixed template, no timestamps and no randomness: identical inputs always
//! give identical bytes.

use crate::recommend::{recommend, render_recommendations, Recommendation};
use crate::trend::{classify, TrendLabel};

/// Prefix marking a report produced without the remote service
pub const FALLBACK_MARKER: &str = "[LOCAL ANALYSIS FALLBACK]";

/// Render the report body
pub fn format_report(
    username: &str,
    kd: f64,
    hs_pct: f64,
    trend: TrendLabel,
    recommendations: &[Recommendation],
) -> String {
    format!(
        "Performance analysis for player {}: Current K/D is {:.2} ({}). Headshot accuracy at {:.1}%. Recommendation: {}",
        username,
        kd,
        trend.phrase(),
        hs_pct,
        render_recommendations(recommendations)
    )
}

/// Run classifier, rules and formatter, and tag the result with `FALLBACK_MARKER`
pub fn local_report(username: &str, kd: f64, hs_pct: f64, history: &[f64]) -> String {
    let trend = classify(history);
    let recommendations = recommend(kd, hs_pct);

    tracing::debug!(
        trend = trend.as_str(),
        recommendations = recommendations.len(),
        "Built local analysis"
    );

    format!(
        "{} {}",
        FALLBACK_MARKER,
        format_report(username, kd, hs_pct, trend, &recommendations)
    )
}
