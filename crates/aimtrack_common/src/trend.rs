//! K/D Trend Classification
//!
//! Trend labels are mechanically defined over a history window ordered
//! oldest to newest:
//! - fewer than 3 points: insufficient data
//! - newest minus oldest above +0.1: improving
//! - newest minus oldest below -0.1: declining
//! - anything else: stable

use serde::{Deserialize, Serialize};

/// Minimum history points for a trend
pub const MIN_TREND_POINTS: usize = 3;

/// Absolute K/D change separating a trend from noise
pub const TREND_THRESHOLD: f64 = 0.1;

/// Trend direction of the K/D history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Improving,
    Declining,
    Stable,
    InsufficientData,
}

impl TrendLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TrendLabel::Improving => "improving",
            TrendLabel::Declining => "declining",
            TrendLabel::Stable => "stable",
            TrendLabel::InsufficientData => "insufficient data",
        }
    }

    /// Phrase used inside the local report
    pub fn phrase(&self) -> &'static str {
        match self {
            TrendLabel::Improving => "clear upward form",
            TrendLabel::Declining => "worrying drop in form",
            TrendLabel::Stable => "stable results",
            TrendLabel::InsufficientData => "not enough data to determine a trend",
        }
    }
}

/// Classify a K/D history (oldest first)
pub fn classify(history: &[f64]) -> TrendLabel {
    if history.len() < MIN_TREND_POINTS {
        return TrendLabel::InsufficientData;
    }

    let (first, last) = match (history.first(), history.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return TrendLabel::InsufficientData,
    };

    match last - first {
        change if change > TREND_THRESHOLD => TrendLabel::Improving,
        change if change < -TREND_THRESHOLD => TrendLabel::Declining,
        _ => TrendLabel::Stable,
    }
}
